use crate::models::DbAccess;
use eyre::Result;
use portal_core::models::access::NewAccessRecord;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const ACCESS_COLUMNS: &str =
    "id, user_id, name, role, phone_number, email_id, is_active, is_first_login, centre_name, created_at";

/// Looks up the access record for `email`, ignoring case.
pub async fn get_access_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbAccess>> {
    tracing::debug!("Getting access record by email: {}", email);

    let access = sqlx::query_as::<_, DbAccess>(&format!(
        r#"
        SELECT {ACCESS_COLUMNS}
        FROM access
        WHERE LOWER(email_id) = LOWER($1)
        ORDER BY created_at ASC
        LIMIT 1
        "#
    ))
    .bind(email.trim())
    .fetch_optional(pool)
    .await?;

    Ok(access)
}

/// Stores the identity linkage if the record does not have one yet.
pub async fn link_user_id(pool: &Pool<Postgres>, access_id: Uuid, user_id: Uuid) -> Result<()> {
    tracing::debug!("Linking access record {} to user {}", access_id, user_id);

    sqlx::query(
        r#"
        UPDATE access
        SET user_id = $2
        WHERE id = $1 AND user_id IS NULL
        "#,
    )
    .bind(access_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn create_access(pool: &Pool<Postgres>, record: &NewAccessRecord) -> Result<DbAccess> {
    let id = Uuid::new_v4();

    let access = sqlx::query_as::<_, DbAccess>(&format!(
        r#"
        INSERT INTO access (id, user_id, name, role, phone_number, email_id, is_first_login)
        VALUES ($1, $2, $3, $4, $5, $6, FALSE)
        RETURNING {ACCESS_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(record.user_id)
    .bind(&record.name)
    .bind(&record.role)
    .bind(&record.phone_number)
    .bind(&record.email_id)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Access record created: id={}, role={}", id, record.role);
    Ok(access)
}

/// Clears the first-login flag for `email` and returns the number of rows
/// updated. With `case_insensitive` unset the email must match exactly.
pub async fn complete_password_reset(
    pool: &Pool<Postgres>,
    email: &str,
    case_insensitive: bool,
) -> Result<u64> {
    let sql = if case_insensitive {
        "UPDATE access SET is_first_login = FALSE WHERE LOWER(email_id) = LOWER($1)"
    } else {
        "UPDATE access SET is_first_login = FALSE WHERE email_id = $1"
    };

    let result = sqlx::query(sql).bind(email).execute(pool).await?;
    Ok(result.rows_affected())
}

/// Centre names recorded against users, in insertion order.
pub async fn get_centre_names(pool: &Pool<Postgres>) -> Result<Vec<Option<String>>> {
    let names = sqlx::query_scalar::<_, Option<String>>(
        r#"
        SELECT centre_name
        FROM access
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(names)
}
