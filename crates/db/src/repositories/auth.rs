use crate::models::{DbCredential, DbSession};
use argon2::{Argon2, PasswordVerifier};
use chrono::Utc;
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_credential(
    pool: &Pool<Postgres>,
    email: &str,
    password_hash: &str,
) -> Result<DbCredential> {
    let user_id = Uuid::new_v4();

    tracing::debug!("Creating credential: user_id={}", user_id);

    let credential = sqlx::query_as::<_, DbCredential>(
        r#"
        INSERT INTO credentials (user_id, email, password_hash, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING user_id, email, password_hash, created_at
        "#,
    )
    .bind(user_id)
    .bind(email.trim())
    .bind(password_hash)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(credential)
}

pub async fn get_credential_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbCredential>> {
    let credential = sqlx::query_as::<_, DbCredential>(
        r#"
        SELECT user_id, email, password_hash, created_at
        FROM credentials
        WHERE LOWER(email) = LOWER($1)
        "#,
    )
    .bind(email.trim())
    .fetch_optional(pool)
    .await?;

    Ok(credential)
}

/// Returns the credential when `password` matches the stored hash.
pub async fn verify_credentials(
    pool: &Pool<Postgres>,
    email: &str,
    password: &str,
) -> Result<Option<DbCredential>> {
    let Some(credential) = get_credential_by_email(pool, email).await? else {
        tracing::debug!("No credential for email: {}", email);
        return Ok(None);
    };

    let is_valid = {
        let parsed_hash = argon2::PasswordHash::new(&credential.password_hash)
            .map_err(|e| eyre!("Invalid password hash: {}", e))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    };

    Ok(is_valid.then_some(credential))
}

pub async fn update_password_hash(pool: &Pool<Postgres>, user_id: Uuid, password_hash: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE credentials
        SET password_hash = $2
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .bind(password_hash)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(eyre!("Credential not found for user {}", user_id));
    }

    Ok(())
}

pub async fn create_session(
    pool: &Pool<Postgres>,
    token: &str,
    user_id: Uuid,
    email: &str,
) -> Result<DbSession> {
    let session = sqlx::query_as::<_, DbSession>(
        r#"
        INSERT INTO sessions (token, user_id, email, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING token, user_id, email, created_at
        "#,
    )
    .bind(token)
    .bind(user_id)
    .bind(email)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(session)
}

pub async fn get_session(pool: &Pool<Postgres>, token: &str) -> Result<Option<DbSession>> {
    let session = sqlx::query_as::<_, DbSession>(
        r#"
        SELECT token, user_id, email, created_at
        FROM sessions
        WHERE token = $1
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

pub async fn delete_session(pool: &Pool<Postgres>, token: &str) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM sessions
        WHERE token = $1
        "#,
    )
    .bind(token)
    .execute(pool)
    .await?;

    Ok(())
}
