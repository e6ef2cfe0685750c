use crate::models::DbCentre;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_centres(pool: &Pool<Postgres>) -> Result<Vec<DbCentre>> {
    let centres = sqlx::query_as::<_, DbCentre>(
        r#"
        SELECT id, name, location, created_at
        FROM centres
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(centres)
}

/// Inserts a centre; returns `None` when the name is already taken.
pub async fn create_centre(
    pool: &Pool<Postgres>,
    name: &str,
    location: Option<&str>,
) -> Result<Option<DbCentre>> {
    let id = Uuid::new_v4();

    tracing::debug!("Creating centre: id={}, name={}", id, name);

    let centre = sqlx::query_as::<_, DbCentre>(
        r#"
        INSERT INTO centres (id, name, location)
        VALUES ($1, $2, $3)
        ON CONFLICT (name) DO NOTHING
        RETURNING id, name, location, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(location)
    .fetch_optional(pool)
    .await?;

    Ok(centre)
}

pub async fn update_centre(
    pool: &Pool<Postgres>,
    id: Uuid,
    name: &str,
    location: Option<&str>,
) -> Result<Option<DbCentre>> {
    let centre = sqlx::query_as::<_, DbCentre>(
        r#"
        UPDATE centres
        SET name = $2, location = $3
        WHERE id = $1
        RETURNING id, name, location, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(location)
    .fetch_optional(pool)
    .await?;

    if centre.is_none() {
        tracing::debug!("Centre not found for update: id={}", id);
    }

    Ok(centre)
}

/// Returns whether a row was deleted.
pub async fn delete_centre(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM centres
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
