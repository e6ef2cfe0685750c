use crate::models::DbProgress;
use chrono::Utc;
use eyre::Result;
use portal_core::models::progress::ProgressKey;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_progress_by_user(pool: &Pool<Postgres>, user_id: Uuid) -> Result<Vec<DbProgress>> {
    let progress = sqlx::query_as::<_, DbProgress>(
        r#"
        SELECT user_id, schedule_id, is_done, remarks, updated_at
        FROM schedule_progress
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(progress)
}

/// Sets the completion flag, creating the record with empty remarks if
/// none exists. Remarks of an existing record are left alone.
pub async fn upsert_completion(pool: &Pool<Postgres>, key: ProgressKey, is_done: bool) -> Result<DbProgress> {
    tracing::debug!(
        "Upserting completion: user_id={}, schedule_id={}, is_done={}",
        key.user_id(),
        key.schedule_id(),
        is_done
    );

    let progress = sqlx::query_as::<_, DbProgress>(
        r#"
        INSERT INTO schedule_progress (user_id, schedule_id, is_done, remarks, updated_at)
        VALUES ($1, $2, $3, '', $4)
        ON CONFLICT (user_id, schedule_id)
        DO UPDATE SET is_done = EXCLUDED.is_done, updated_at = EXCLUDED.updated_at
        RETURNING user_id, schedule_id, is_done, remarks, updated_at
        "#,
    )
    .bind(key.user_id())
    .bind(key.schedule_id())
    .bind(is_done)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(progress)
}

/// Sets the remarks, creating the record as not done if none exists. The
/// completion flag of an existing record is left alone.
pub async fn upsert_remarks(pool: &Pool<Postgres>, key: ProgressKey, remarks: &str) -> Result<DbProgress> {
    tracing::debug!(
        "Upserting remarks: user_id={}, schedule_id={}",
        key.user_id(),
        key.schedule_id()
    );

    let progress = sqlx::query_as::<_, DbProgress>(
        r#"
        INSERT INTO schedule_progress (user_id, schedule_id, is_done, remarks, updated_at)
        VALUES ($1, $2, FALSE, $3, $4)
        ON CONFLICT (user_id, schedule_id)
        DO UPDATE SET remarks = EXCLUDED.remarks, updated_at = EXCLUDED.updated_at
        RETURNING user_id, schedule_id, is_done, remarks, updated_at
        "#,
    )
    .bind(key.user_id())
    .bind(key.schedule_id())
    .bind(remarks)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(progress)
}
