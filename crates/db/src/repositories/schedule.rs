use crate::models::DbSchedule;
use eyre::Result;
use portal_core::{models::schedule::NewScheduleEntry, upload::MAX_QUESTIONS};
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

/// Rows per INSERT statement; keeps bind parameters well under the
/// Postgres limit of 65535.
const INSERT_CHUNK_SIZE: usize = 1000;

pub async fn get_schedule_by_centre(
    pool: &Pool<Postgres>,
    centre_name: &str,
) -> Result<Vec<DbSchedule>> {
    tracing::debug!("Getting schedule for centre: {}", centre_name);

    let entries = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT id, centre_name, date, subject, topic, custom_module_code,
               start_datetime, end_datetime, num_questions, created_at
        FROM schedule
        WHERE centre_name = $1
        ORDER BY date ASC, start_datetime ASC
        "#,
    )
    .bind(centre_name)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// Inserts all rows in one transaction and returns the number inserted.
pub async fn insert_schedule_entries(
    pool: &Pool<Postgres>,
    entries: &[NewScheduleEntry],
) -> Result<u64> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for chunk in entries.chunks(INSERT_CHUNK_SIZE) {
        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO schedule (id, centre_name, date, subject, topic, custom_module_code, \
             start_datetime, end_datetime, num_questions) ",
        );
        builder.push_values(chunk, |mut row, entry| {
            row.push_bind(Uuid::new_v4())
                .push_bind(entry.centre_name.clone())
                .push_bind(entry.date)
                .push_bind(entry.subject.clone())
                .push_bind(entry.topic.clone())
                .push_bind(entry.custom_module_code.clone())
                .push_bind(entry.start_datetime)
                .push_bind(entry.end_datetime)
                .push_bind(i32::try_from(entry.num_questions.min(MAX_QUESTIONS)).unwrap_or(i32::MAX));
        });

        let result = builder.build().execute(&mut *tx).await?;
        inserted += result.rows_affected();
    }

    tx.commit().await?;

    tracing::debug!("Inserted {} schedule rows", inserted);
    Ok(inserted)
}
