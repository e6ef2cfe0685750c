use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use portal_core::models::{
    access::AccessRecord, auth::Session, centre::Centre, progress::ProgressRecord,
    schedule::ScheduleEntry,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAccess {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub phone_number: Option<String>,
    pub email_id: String,
    pub is_active: Option<bool>,
    pub is_first_login: bool,
    pub centre_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCentre {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSchedule {
    pub id: Uuid,
    pub centre_name: String,
    pub date: NaiveDate,
    pub subject: String,
    pub topic: String,
    pub custom_module_code: String,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    pub num_questions: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProgress {
    pub user_id: Uuid,
    pub schedule_id: Uuid,
    pub is_done: bool,
    pub remarks: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCredential {
    pub user_id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSession {
    pub token: String,
    pub user_id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbAccess> for AccessRecord {
    fn from(row: DbAccess) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            role: row.role,
            phone_number: row.phone_number,
            email_id: row.email_id,
            is_active: row.is_active,
            is_first_login: row.is_first_login,
            centre_name: row.centre_name,
        }
    }
}

impl From<DbCentre> for Centre {
    fn from(row: DbCentre) -> Self {
        Self {
            id: row.id,
            name: row.name,
            location: row.location,
        }
    }
}

impl From<DbSchedule> for ScheduleEntry {
    fn from(row: DbSchedule) -> Self {
        Self {
            id: row.id,
            centre_name: row.centre_name,
            date: row.date,
            subject: row.subject,
            topic: row.topic,
            custom_module_code: row.custom_module_code,
            start_datetime: row.start_datetime,
            end_datetime: row.end_datetime,
            // The column carries a non-negative check.
            num_questions: u32::try_from(row.num_questions).unwrap_or(0),
        }
    }
}

impl From<DbProgress> for ProgressRecord {
    fn from(row: DbProgress) -> Self {
        Self {
            user_id: row.user_id,
            schedule_id: row.schedule_id,
            is_done: row.is_done,
            remarks: row.remarks,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbSession> for Session {
    fn from(row: DbSession) -> Self {
        Self {
            token: row.token,
            user_id: row.user_id,
            email: row.email,
            created_at: row.created_at,
        }
    }
}
