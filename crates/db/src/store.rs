//! Repository traits over the portal's collections.
//!
//! Handlers talk to these traits rather than to the pool so that request
//! logic can run against the mocks in [`crate::mock`]. [`PgStore`]
//! implements every trait on top of the free functions in
//! [`crate::repositories`].

use std::sync::Arc;

use async_trait::async_trait;
use eyre::Result;
use portal_core::models::{
    access::{AccessRecord, NewAccessRecord},
    auth::Session,
    centre::Centre,
    progress::{ProgressKey, ProgressPatch, ProgressRecord},
    schedule::{NewScheduleEntry, ScheduleEntry},
};
use uuid::Uuid;

use crate::{DbPool, repositories};

#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Stores a credential and returns the new user id.
    async fn create_credential(&self, email: &str, password_hash: &str) -> Result<Uuid>;

    /// Returns the user id when the password matches.
    async fn verify_credentials(&self, email: &str, password: &str) -> Result<Option<Uuid>>;

    async fn update_password(&self, user_id: Uuid, password_hash: &str) -> Result<()>;

    async fn create_session(&self, token: &str, user_id: Uuid, email: &str) -> Result<Session>;

    async fn get_session(&self, token: &str) -> Result<Option<Session>>;

    async fn revoke_session(&self, token: &str) -> Result<()>;
}

#[async_trait]
pub trait AccessRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<AccessRecord>>;

    async fn link_user(&self, access_id: Uuid, user_id: Uuid) -> Result<()>;

    async fn create(&self, record: NewAccessRecord) -> Result<AccessRecord>;

    /// Clears the first-login flag; returns how many records matched.
    async fn complete_password_reset(&self, email: &str, case_insensitive: bool) -> Result<u64>;

    async fn centre_names(&self) -> Result<Vec<Option<String>>>;
}

#[async_trait]
pub trait CentreRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Centre>>;

    /// `None` when a centre with this name already exists.
    async fn create(&self, name: &str, location: Option<String>) -> Result<Option<Centre>>;

    async fn update(&self, id: Uuid, name: &str, location: Option<String>) -> Result<Option<Centre>>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Entries of one centre, ascending by date.
    async fn list_for_centre(&self, centre_name: &str) -> Result<Vec<ScheduleEntry>>;

    async fn insert_batch(&self, entries: Vec<NewScheduleEntry>) -> Result<u64>;
}

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ProgressRecord>>;

    async fn upsert(&self, key: ProgressKey, patch: ProgressPatch) -> Result<ProgressRecord>;
}

/// Every repository the API needs, behind shared trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub auth: Arc<dyn AuthRepository>,
    pub access: Arc<dyn AccessRepository>,
    pub centres: Arc<dyn CentreRepository>,
    pub schedule: Arc<dyn ScheduleRepository>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Repositories {
    pub fn postgres(pool: DbPool) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self {
            auth: store.clone(),
            access: store.clone(),
            centres: store.clone(),
            schedule: store.clone(),
            progress: store,
        }
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthRepository for PgStore {
    async fn create_credential(&self, email: &str, password_hash: &str) -> Result<Uuid> {
        let credential = repositories::auth::create_credential(&self.pool, email, password_hash).await?;
        Ok(credential.user_id)
    }

    async fn verify_credentials(&self, email: &str, password: &str) -> Result<Option<Uuid>> {
        let credential = repositories::auth::verify_credentials(&self.pool, email, password).await?;
        Ok(credential.map(|c| c.user_id))
    }

    async fn update_password(&self, user_id: Uuid, password_hash: &str) -> Result<()> {
        repositories::auth::update_password_hash(&self.pool, user_id, password_hash).await
    }

    async fn create_session(&self, token: &str, user_id: Uuid, email: &str) -> Result<Session> {
        let session = repositories::auth::create_session(&self.pool, token, user_id, email).await?;
        Ok(session.into())
    }

    async fn get_session(&self, token: &str) -> Result<Option<Session>> {
        let session = repositories::auth::get_session(&self.pool, token).await?;
        Ok(session.map(Into::into))
    }

    async fn revoke_session(&self, token: &str) -> Result<()> {
        repositories::auth::delete_session(&self.pool, token).await
    }
}

#[async_trait]
impl AccessRepository for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<AccessRecord>> {
        let access = repositories::access::get_access_by_email(&self.pool, email).await?;
        Ok(access.map(Into::into))
    }

    async fn link_user(&self, access_id: Uuid, user_id: Uuid) -> Result<()> {
        repositories::access::link_user_id(&self.pool, access_id, user_id).await
    }

    async fn create(&self, record: NewAccessRecord) -> Result<AccessRecord> {
        let access = repositories::access::create_access(&self.pool, &record).await?;
        Ok(access.into())
    }

    async fn complete_password_reset(&self, email: &str, case_insensitive: bool) -> Result<u64> {
        repositories::access::complete_password_reset(&self.pool, email, case_insensitive).await
    }

    async fn centre_names(&self) -> Result<Vec<Option<String>>> {
        repositories::access::get_centre_names(&self.pool).await
    }
}

#[async_trait]
impl CentreRepository for PgStore {
    async fn list(&self) -> Result<Vec<Centre>> {
        let centres = repositories::centre::get_centres(&self.pool).await?;
        Ok(centres.into_iter().map(Into::into).collect())
    }

    async fn create(&self, name: &str, location: Option<String>) -> Result<Option<Centre>> {
        let centre = repositories::centre::create_centre(&self.pool, name, location.as_deref()).await?;
        Ok(centre.map(Into::into))
    }

    async fn update(&self, id: Uuid, name: &str, location: Option<String>) -> Result<Option<Centre>> {
        let centre = repositories::centre::update_centre(&self.pool, id, name, location.as_deref()).await?;
        Ok(centre.map(Into::into))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        repositories::centre::delete_centre(&self.pool, id).await
    }
}

#[async_trait]
impl ScheduleRepository for PgStore {
    async fn list_for_centre(&self, centre_name: &str) -> Result<Vec<ScheduleEntry>> {
        let entries = repositories::schedule::get_schedule_by_centre(&self.pool, centre_name).await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }

    async fn insert_batch(&self, entries: Vec<NewScheduleEntry>) -> Result<u64> {
        repositories::schedule::insert_schedule_entries(&self.pool, &entries).await
    }
}

#[async_trait]
impl ProgressRepository for PgStore {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ProgressRecord>> {
        let progress = repositories::progress::get_progress_by_user(&self.pool, user_id).await?;
        Ok(progress.into_iter().map(Into::into).collect())
    }

    async fn upsert(&self, key: ProgressKey, patch: ProgressPatch) -> Result<ProgressRecord> {
        let record = match patch {
            ProgressPatch::Completion(is_done) => {
                repositories::progress::upsert_completion(&self.pool, key, is_done).await?
            }
            ProgressPatch::Remarks(remarks) => {
                repositories::progress::upsert_remarks(&self.pool, key, &remarks).await?
            }
        };
        Ok(record.into())
    }
}
