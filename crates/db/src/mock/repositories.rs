use async_trait::async_trait;
use mockall::mock;
use portal_core::models::{
    access::{AccessRecord, NewAccessRecord},
    auth::Session,
    centre::Centre,
    progress::{ProgressKey, ProgressPatch, ProgressRecord},
    schedule::{NewScheduleEntry, ScheduleEntry},
};
use uuid::Uuid;

use crate::store::{
    AccessRepository, AuthRepository, CentreRepository, ProgressRepository, ScheduleRepository,
};

// Mock repositories for testing
mock! {
    pub AuthRepo {}

    #[async_trait]
    impl AuthRepository for AuthRepo {
        async fn create_credential(&self, email: &str, password_hash: &str) -> eyre::Result<Uuid>;
        async fn verify_credentials(&self, email: &str, password: &str) -> eyre::Result<Option<Uuid>>;
        async fn update_password(&self, user_id: Uuid, password_hash: &str) -> eyre::Result<()>;
        async fn create_session(&self, token: &str, user_id: Uuid, email: &str) -> eyre::Result<Session>;
        async fn get_session(&self, token: &str) -> eyre::Result<Option<Session>>;
        async fn revoke_session(&self, token: &str) -> eyre::Result<()>;
    }
}

mock! {
    pub AccessRepo {}

    #[async_trait]
    impl AccessRepository for AccessRepo {
        async fn find_by_email(&self, email: &str) -> eyre::Result<Option<AccessRecord>>;
        async fn link_user(&self, access_id: Uuid, user_id: Uuid) -> eyre::Result<()>;
        async fn create(&self, record: NewAccessRecord) -> eyre::Result<AccessRecord>;
        async fn complete_password_reset(&self, email: &str, case_insensitive: bool) -> eyre::Result<u64>;
        async fn centre_names(&self) -> eyre::Result<Vec<Option<String>>>;
    }
}

mock! {
    pub CentreRepo {}

    #[async_trait]
    impl CentreRepository for CentreRepo {
        async fn list(&self) -> eyre::Result<Vec<Centre>>;
        async fn create(&self, name: &str, location: Option<String>) -> eyre::Result<Option<Centre>>;
        async fn update(&self, id: Uuid, name: &str, location: Option<String>) -> eyre::Result<Option<Centre>>;
        async fn delete(&self, id: Uuid) -> eyre::Result<bool>;
    }
}

mock! {
    pub ScheduleRepo {}

    #[async_trait]
    impl ScheduleRepository for ScheduleRepo {
        async fn list_for_centre(&self, centre_name: &str) -> eyre::Result<Vec<ScheduleEntry>>;
        async fn insert_batch(&self, entries: Vec<NewScheduleEntry>) -> eyre::Result<u64>;
    }
}

mock! {
    pub ProgressRepo {}

    #[async_trait]
    impl ProgressRepository for ProgressRepo {
        async fn list_for_user(&self, user_id: Uuid) -> eyre::Result<Vec<ProgressRecord>>;
        async fn upsert(&self, key: ProgressKey, patch: ProgressPatch) -> eyre::Result<ProgressRecord>;
    }
}
