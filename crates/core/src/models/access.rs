use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roles that unlock the admin sections of the portal.
pub const ADMIN_ROLES: [&str; 4] = ["Super admin", "Admin", "Mentor", "Academics"];

/// Role given to self-registered accounts.
pub const DEFAULT_SIGNUP_ROLE: &str = "Students";

pub fn is_admin_role(role: &str) -> bool {
    ADMIN_ROLES.contains(&role)
}

/// A row of the access list: who a signed-in email is and what they may do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    pub id: Uuid,
    /// Identity linkage to the credential, filled in on first profile load.
    pub user_id: Option<Uuid>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub phone_number: Option<String>,
    pub email_id: String,
    /// `None` is treated as active; only an explicit `false` deactivates.
    pub is_active: Option<bool>,
    pub is_first_login: bool,
    pub centre_name: Option<String>,
}

impl AccessRecord {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref().is_some_and(is_admin_role)
    }

    pub fn is_deactivated(&self) -> bool {
        self.is_active == Some(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccessRecord {
    pub user_id: Option<Uuid>,
    pub name: String,
    pub email_id: String,
    pub phone_number: Option<String>,
    pub role: String,
}
