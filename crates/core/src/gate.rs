//! Session gate and profile loading as an explicit state machine.
//!
//! A page load starts at [`GateState::start`], which either stops at
//! `Unauthenticated` or moves to `LoadingProfile`. Resolving the profile
//! fetch moves `LoadingProfile` to one of `Active`, `Deactivated` or
//! `ProfileMissing`. Those three are final for the page load.

use serde::{Deserialize, Serialize};

use crate::errors::{PortalError, PortalResult};
use crate::models::access::AccessRecord;
use crate::models::auth::Session;

pub const LOGIN_PAGE: &str = "index.html";
pub const DASHBOARD_PAGE: &str = "dashboard.html";

pub const DEACTIVATED_MESSAGE: &str =
    "Your account has been deactivated. Send an email to care@dbmci.one in case of any queries";

/// Outcome of looking up the caller's access record.
#[derive(Debug, Clone)]
pub enum ProfileFetch {
    Found(AccessRecord),
    Missing,
    Failed(String),
}

/// What the page header shows for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileHeader {
    pub display_name: String,
    pub role: String,
    pub avatar_initial: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub centre_name: Option<String>,
    pub is_admin: bool,
    /// The password modal must be shown and cannot be dismissed.
    pub force_password_reset: bool,
    /// Set when the access record could not be loaded.
    pub read_only: bool,
}

impl ProfileHeader {
    fn from_record(record: &AccessRecord) -> Self {
        let display_name = record
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("User")
            .to_string();
        Self {
            avatar_initial: avatar_initial(&display_name),
            display_name,
            role: record.role.clone().unwrap_or_else(|| "Member".to_string()),
            email: record.email_id.clone(),
            phone_number: record.phone_number.clone(),
            centre_name: record.centre_name.clone(),
            is_admin: record.is_admin(),
            force_password_reset: record.is_first_login,
            read_only: false,
        }
    }

    fn minimal(email: &str) -> Self {
        let display_name = display_name_from_email(email);
        Self {
            avatar_initial: avatar_initial(&display_name),
            display_name,
            role: "Member".to_string(),
            email: email.to_string(),
            phone_number: None,
            centre_name: None,
            is_admin: false,
            force_password_reset: false,
            read_only: true,
        }
    }
}

/// The local part of an email address, or the whole string without an `@`.
pub fn display_name_from_email(email: &str) -> String {
    let local = email.trim().split('@').next().unwrap_or_default();
    if local.is_empty() {
        "User".to_string()
    } else {
        local.to_string()
    }
}

fn avatar_initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "U".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GateState {
    Unauthenticated,
    LoadingProfile { email: String },
    Active { header: ProfileHeader, record: AccessRecord },
    Deactivated,
    ProfileMissing { header: ProfileHeader },
}

impl GateState {
    pub fn start(session: Option<&Session>) -> Self {
        match session {
            Some(session) => GateState::LoadingProfile {
                email: session.email.clone(),
            },
            None => GateState::Unauthenticated,
        }
    }

    /// Applies the profile fetch. Only `LoadingProfile` moves; every other
    /// state is returned unchanged, so a missing profile stays missing for
    /// the rest of the page load.
    pub fn resolve(self, fetch: ProfileFetch) -> Self {
        let email = match self {
            GateState::LoadingProfile { email } => email,
            other => return other,
        };
        match fetch {
            ProfileFetch::Found(record) if record.is_deactivated() => GateState::Deactivated,
            ProfileFetch::Found(record) => GateState::Active {
                header: ProfileHeader::from_record(&record),
                record,
            },
            ProfileFetch::Missing => GateState::ProfileMissing {
                header: ProfileHeader::minimal(&email),
            },
            ProfileFetch::Failed(reason) => {
                tracing::warn!("Profile fetch failed for {}: {}", email, reason);
                GateState::ProfileMissing {
                    header: ProfileHeader::minimal(&email),
                }
            }
        }
    }

    /// Page to send the browser to, if the page must not render.
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            GateState::Unauthenticated | GateState::Deactivated => Some(LOGIN_PAGE),
            _ => None,
        }
    }

    /// The session must be revoked before answering.
    pub fn requires_sign_out(&self) -> bool {
        matches!(self, GateState::Deactivated)
    }

    pub fn header(&self) -> Option<&ProfileHeader> {
        match self {
            GateState::Active { header, .. } | GateState::ProfileMissing { header } => Some(header),
            _ => None,
        }
    }

    pub fn record(&self) -> Option<&AccessRecord> {
        match self {
            GateState::Active { record, .. } => Some(record),
            _ => None,
        }
    }

    /// Converts a non-active state into the error the caller should see.
    pub fn into_active(self) -> PortalResult<(ProfileHeader, AccessRecord)> {
        match self {
            GateState::Active { header, record } => Ok((header, record)),
            GateState::Unauthenticated => Err(PortalError::Authentication("Not signed in".to_string())),
            GateState::Deactivated => Err(PortalError::Deactivated(DEACTIVATED_MESSAGE.to_string())),
            GateState::LoadingProfile { .. } => Err(PortalError::Internal(
                "Profile was not resolved before use".into(),
            )),
            GateState::ProfileMissing { .. } => Err(PortalError::Authorization(
                "No access record for this account".to_string(),
            )),
        }
    }

    /// Admin pages need an active admin that has completed the first-login
    /// password reset.
    pub fn into_admin(self) -> PortalResult<(ProfileHeader, AccessRecord)> {
        let (header, record) = self.into_active()?;
        if !record.is_admin() {
            return Err(PortalError::Authorization("Admin access required".to_string()));
        }
        if record.is_first_login {
            return Err(PortalError::Authorization(
                "Password reset required before using admin pages".to_string(),
            ));
        }
        Ok((header, record))
    }
}
