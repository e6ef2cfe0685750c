//! Page controller shared by every page-level handler.
//!
//! Runs the profile half of the gate for a caller that already holds a
//! session: fetch the access record by email, link the identity if it is
//! missing, and resolve the [`GateState`]. A deactivated account has its
//! session revoked here, before any page data is produced, so requests that
//! are already in flight with the same token fail at the session check.

use portal_core::{
    errors::PortalResult,
    gate::{GateState, ProfileFetch, ProfileHeader},
    models::{access::AccessRecord, auth::Session},
};
use tracing::{error, info, warn};

use crate::ApiState;

/// An active caller with a resolved profile.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub session: Session,
    pub header: ProfileHeader,
    pub record: AccessRecord,
}

/// Resolves the gate for `session`. Never fails: fetch errors degrade to
/// `ProfileMissing`.
pub async fn load_gate(state: &ApiState, session: &Session) -> GateState {
    let gate = GateState::start(Some(session));

    let fetch = match state.repos.access.find_by_email(&session.email).await {
        Ok(Some(mut record)) => {
            if record.user_id.is_none() {
                match state.repos.access.link_user(record.id, session.user_id).await {
                    Ok(()) => record.user_id = Some(session.user_id),
                    Err(e) => warn!("Failed to link access record {} to user: {}", record.id, e),
                }
            }
            ProfileFetch::Found(record)
        }
        Ok(None) => ProfileFetch::Missing,
        Err(e) => ProfileFetch::Failed(e.to_string()),
    };

    let gate = gate.resolve(fetch);

    if gate.requires_sign_out() {
        info!("Signing out deactivated account: {}", session.email);
        if let Err(e) = state.repos.auth.revoke_session(&session.token).await {
            error!("Failed to revoke session for deactivated account: {}", e);
        }
    }

    gate
}

/// Gate for pages that need an access record.
pub async fn require_active(state: &ApiState, session: Session) -> PortalResult<PageContext> {
    let (header, record) = load_gate(state, &session).await.into_active()?;
    Ok(PageContext {
        session,
        header,
        record,
    })
}

/// Gate for admin pages.
pub async fn require_admin(state: &ApiState, session: Session) -> PortalResult<PageContext> {
    let (header, record) = load_gate(state, &session).await.into_admin()?;
    Ok(PageContext {
        session,
        header,
        record,
    })
}
