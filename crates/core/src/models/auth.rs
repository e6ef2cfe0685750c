use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{PortalError, PortalResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub redirect: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub user_id: Uuid,
    pub redirect: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePasswordRequest {
    pub new_password: String,
    pub confirm_password: String,
}

impl UpdatePasswordRequest {
    pub fn validate(&self) -> PortalResult<&str> {
        if self.new_password.trim().is_empty() || self.confirm_password.trim().is_empty() {
            return Err(PortalError::Validation("Both password fields are required".to_string()));
        }
        if self.new_password != self.confirm_password {
            return Err(PortalError::Validation("Passwords do not match!".to_string()));
        }
        Ok(&self.new_password)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePasswordResponse {
    pub message: String,
    pub redirect: String,
}
