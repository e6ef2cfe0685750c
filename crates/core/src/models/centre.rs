use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{PortalError, PortalResult};

/// Location shown for centres recovered from the access list.
pub const FALLBACK_LOCATION: &str = "Synced from Users";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Centre {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CentreRequest {
    pub name: String,
    pub location: Option<String>,
}

impl CentreRequest {
    /// Trims both fields; an empty location becomes `None`.
    pub fn normalized(&self) -> PortalResult<(String, Option<String>)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(PortalError::Validation("Centre name is required".to_string()));
        }
        let location = self
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);
        Ok((name.to_string(), location))
    }
}

/// A centre as listed on the management page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CentreListing {
    /// Absent for entries synthesized from the access list.
    pub id: Option<Uuid>,
    pub name: String,
    pub location: Option<String>,
}

impl From<Centre> for CentreListing {
    fn from(centre: Centre) -> Self {
        Self {
            id: Some(centre.id),
            name: centre.name,
            location: centre.location,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CentreListResponse {
    pub centres: Vec<CentreListing>,
    /// Set when the centres collection could not be read and the list was
    /// derived from access records instead.
    pub fallback: bool,
}

/// Distinct non-empty centre names in first-seen order.
pub fn fallback_centres<'a>(names: impl IntoIterator<Item = Option<&'a str>>) -> Vec<CentreListing> {
    let mut seen: Vec<&str> = Vec::new();
    for name in names.into_iter().flatten().map(str::trim) {
        if !name.is_empty() && !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen.into_iter()
        .map(|name| CentreListing {
            id: None,
            name: name.to_string(),
            location: Some(FALLBACK_LOCATION.to_string()),
        })
        .collect()
}
