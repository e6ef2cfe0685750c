use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{PortalError, PortalResult};
use crate::filter::{DateCondition, FilterState};
use crate::render::RenderedSchedule;

/// One scheduled class session for a centre.
///
/// Start and end are local wall-clock timestamps; no timezone is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: Uuid,
    pub centre_name: String,
    pub date: NaiveDate,
    pub subject: String,
    pub topic: String,
    pub custom_module_code: String,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    pub num_questions: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewScheduleEntry {
    pub centre_name: String,
    pub date: NaiveDate,
    pub subject: String,
    pub topic: String,
    pub custom_module_code: String,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    pub num_questions: u32,
}

/// Query string accepted by the schedule endpoints.
///
/// Values arrive as raw strings from form controls, so empty strings are
/// treated the same as missing values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleQuery {
    pub centre: Option<String>,
    /// Wire name of a [`DateCondition`]; empty means `all`.
    pub date_condition: Option<String>,
    pub date_val_1: Option<String>,
    pub date_val_2: Option<String>,
    pub subject: Option<String>,
    pub q: Option<String>,
}

impl ScheduleQuery {
    pub fn filter_state(&self) -> PortalResult<FilterState> {
        Ok(FilterState {
            date_condition: match non_empty(self.date_condition.as_deref()) {
                Some(raw) => raw.parse()?,
                None => DateCondition::All,
            },
            date_val_1: parse_optional_date(self.date_val_1.as_deref())?,
            date_val_2: parse_optional_date(self.date_val_2.as_deref())?,
            subject: non_empty(self.subject.as_deref()),
            text_query: self.q.clone().unwrap_or_default(),
        })
    }

    pub fn requested_centre(&self) -> Option<&str> {
        self.centre.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_optional_date(value: Option<&str>) -> PortalResult<Option<NaiveDate>> {
    match non_empty(value) {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| PortalError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", raw))),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub centre_name: String,
    /// Centre choices for admins; `None` when the caller is locked to a centre.
    pub centres: Option<Vec<String>>,
    pub subjects: Vec<String>,
    pub filter: FilterState,
    pub total: usize,
    pub schedule: RenderedSchedule,
}
