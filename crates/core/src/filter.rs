//! Client-side schedule filtering.
//!
//! The filter is a set of independent predicates (date condition, subject,
//! free text) that are ANDed together. Output order always follows the
//! input order, which the store keeps ascending by date.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::PortalError;
use crate::models::schedule::ScheduleEntry;

/// Subject value that disables the subject predicate.
pub const ALL_SUBJECTS: &str = "all";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateCondition {
    #[default]
    All,
    On,
    Before,
    After,
    Since,
    Between,
}

impl FromStr for DateCondition {
    type Err = PortalError;

    /// Parses the wire name of a condition, ignoring case and padding.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(DateCondition::All),
            "on" => Ok(DateCondition::On),
            "before" => Ok(DateCondition::Before),
            "after" => Ok(DateCondition::After),
            "since" => Ok(DateCondition::Since),
            "between" => Ok(DateCondition::Between),
            _ => Err(PortalError::Validation(format!("Unknown date condition '{}'", raw.trim()))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub date_condition: DateCondition,
    pub date_val_1: Option<NaiveDate>,
    pub date_val_2: Option<NaiveDate>,
    /// `None` or `"all"` matches every subject.
    pub subject: Option<String>,
    pub text_query: String,
}

impl FilterState {
    fn date_predicate(&self) -> Option<DatePredicate> {
        let first = self.date_val_1?;
        match self.date_condition {
            DateCondition::All => None,
            DateCondition::On => Some(DatePredicate::On(first)),
            DateCondition::Before => Some(DatePredicate::Before(first)),
            DateCondition::After => Some(DatePredicate::After(first)),
            DateCondition::Since => Some(DatePredicate::Since(first)),
            // A missing upper bound leaves the range unfiltered.
            DateCondition::Between => self.date_val_2.map(|last| DatePredicate::Between(first, last)),
        }
    }

    fn subject_predicate(&self) -> Option<&str> {
        self.subject
            .as_deref()
            .filter(|s| !s.is_empty() && *s != ALL_SUBJECTS)
    }

    fn text_predicate(&self) -> Option<String> {
        let query = self.text_query.trim();
        (!query.is_empty()).then(|| query.to_lowercase())
    }
}

#[derive(Debug, Clone, Copy)]
enum DatePredicate {
    On(NaiveDate),
    Before(NaiveDate),
    After(NaiveDate),
    Since(NaiveDate),
    Between(NaiveDate, NaiveDate),
}

impl DatePredicate {
    fn matches(self, date: NaiveDate) -> bool {
        match self {
            DatePredicate::On(d) => date == d,
            DatePredicate::Before(d) => date < d,
            DatePredicate::After(d) => date > d,
            DatePredicate::Since(d) => date >= d,
            DatePredicate::Between(from, to) => date >= from && date <= to,
        }
    }
}

/// Applies `state` to `entries`, returning matches in their original order.
pub fn filter_entries<'a>(entries: &'a [ScheduleEntry], state: &FilterState) -> Vec<&'a ScheduleEntry> {
    let date = state.date_predicate();
    let subject = state.subject_predicate();
    let text = state.text_predicate();

    entries
        .iter()
        .filter(|entry| date.is_none_or(|p| p.matches(entry.date)))
        .filter(|entry| subject.is_none_or(|s| entry.subject == s))
        .filter(|entry| {
            text.as_deref().is_none_or(|q| {
                entry.topic.to_lowercase().contains(q) || entry.subject.to_lowercase().contains(q)
            })
        })
        .collect()
}

/// Distinct subjects of the unfiltered list, sorted ascending.
pub fn distinct_subjects(entries: &[ScheduleEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.subject.as_str())
        .filter(|s| !s.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
