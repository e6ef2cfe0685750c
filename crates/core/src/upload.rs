//! Bulk schedule upload from a six-column comma-separated file.
//!
//! Format: a header line followed by one data line per session:
//! `date, topic, module code, start timestamp, end timestamp, questions`.
//! Cells are split on every comma (no quoting) and trimmed. Malformed lines
//! are skipped individually; the upload fails only when nothing is left.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{PortalError, PortalResult};
use crate::models::schedule::NewScheduleEntry;

pub const COLUMN_COUNT: usize = 6;

/// Largest question count the store accepts; larger values are clamped.
pub const MAX_QUESTIONS: u32 = i32::MAX as u32;

pub const NO_VALID_ROWS_MESSAGE: &str = "No valid data found in CSV. Check your formatting.";

pub const SAMPLE_FILE_NAME: &str = "mentorship_schedule_sample.csv";

pub const SAMPLE_CSV: &str = "Date, Topic, Custom Module Code, Start Date & Time, End Date & Time, Number of Questions\n\
2026-03-01, Anatomy: Lower Limb, ANA-LL-01, 2026-03-01 10:00:00, 2026-03-01 12:00:00, 50\n";

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    pub centre_name: String,
    pub csv: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub inserted: usize,
    pub centre_name: String,
    pub skipped: Vec<SkippedLine>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// 1-based position among the data lines (header excluded).
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBatch {
    pub centre_name: String,
    pub rows: Vec<NewScheduleEntry>,
    pub skipped: Vec<SkippedLine>,
}

impl UploadBatch {
    pub fn success_message(&self) -> String {
        format!(
            "Successfully synced {} rows for {} centre!",
            self.rows.len(),
            self.centre_name
        )
    }
}

/// Parses an uploaded file into rows for `centre_name`.
pub fn parse_schedule_csv(text: &str, centre_name: &str) -> PortalResult<UploadBatch> {
    let centre_name = centre_name.trim();
    if centre_name.is_empty() {
        return Err(PortalError::Validation("A centre must be selected".to_string()));
    }

    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    let data_lines = text.lines().filter(|line| !line.trim().is_empty()).skip(1);
    for (index, line) in data_lines.enumerate() {
        match parse_line(line, centre_name) {
            Ok(row) => rows.push(row),
            Err(reason) => {
                tracing::debug!("Skipping upload row {}: {}", index + 1, reason);
                skipped.push(SkippedLine {
                    row: index + 1,
                    reason,
                });
            }
        }
    }

    if rows.is_empty() {
        return Err(PortalError::Validation(NO_VALID_ROWS_MESSAGE.to_string()));
    }

    Ok(UploadBatch {
        centre_name: centre_name.to_string(),
        rows,
        skipped,
    })
}

fn parse_line(line: &str, centre_name: &str) -> Result<NewScheduleEntry, String> {
    let cells: Vec<&str> = line.split(',').map(str::trim).collect();
    if cells.len() < COLUMN_COUNT {
        return Err(format!(
            "expected {} columns, found {}",
            COLUMN_COUNT,
            cells.len()
        ));
    }

    let date = NaiveDate::parse_from_str(cells[0], "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}'", cells[0]))?;
    let start_datetime = parse_timestamp(cells[3])?;
    let end_datetime = parse_timestamp(cells[4])?;
    let topic = cells[1].to_string();

    Ok(NewScheduleEntry {
        centre_name: centre_name.to_string(),
        date,
        subject: subject_from_topic(&topic),
        topic,
        custom_module_code: cells[2].to_string(),
        start_datetime,
        end_datetime,
        num_questions: parse_question_count(cells[5]),
    })
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| format!("invalid timestamp '{}'", raw))
}

/// Leading decimal digits of `raw`, clamped to [`MAX_QUESTIONS`]. Text
/// without leading digits counts as zero.
pub fn parse_question_count(raw: &str) -> u32 {
    let raw = raw.trim();
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    let digits: String = raw.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    // All digits, so a parse failure can only be overflow.
    digits.parse::<u32>().map_or(MAX_QUESTIONS, |n| n.min(MAX_QUESTIONS))
}

/// Subject of an uploaded session: the topic text before the first `:`.
pub fn subject_from_topic(topic: &str) -> String {
    match topic.split_once(':') {
        Some((subject, _)) if !subject.trim().is_empty() => subject.trim().to_string(),
        _ => topic.trim().to_string(),
    }
}
