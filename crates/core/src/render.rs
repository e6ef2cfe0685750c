//! Turns a filtered schedule plus the caller's progress into table rows.
//!
//! Subjects are shown once per run of consecutive rows with the same
//! subject: the first row of a run carries the run length as its span and
//! the rest of the run omits the subject cell. Runs are computed over the
//! sequence as given, so a subject that reappears later starts a new run.

use std::fmt::Write;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::progress::ProgressMap;
use crate::models::schedule::ScheduleEntry;

pub const NO_RESULTS_MESSAGE: &str = "No sessions match the selected filters.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectSpan {
    pub start: usize,
    pub len: usize,
}

/// Run-length grouping of consecutive equal subjects.
pub fn subject_spans<S: AsRef<str>>(subjects: &[S]) -> Vec<SubjectSpan> {
    let mut spans: Vec<SubjectSpan> = Vec::new();
    for (index, subject) in subjects.iter().enumerate() {
        if let Some(span) = spans.last_mut() {
            if subjects[span.start].as_ref() == subject.as_ref() {
                span.len += 1;
                continue;
            }
        }
        spans.push(SubjectSpan { start: index, len: 1 });
    }
    spans
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub schedule_id: Uuid,
    /// Present only on the first row of a subject run.
    pub subject: Option<String>,
    pub subject_rowspan: Option<usize>,
    pub date: String,
    pub topic: String,
    pub module_code: String,
    pub time_range: String,
    pub num_questions: u32,
    pub tooltip: String,
    pub is_done: bool,
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedSchedule {
    Rows { rows: Vec<ScheduleRow> },
    Empty { message: String },
}

impl RenderedSchedule {
    pub fn rows(&self) -> &[ScheduleRow] {
        match self {
            RenderedSchedule::Rows { rows } => rows,
            RenderedSchedule::Empty { .. } => &[],
        }
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

pub fn format_time(timestamp: NaiveDateTime) -> String {
    timestamp.format("%I:%M %p").to_string()
}

pub fn format_time_range(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!("{} - {}", format_time(start), format_time(end))
}

fn tooltip(entry: &ScheduleEntry) -> String {
    format!(
        "Starts: {} {}\nEnds: {} {}\nQuestions: {}",
        format_date(entry.start_datetime.date()),
        format_time(entry.start_datetime),
        format_date(entry.end_datetime.date()),
        format_time(entry.end_datetime),
        entry.num_questions,
    )
}

/// Builds rows for `entries`; an empty input yields the placeholder with
/// `empty_message`.
pub fn render_schedule(
    entries: &[&ScheduleEntry],
    progress: &ProgressMap,
    empty_message: &str,
) -> RenderedSchedule {
    if entries.is_empty() {
        return RenderedSchedule::Empty {
            message: empty_message.to_string(),
        };
    }

    let subjects: Vec<&str> = entries.iter().map(|e| e.subject.as_str()).collect();
    let mut rows: Vec<ScheduleRow> = entries
        .iter()
        .map(|entry| {
            let record = progress.get(&entry.id);
            ScheduleRow {
                schedule_id: entry.id,
                subject: None,
                subject_rowspan: None,
                date: format_date(entry.date),
                topic: entry.topic.clone(),
                module_code: entry.custom_module_code.clone(),
                time_range: format_time_range(entry.start_datetime, entry.end_datetime),
                num_questions: entry.num_questions,
                tooltip: tooltip(entry),
                is_done: record.is_some_and(|r| r.is_done),
                remarks: record.map(|r| r.remarks.clone()).unwrap_or_default(),
            }
        })
        .collect();

    for span in subject_spans(&subjects) {
        let row = &mut rows[span.start];
        row.subject = Some(subjects[span.start].to_string());
        row.subject_rowspan = Some(span.len);
    }

    RenderedSchedule::Rows { rows }
}

/// Table-body markup for the schedule page.
pub fn render_html(schedule: &RenderedSchedule) -> String {
    let rows = match schedule {
        RenderedSchedule::Empty { message } => {
            return format!(
                "<tr class=\"empty-row\"><td colspan=\"8\">{}</td></tr>",
                escape_html(message)
            );
        }
        RenderedSchedule::Rows { rows } => rows,
    };

    let mut html = String::new();
    for row in rows {
        let id = row.schedule_id;
        html.push_str("<tr>");
        if let (Some(subject), Some(span)) = (&row.subject, row.subject_rowspan) {
            let _ = write!(html, "<td class=\"subject-cell\" rowspan=\"{}\">{}</td>", span, escape_html(subject));
        }
        let _ = write!(
            html,
            "<td class=\"date-cell\">{}</td>\
             <td class=\"topic-cell\">{}</td>\
             <td><code>{}</code><div class=\"info-btn\" data-tooltip=\"{}\">i</div></td>\
             <td class=\"time-cell\">{}</td>\
             <td class=\"questions-cell\">{}</td>\
             <td><input type=\"checkbox\" class=\"checkbox-custom\" data-schedule-id=\"{}\" data-field=\"is_done\"{}></td>\
             <td><input type=\"text\" class=\"remarks-input\" placeholder=\"Add remarks...\" data-schedule-id=\"{}\" data-field=\"remarks\" value=\"{}\"></td>",
            escape_html(&row.date),
            escape_html(&row.topic),
            escape_html(&row.module_code),
            escape_html(&row.tooltip),
            escape_html(&row.time_range),
            row.num_questions,
            id,
            if row.is_done { " checked" } else { "" },
            id,
            escape_html(&row.remarks),
        );
        html.push_str("</tr>");
    }
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
