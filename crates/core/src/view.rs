//! View model of the schedule page.
//!
//! One `ScheduleView` holds everything a single page view needs: the
//! centre's entries, the caller's progress and the current filter. Filtering
//! and rendering only borrow it.

use crate::filter::{self, FilterState};
use crate::models::progress::{ProgressMap, ProgressRecord, index_progress};
use crate::models::schedule::ScheduleEntry;
use crate::render::{self, NO_RESULTS_MESSAGE, RenderedSchedule};

#[derive(Debug, Clone)]
pub struct ScheduleView {
    centre_name: String,
    entries: Vec<ScheduleEntry>,
    progress: ProgressMap,
    filter: FilterState,
}

impl ScheduleView {
    pub fn new(
        centre_name: impl Into<String>,
        entries: Vec<ScheduleEntry>,
        progress: impl IntoIterator<Item = ProgressRecord>,
    ) -> Self {
        Self {
            centre_name: centre_name.into(),
            entries,
            progress: index_progress(progress),
            filter: FilterState::default(),
        }
    }

    pub fn centre_name(&self) -> &str {
        &self.centre_name
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn progress(&self) -> &ProgressMap {
        &self.progress
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    /// Subject dropdown choices, taken from the unfiltered entries.
    pub fn subjects(&self) -> Vec<String> {
        filter::distinct_subjects(&self.entries)
    }

    pub fn filtered(&self) -> Vec<&ScheduleEntry> {
        filter::filter_entries(&self.entries, &self.filter)
    }

    pub fn render(&self) -> RenderedSchedule {
        let empty_message = if self.entries.is_empty() {
            format!("No sessions scheduled for {}.", self.centre_name)
        } else {
            NO_RESULTS_MESSAGE.to_string()
        };
        render::render_schedule(&self.filtered(), &self.progress, &empty_message)
    }
}
