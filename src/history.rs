// SPDX-License-Identifier: GPL-3.0-only

//! Recently used filters
//!
//! A short most-recent-first list backing the "recent filters" panel.
//! Re-selecting a filter moves it to the front instead of duplicating it.

use crate::constants::MAX_RECENT_FILTERS;
use crate::filters::FilterType;
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use tracing::debug;

/// One selection in the recent-filters list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterHistoryEntry {
    pub filter: FilterType,
    pub applied_at: DateTime<Local>,
}

impl FilterHistoryEntry {
    /// Relative age of this entry as shown next to the filter name
    pub fn age_label(&self, now: DateTime<Local>) -> String {
        let elapsed = (now - self.applied_at).num_seconds();
        age_label(elapsed)
    }
}

/// Bounded, de-duplicated, most-recent-first filter log
#[derive(Debug, Clone)]
pub struct FilterHistory {
    entries: VecDeque<FilterHistoryEntry>,
    capacity: usize,
}

impl Default for FilterHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterHistory {
    pub fn new() -> Self {
        Self::with_capacity(MAX_RECENT_FILTERS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Record a selection made now
    pub fn record_selection(&mut self, filter: FilterType) {
        self.record_selection_at(filter, Local::now());
    }

    /// Record a selection with an explicit timestamp
    pub fn record_selection_at(&mut self, filter: FilterType, applied_at: DateTime<Local>) {
        self.entries.retain(|entry| entry.filter != filter);
        self.entries.push_front(FilterHistoryEntry { filter, applied_at });
        self.entries.truncate(self.capacity);

        debug!(filter = %filter, len = self.entries.len(), "Recorded filter selection");
    }

    /// Entries, most recent first
    pub fn recent(&self) -> impl Iterator<Item = &FilterHistoryEntry> {
        self.entries.iter()
    }

    /// `(display name, age label)` rows for the recent-filters list
    pub fn rows(&self, now: DateTime<Local>) -> Vec<(&'static str, String)> {
        self.entries
            .iter()
            .map(|entry| (entry.filter.display_name(), entry.age_label(now)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Bucket an elapsed time in whole seconds into a short relative label
///
/// Negative values (clock went backwards) count as "just now".
pub fn age_label(elapsed_secs: i64) -> String {
    match elapsed_secs {
        s if s < 60 => "just now".to_string(),
        s if s < 120 => "1 min ago".to_string(),
        s if s < 3600 => format!("{} mins ago", s / 60),
        s if s < 7200 => "1 hour ago".to_string(),
        s => format!("{} hours ago", s / 3600),
    }
}
