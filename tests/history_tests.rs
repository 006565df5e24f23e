// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the recent-filters list

use chrono::{Duration, Local};
use filter_camera::FilterType;
use filter_camera::history::FilterHistory;

#[test]
fn test_selection_sequence_keeps_five_most_recent() {
    use FilterType::*;

    let mut history = FilterHistory::new();
    for filter in [Sepia, Blur, Sepia, Neon, Warm, Cool, Sketch] {
        history.record_selection(filter);
    }

    let order: Vec<FilterType> = history.recent().map(|entry| entry.filter).collect();
    assert_eq!(order, vec![Sketch, Cool, Warm, Neon, Sepia]);
}

#[test]
fn test_rows_show_names_and_ages() {
    let now = Local::now();
    let mut history = FilterHistory::new();
    history.record_selection_at(FilterType::Red, now - Duration::hours(3));
    history.record_selection_at(FilterType::Vintage, now - Duration::seconds(90));
    history.record_selection_at(FilterType::Standard, now);

    assert_eq!(
        history.rows(now),
        vec![
            ("No Filter", "just now".to_string()),
            ("Vintage", "1 min ago".to_string()),
            ("Red Tint", "3 hours ago".to_string()),
        ]
    );
}

#[test]
fn test_reselecting_refreshes_timestamp() {
    let now = Local::now();
    let mut history = FilterHistory::new();
    history.record_selection_at(FilterType::Blur, now - Duration::minutes(10));
    history.record_selection_at(FilterType::Blur, now);

    assert_eq!(history.len(), 1);
    assert_eq!(history.rows(now)[0].1, "just now");
}
