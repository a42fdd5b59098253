//! Canonical year resolution.
//!
//! Records carry their temporal anchor in many shapes: an explicit `year`,
//! one of several event years (fiscal, discovery, conviction, ...), or only a
//! free-text period such as `"2015-2019"`. [`resolve_year`] collapses these
//! into a single year inside [`MIN_YEAR`, `MAX_YEAR`].

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use crate::types::{Record, YearRange};

pub const MIN_YEAR: i32 = 1990;
pub const MAX_YEAR: i32 = 2030;

/// Slider bounds used when a dataset mentions no year at all.
pub const DEFAULT_SPAN: YearRange = YearRange {
    start: 2000,
    end: 2025,
};

static YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{4}").expect("static pattern"));

// ---------------------------------------------------------------------------
// Field priority
// ---------------------------------------------------------------------------

/// Explicit numeric year fields, highest priority first.
fn numeric_fields(record: &Record) -> [Option<i64>; 8] {
    [
        record.year,
        record.fiscal_year,
        record.discovered_year,
        record.discovery_year,
        record.conviction_year,
        record.bankruptcy_year,
        record.shutdown_year,
        record.retirement_year,
    ]
}

/// Free-text period fields, highest priority first.
fn period_fields(record: &Record) -> [Option<&str>; 4] {
    [
        record.period.as_deref(),
        record.fraud_period.as_deref(),
        record.bribery_period.as_deref(),
        record.time_period.as_deref(),
    ]
}

fn in_window(year: i64) -> Option<i32> {
    if year >= MIN_YEAR as i64 && year <= MAX_YEAR as i64 {
        Some(year as i32)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Every 4-digit run in `text` that falls inside the year window, in order.
///
/// Matches are non-overlapping and taken left to right, so `"20151"` yields
/// `2015` and nothing else.
pub fn extract_years(text: &str) -> Vec<i32> {
    YEAR_PATTERN
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<i64>().ok())
        .filter_map(in_window)
        .collect()
}

/// Resolve the single canonical year for a record.
///
/// Numeric fields win over period text. Within a period string the last
/// in-window year is taken, so a range resolves to its end.
pub fn resolve_year(record: &Record) -> Option<i32> {
    if let Some(year) = numeric_fields(record)
        .into_iter()
        .flatten()
        .find_map(in_window)
    {
        return Some(year);
    }

    period_fields(record)
        .into_iter()
        .flatten()
        .find_map(|text| extract_years(text).last().copied())
}

/// Sorted, de-duplicated years mentioned anywhere across the dataset.
///
/// Unlike [`resolve_year`] this looks at every field, not only the winning
/// one, so the year-range control can offer the full span.
pub fn available_years(records: &[Record]) -> Vec<i32> {
    let mut years = BTreeSet::new();
    for record in records {
        years.extend(numeric_fields(record).into_iter().flatten().filter_map(in_window));
        for text in period_fields(record).into_iter().flatten() {
            years.extend(extract_years(text));
        }
    }
    years.into_iter().collect()
}

/// Min/max of [`available_years`], or [`DEFAULT_SPAN`] for a yearless dataset.
pub fn year_span(records: &[Record]) -> YearRange {
    let years = available_years(records);
    match (years.first(), years.last()) {
        (Some(&start), Some(&end)) => YearRange { start, end },
        _ => DEFAULT_SPAN,
    }
}
