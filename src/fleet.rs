use std::collections::BTreeSet;

use crate::error::{Result, TrackError};
use crate::model::RawReport;

/// Used when `--min-length` is not given.
pub const DEFAULT_MIN_LENGTH: f64 = 200.0;

/// Sorted, de-duplicated names of vessels longer than `min_length` meters.
pub fn long_vessel_names(reports: &[RawReport], min_length: f64) -> Vec<String> {
    reports
        .iter()
        .filter(|r| matches!(r.length, Some(len) if len > min_length))
        .filter_map(RawReport::name)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Every report whose vessel name matches `name`, ignoring case. Input order
/// is kept.
pub fn select_vessel(reports: &[RawReport], name: &str) -> Vec<RawReport> {
    let key = name.trim().to_lowercase();
    reports
        .iter()
        .filter(|r| r.name().map(str::to_lowercase).as_deref() == Some(key.as_str()))
        .cloned()
        .collect()
}

/// Maps a user query onto a catalogue entry.
pub fn resolve_name<'a>(names: &'a [String], query: &str) -> Result<&'a str> {
    let key = query.trim().to_lowercase();
    names
        .iter()
        .find(|n| n.to_lowercase() == key)
        .map(String::as_str)
        .ok_or_else(|| TrackError::UnknownVessel(query.trim().to_string()))
}
