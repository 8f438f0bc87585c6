use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const DISPLAY_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

static NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
];

/// Parses a raw AIS timestamp. Returns `None` for anything unrecognised;
/// callers treat that as the invalid marker.
pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn format(time: &NaiveDateTime) -> String {
    time.format(DISPLAY_FORMAT).to_string()
}

/// Seconds from `from` to `to`, microsecond resolution. Spans too large for
/// microseconds fall back to milliseconds.
pub fn seconds_between(from: &NaiveDateTime, to: &NaiveDateTime) -> f64 {
    let delta = *to - *from;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => delta.num_milliseconds() as f64 / 1000.0,
    }
}
