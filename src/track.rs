//! Per-vessel kinematic derivation.
//!
//! [`process`] turns one vessel's raw reports into samples ordered by time,
//! each carrying speed in m/s, seconds since the previous sample, and
//! acceleration. Bad rows never abort the pass: an unparseable timestamp or
//! a missing SOG only blanks the fields that depend on it.
//!
//! Acceleration is `Δspeed / elapsed`, except that an elapsed time of exactly
//! zero is replaced by a divisor of 1. That value has no physical meaning.
//! It is kept so the derived columns match previously exported files.

use log::{debug, warn};

use crate::error::{Result, TrackError};
use crate::model::{RawReport, Sample, KNOTS_TO_MPS};
use crate::timestamp;

/// Builds the ordered sample sequence for a single vessel.
///
/// Output has the same length as `reports`. Reports are stable-sorted by
/// parsed time with unparseable timestamps first. Fails only when the input
/// holds more than one vessel name.
pub fn process(reports: &[RawReport]) -> Result<Vec<Sample>> {
    check_single_vessel(reports)?;

    let mut timed: Vec<_> = reports
        .iter()
        .map(|r| (timestamp::parse(&r.timestamp), r))
        .collect();
    // `None < Some(_)`, so invalid timestamps lead. sort_by_key is stable.
    timed.sort_by_key(|(t, _)| *t);

    let invalid = timed.iter().filter(|(t, _)| t.is_none()).count();
    if invalid > 0 {
        warn!("{} of {} reports have unparseable timestamps", invalid, reports.len());
    }

    let mut samples: Vec<Sample> = Vec::with_capacity(timed.len());
    for (time, report) in timed {
        let speed_mps = speed_mps(report.sog);
        let (elapsed_seconds, acceleration_mps2) = match samples.last() {
            None => (Some(0.0), time.and(first_acceleration(speed_mps))),
            Some(prev) => {
                let elapsed = match (prev.time, time) {
                    (Some(a), Some(b)) => Some(timestamp::seconds_between(&a, &b)),
                    _ => None,
                };
                (elapsed, acceleration(prev.speed_mps, speed_mps, elapsed))
            }
        };

        samples.push(Sample {
            report: report.clone(),
            time,
            formatted_time: time.as_ref().map(timestamp::format),
            display_name: report.name().unwrap_or_default().to_lowercase(),
            speed_mps,
            elapsed_seconds,
            acceleration_mps2,
        });
    }

    debug!("processed {} samples", samples.len());
    Ok(samples)
}

pub fn speed_mps(sog_knots: Option<f64>) -> Option<f64> {
    sog_knots.map(|k| k * KNOTS_TO_MPS)
}

/// Zero elapsed time (duplicate timestamps) divides by 1 instead.
pub fn acceleration(prev: Option<f64>, current: Option<f64>, elapsed: Option<f64>) -> Option<f64> {
    let (prev, current, elapsed) = (prev?, current?, elapsed?);
    let divisor = if elapsed == 0.0 { 1.0 } else { elapsed };
    Some((current - prev) / divisor)
}

// No predecessor: prior speed counts as 0 and elapsed is 0, so divisor 1.
// Only applied when the first sample has a valid timestamp.
fn first_acceleration(speed: Option<f64>) -> Option<f64> {
    acceleration(Some(0.0), speed, Some(0.0))
}

fn check_single_vessel(reports: &[RawReport]) -> Result<()> {
    let mut names = reports.iter().filter_map(RawReport::name);
    let Some(expected) = names.next() else {
        return Ok(());
    };
    let expected_key = expected.to_lowercase();
    match names.find(|n| n.to_lowercase() != expected_key) {
        Some(found) => Err(TrackError::MixedVessels {
            expected: expected.to_string(),
            found: found.to_string(),
        }),
        None => Ok(()),
    }
}
