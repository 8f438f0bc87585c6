use std::fmt;

use crate::model::{BoundingBox, Sample};

/// Static attributes of a vessel, read off its first sample.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselMetadata {
    pub mmsi: String,
    pub imo: Option<String>,
    pub call_sign: Option<String>,
    pub vessel_type: Option<String>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub draft: Option<f64>,
    pub cargo: Option<String>,
}

impl VesselMetadata {
    pub fn from_samples(samples: &[Sample]) -> Option<Self> {
        let r = &samples.first()?.report;
        Some(Self {
            mmsi: r.mmsi.clone(),
            imo: r.imo.clone(),
            call_sign: r.call_sign.clone(),
            vessel_type: r.vessel_type.clone(),
            length: r.length,
            width: r.width,
            draft: r.draft,
            cargo: r.cargo.clone(),
        })
    }

    fn rows(&self) -> [(&'static str, String); 8] {
        [
            ("MMSI", self.mmsi.clone()),
            ("IMO", text(&self.imo)),
            ("CallSign", text(&self.call_sign)),
            ("VesselType", text(&self.vessel_type)),
            ("Length", number(self.length)),
            ("Width", number(self.width)),
            ("Draft", number(self.draft)),
            ("Cargo", text(&self.cargo)),
        ]
    }
}

impl fmt::Display for VesselMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, value) in self.rows() {
            writeln!(f, "{:<12}{}", field, value)?;
        }
        Ok(())
    }
}

fn text(v: &Option<String>) -> String {
    v.clone().unwrap_or_else(|| "-".to_string())
}

fn number(v: Option<f64>) -> String {
    v.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Profile note for a vessel taken from the catalogue of ships longer than
/// `min_length` meters.
pub fn profile_text(imo: Option<&str>, min_length: f64) -> String {
    match imo.map(str::trim).filter(|s| !s.is_empty()) {
        None => "No IMO number available to fetch profile.".to_string(),
        Some(imo) => format!(
            "This vessel (IMO: {imo}) is likely a commercial vessel \
             exceeding {min_length} meters.\n\
             You can search this IMO on open databases such as:\n\
             - https://www.marinetraffic.com/\n\
             - https://www.equasis.org/"
        ),
    }
}

/// Every sample of a track, one line each. Missing values are left blank.
pub struct TrackTable<'a>(pub &'a [Sample]);

impl fmt::Display for TrackTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<19}  {:>10}  {:>11}  {:>10}  {:>11}  {:>17}",
            "FormattedTime", "LAT", "LON", "Speed_mps", "TimeDelta_s", "Acceleration_mps2"
        )?;
        for s in self.0 {
            writeln!(
                f,
                "{:<19}  {:>10}  {:>11}  {:>10}  {:>11}  {:>17}",
                s.formatted_time.as_deref().unwrap_or(""),
                cell(s.report.lat, 5),
                cell(s.report.lon, 5),
                cell(s.speed_mps, 3),
                cell(s.elapsed_seconds, 3),
                cell(s.acceleration_mps2, 5),
            )?;
        }
        Ok(())
    }
}

fn cell(v: Option<f64>, precision: usize) -> String {
    v.map(|n| format!("{:.*}", precision, n)).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackSummary {
    pub samples: usize,
    pub positions: usize,
    pub invalid_timestamps: usize,
    /// Mean position, the map centre.
    pub centre: Option<(f64, f64)>,
    pub bounds: Option<BoundingBox>,
    pub first_time: Option<String>,
    pub last_time: Option<String>,
    pub max_speed_mps: Option<f64>,
}

impl TrackSummary {
    pub fn from_samples(samples: &[Sample]) -> Self {
        let mut positions = 0usize;
        let (mut lat_sum, mut lon_sum) = (0.0, 0.0);
        let mut bounds: Option<BoundingBox> = None;

        for (lat, lon) in samples.iter().filter_map(|s| s.report.position()) {
            positions += 1;
            lat_sum += lat;
            lon_sum += lon;
            match bounds.as_mut() {
                Some(b) => b.extend(lat, lon),
                None => bounds = Some(BoundingBox::point(lat, lon)),
            }
        }

        let centre = (positions > 0)
            .then(|| (lat_sum / positions as f64, lon_sum / positions as f64));
        let mut valid_times = samples.iter().filter_map(|s| s.formatted_time.clone());
        let first_time = valid_times.next();
        let last_time = valid_times.last().or_else(|| first_time.clone());

        Self {
            samples: samples.len(),
            positions,
            invalid_timestamps: samples.iter().filter(|s| s.time.is_none()).count(),
            centre,
            bounds,
            first_time,
            last_time,
            max_speed_mps: samples
                .iter()
                .filter_map(|s| s.speed_mps)
                .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v)))),
        }
    }
}

impl fmt::Display for TrackSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "samples: {} ({} with position, {} bad timestamps)",
            self.samples, self.positions, self.invalid_timestamps
        )?;
        match self.centre {
            Some((lat, lon)) => writeln!(f, "map centre: {:.5}, {:.5}", lat, lon)?,
            None => writeln!(f, "No location data available for this vessel.")?,
        }
        if let Some(b) = self.bounds {
            writeln!(
                f,
                "extent: lat {:.5}..{:.5}, lon {:.5}..{:.5}",
                b.min_lat, b.max_lat, b.min_lon, b.max_lon
            )?;
        }
        if let (Some(first), Some(last)) = (&self.first_time, &self.last_time) {
            writeln!(f, "span: {} -> {}", first, last)?;
        }
        if let Some(v) = self.max_speed_mps {
            writeln!(f, "max speed: {:.3} m/s", v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawReport;
    use crate::track;

    fn report(
        ts: &str,
        lat: Option<f64>,
        lon: Option<f64>,
        sog: Option<f64>,
    ) -> RawReport {
        RawReport {
            mmsi: "1".into(),
            timestamp: ts.into(),
            lat,
            lon,
            sog,
            vessel_name: Some("A".into()),
            imo: Some("IMO9811000".into()),
            length: Some(399.9),
            ..Default::default()
        }
    }

    #[test]
    fn profile_without_imo() {
        let none = "No IMO number available to fetch profile.";
        assert_eq!(profile_text(None, 200.0), none);
        assert_eq!(profile_text(Some("  "), 200.0), none);
    }

    #[test]
    fn profile_with_imo_points_to_databases() {
        let text = profile_text(Some("IMO9811000"), 200.0);
        assert!(text.contains("IMO: IMO9811000"));
        assert!(text.contains("exceeding 200 meters"));
        assert!(text.contains("equasis"));
    }

    #[test]
    fn profile_follows_the_length_threshold() {
        let text = profile_text(Some("IMO9811000"), 300.0);
        assert!(text.contains("exceeding 300 meters"));
    }

    #[test]
    fn track_table_has_a_line_per_sample() {
        let samples = track::process(&[
            report("2020-06-27T10:00:00", Some(10.0), Some(20.0), Some(10.0)),
            report("2020-06-27T10:00:05", None, None, None),
            report("N/A", Some(11.0), Some(21.0), None),
        ])
        .unwrap();
        let table = TrackTable(&samples).to_string();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), samples.len() + 1);
        assert!(lines[0].starts_with("FormattedTime"));
        assert!(lines[0].ends_with("Acceleration_mps2"));

        // bad timestamp sorts first: no time, elapsed 0, nothing else derived
        assert!(lines[1].starts_with(&" ".repeat(19)));
        assert!(lines[1].contains("11.00000"));
        assert!(lines[1].trim_end().ends_with("0.000"));

        // follows the bad timestamp, so no elapsed time or acceleration
        assert!(lines[2].starts_with("06/27/2020 10:00:00"));
        assert_eq!(
            lines[2].split_whitespace().collect::<Vec<_>>(),
            vec!["06/27/2020", "10:00:00", "10.00000", "20.00000", "5.144"]
        );

        // no position or speed; elapsed time only
        assert_eq!(
            lines[3].split_whitespace().collect::<Vec<_>>(),
            vec!["06/27/2020", "10:00:05", "5.000"]
        );
        assert!(!table.contains("None"));
    }

    #[test]
    fn summary_centres_on_mean_position() {
        let samples = track::process(&[
            report("2020-06-27T10:00:00", Some(10.0), Some(20.0), Some(10.0)),
            report("2020-06-27T10:10:00", Some(12.0), Some(22.0), Some(14.0)),
            report("2020-06-27T10:20:00", None, Some(99.0), None),
            report("junk", None, None, None),
        ])
        .unwrap();
        let summary = TrackSummary::from_samples(&samples);

        assert_eq!(summary.samples, 4);
        assert_eq!(summary.positions, 2);
        assert_eq!(summary.invalid_timestamps, 1);
        assert_eq!(summary.centre, Some((11.0, 21.0)));
        assert_eq!(summary.bounds.unwrap().max_lon, 22.0);
        assert_eq!(summary.first_time.as_deref(), Some("06/27/2020 10:00:00"));
        assert_eq!(summary.last_time.as_deref(), Some("06/27/2020 10:20:00"));
        assert_eq!(summary.max_speed_mps, Some(14.0 * 0.514444));
    }

    #[test]
    fn summary_without_positions_says_so() {
        let only = report("2020-06-27T10:00:00", None, None, None);
        let samples = track::process(&[only]).unwrap();
        let summary = TrackSummary::from_samples(&samples);
        assert_eq!(summary.centre, None);
        assert!(summary.to_string().contains("No location data"));
    }

    #[test]
    fn metadata_comes_from_first_sample() {
        let only = report("2020-06-27T10:00:00", None, None, None);
        let samples = track::process(&[only]).unwrap();
        let meta = VesselMetadata::from_samples(&samples).unwrap();
        assert_eq!(meta.imo.as_deref(), Some("IMO9811000"));
        assert!(meta.to_string().contains("Length      399.9"));
        assert!(VesselMetadata::from_samples(&[]).is_none());
    }
}
