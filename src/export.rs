use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Result, TrackError};
use crate::model::Sample;

#[derive(Debug, serde::Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "MMSI")]
    mmsi: &'a str,
    #[serde(rename = "BaseDateTime")]
    timestamp: &'a str,
    #[serde(rename = "LAT")]
    lat: Option<f64>,
    #[serde(rename = "LON")]
    lon: Option<f64>,
    #[serde(rename = "SOG")]
    sog: Option<f64>,
    #[serde(rename = "COG")]
    cog: Option<f64>,
    #[serde(rename = "Heading")]
    heading: Option<f64>,
    #[serde(rename = "VesselName")]
    vessel_name: Option<&'a str>,
    #[serde(rename = "IMO")]
    imo: Option<&'a str>,
    #[serde(rename = "CallSign")]
    call_sign: Option<&'a str>,
    #[serde(rename = "VesselType")]
    vessel_type: Option<&'a str>,
    #[serde(rename = "Status")]
    status: Option<&'a str>,
    #[serde(rename = "Length")]
    length: Option<f64>,
    #[serde(rename = "Width")]
    width: Option<f64>,
    #[serde(rename = "Draft")]
    draft: Option<f64>,
    #[serde(rename = "Cargo")]
    cargo: Option<&'a str>,
    #[serde(rename = "TransceiverClass")]
    transceiver_class: Option<&'a str>,
    #[serde(rename = "FormattedTime")]
    formatted_time: Option<&'a str>,
    #[serde(rename = "DisplayName")]
    display_name: &'a str,
    #[serde(rename = "Speed_mps")]
    speed_mps: Option<f64>,
    #[serde(rename = "TimeDelta_s")]
    elapsed_seconds: Option<f64>,
    #[serde(rename = "Acceleration_mps2")]
    acceleration_mps2: Option<f64>,
}

impl<'a> From<&'a Sample> for ExportRow<'a> {
    fn from(s: &'a Sample) -> Self {
        let r = &s.report;
        Self {
            mmsi: &r.mmsi,
            timestamp: &r.timestamp,
            lat: r.lat,
            lon: r.lon,
            sog: r.sog,
            cog: r.cog,
            heading: r.heading,
            vessel_name: r.vessel_name.as_deref(),
            imo: r.imo.as_deref(),
            call_sign: r.call_sign.as_deref(),
            vessel_type: r.vessel_type.as_deref(),
            status: r.status.as_deref(),
            length: r.length,
            width: r.width,
            draft: r.draft,
            cargo: r.cargo.as_deref(),
            transceiver_class: r.transceiver_class.as_deref(),
            formatted_time: s.formatted_time.as_deref(),
            display_name: &s.display_name,
            speed_mps: s.speed_mps,
            elapsed_seconds: s.elapsed_seconds,
            acceleration_mps2: s.acceleration_mps2,
        }
    }
}

/// `"Ever Given"` -> `"ever_given"`.
pub fn safe_name(vessel: &str) -> String {
    vessel.trim().to_lowercase().replace(' ', "_")
}

pub fn export_path(dir: &Path, vessel: &str) -> PathBuf {
    dir.join(format!("{}_data.csv", safe_name(vessel)))
}

/// Writes the samples to `<dir>/<safe_name>_data.csv` and returns the path.
pub fn write_samples(dir: &Path, vessel: &str, samples: &[Sample]) -> Result<PathBuf> {
    let path = export_path(dir, vessel);
    let csv_error = |source: csv::Error| TrackError::Csv {
        path: path.clone(),
        source,
    };

    let mut wtr = csv::Writer::from_path(&path).map_err(csv_error)?;
    for sample in samples {
        wtr.serialize(ExportRow::from(sample)).map_err(csv_error)?;
    }
    wtr.flush().map_err(|source| TrackError::Io {
        path: path.clone(),
        source,
    })?;

    info!("saved {} samples to {}", samples.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawReport;
    use crate::track;

    #[test]
    fn safe_name_lowercases_and_underscores() {
        assert_eq!(safe_name(" Ever Given "), "ever_given");
    }

    #[test]
    fn exported_file_carries_derived_columns() {
        let dir = tempfile::tempdir().unwrap();
        let reports = vec![
            RawReport {
                timestamp: "2020-06-27T10:00:00".into(),
                sog: Some(10.0),
                vessel_name: Some("Ever Given".into()),
                ..Default::default()
            },
            RawReport {
                timestamp: "N/A".into(),
                sog: None,
                vessel_name: Some("Ever Given".into()),
                ..Default::default()
            },
        ];
        let samples = track::process(&reports).unwrap();
        let path = write_samples(dir.path(), "Ever Given", &samples).unwrap();
        assert!(path.ends_with("ever_given_data.csv"));

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.get(17), Some("FormattedTime"));
        assert_eq!(headers.get(21), Some("Acceleration_mps2"));

        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        // invalid timestamp leads, with blank derived fields except elapsed 0
        assert_eq!(rows[0].get(1), Some("N/A"));
        assert_eq!(rows[0].get(17), Some(""));
        assert_eq!(rows[0].get(20), Some("0.0"));
        assert_eq!(rows[1].get(17), Some("06/27/2020 10:00:00"));
        assert_eq!(rows[1].get(18), Some("ever given"));
        assert_eq!(rows[1].get(20), Some(""));
    }
}
