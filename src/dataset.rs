use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, info};

use crate::error::{Result, TrackError};
use crate::model::{RawReport, REQUIRED_COLUMNS};

/// Loads every report in the CSV at `path`.
pub fn load_path(path: &Path) -> Result<Vec<RawReport>> {
    let file = File::open(path).map_err(|source| TrackError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reports = load_reader(file).map_err(|e| match e {
        TrackError::Csv { source, .. } => TrackError::Csv {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    info!("{} has {} reports", path.display(), reports.len());
    Ok(reports)
}

/// Loads reports from any reader. Headers and fields are trimmed; numeric
/// fields that fail to parse are read as missing.
pub fn load_reader<R: Read>(reader: R) -> Result<Vec<RawReport>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_error)?.clone();
    check_columns(&headers)?;

    let mut reports = Vec::new();
    for result in rdr.deserialize() {
        let report: RawReport = result.map_err(csv_error)?;
        reports.push(report);
    }
    debug!("loaded {} rows", reports.len());
    Ok(reports)
}

fn check_columns(headers: &csv::StringRecord) -> Result<()> {
    let missing: Vec<&'static str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(TrackError::MissingColumns { missing })
    }
}

fn csv_error(source: csv::Error) -> TrackError {
    TrackError::Csv {
        path: "<reader>".into(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "MMSI,BaseDateTime,LAT,LON,SOG,COG,Heading,VesselName,IMO,CallSign,VesselType,Status,Length,Width,Draft,Cargo,TransceiverClass\n";

    #[test]
    fn reads_noaa_rows() {
        let data = format!(
            "{HEADER}538007561,2020-06-27T00:00:03,25.77,-80.13,12.3,90.1,91.0,OCEAN STAR,IMO9700001,V7AB2,70,0,229.0,32.0,12.1,70,A\n"
        );
        let reports = load_reader(data.as_bytes()).unwrap();
        assert_eq!(reports.len(), 1);
        let r = &reports[0];
        assert_eq!(r.mmsi, "538007561");
        assert_eq!(r.sog, Some(12.3));
        assert_eq!(r.length, Some(229.0));
        assert_eq!(r.imo.as_deref(), Some("IMO9700001"));
        assert_eq!(r.name(), Some("OCEAN STAR"));
    }

    #[test]
    fn non_numeric_fields_become_missing() {
        let data = format!(
            "{HEADER}1,2020-06-27T00:00:03,,-80.13,fast,,,X,,,,,unknown,,,,\n"
        );
        let r = &load_reader(data.as_bytes()).unwrap()[0];
        assert_eq!(r.lat, None);
        assert_eq!(r.sog, None);
        assert_eq!(r.length, None);
        assert_eq!(r.imo, None);
    }

    #[test]
    fn padded_headers_are_trimmed() {
        let data = " VesselName , BaseDateTime , SOG , LAT , LON \n\
                    A,2020-06-27T00:00:00,1.0,2.0,3.0\n";
        let r = &load_reader(data.as_bytes()).unwrap()[0];
        assert_eq!(r.lon, Some(3.0));
        assert_eq!(r.mmsi, "");
    }

    #[test]
    fn missing_required_columns_fail_the_load() {
        let data = "VesselName,LAT\nA,1.0\n";
        match load_reader(data.as_bytes()) {
            Err(TrackError::MissingColumns { missing }) => {
                assert_eq!(missing, vec!["BaseDateTime", "SOG", "LON"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
