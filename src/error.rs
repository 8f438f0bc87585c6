use std::path::PathBuf;

use thiserror::Error;

/// Structural failures. Row-level defects never show up here; they become
/// missing values on the affected sample.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("dataset is missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<&'static str> },

    #[error("reports are not scoped to one vessel: expected {expected:?}, found {found:?}")]
    MixedVessels { expected: String, found: String },

    #[error("no vessel named {0:?} in the catalogue")]
    UnknownVessel(String),

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, TrackError>;
