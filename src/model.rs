use chrono::NaiveDateTime;

pub const COL_VESSEL_NAME: &str = "VesselName";
pub const COL_TIMESTAMP: &str = "BaseDateTime";
pub const COL_SOG: &str = "SOG";
pub const COL_LAT: &str = "LAT";
pub const COL_LON: &str = "LON";

/// Columns a dataset must carry for the track processor to run at all.
pub const REQUIRED_COLUMNS: [&str; 5] =
    [COL_VESSEL_NAME, COL_TIMESTAMP, COL_SOG, COL_LAT, COL_LON];

/// Knots to meters per second.
pub const KNOTS_TO_MPS: f64 = 0.514444;

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
// NOAA MarineCadastre daily export, one broadcast per row:
// MMSI,BaseDateTime,LAT,LON,SOG,COG,Heading,VesselName,IMO,CallSign,VesselType,Status,Length,Width,Draft,Cargo,TransceiverClass
// example: 367390380,2020-06-27T00:00:00,29.93845,-89.93016,0.0,281.8,511.0,MARY LOU,,WDE4356,31,5.0,20.0,7.0,2.9,31,A
pub struct RawReport {
    #[serde(rename = "MMSI", default)]
    pub mmsi: String,
    #[serde(rename = "BaseDateTime")]
    pub timestamp: String,
    #[serde(rename = "LAT", default, deserialize_with = "csv::invalid_option")]
    pub lat: Option<f64>,
    #[serde(rename = "LON", default, deserialize_with = "csv::invalid_option")]
    pub lon: Option<f64>,
    #[serde(rename = "SOG", default, deserialize_with = "csv::invalid_option")]
    pub sog: Option<f64>,
    #[serde(rename = "COG", default, deserialize_with = "csv::invalid_option")]
    pub cog: Option<f64>,
    #[serde(rename = "Heading", default, deserialize_with = "csv::invalid_option")]
    pub heading: Option<f64>,
    #[serde(rename = "VesselName", default)]
    pub vessel_name: Option<String>,
    #[serde(rename = "IMO", default)]
    pub imo: Option<String>,
    #[serde(rename = "CallSign", default)]
    pub call_sign: Option<String>,
    #[serde(rename = "VesselType", default)]
    pub vessel_type: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
    #[serde(rename = "Length", default, deserialize_with = "csv::invalid_option")]
    pub length: Option<f64>,
    #[serde(rename = "Width", default, deserialize_with = "csv::invalid_option")]
    pub width: Option<f64>,
    #[serde(rename = "Draft", default, deserialize_with = "csv::invalid_option")]
    pub draft: Option<f64>,
    #[serde(rename = "Cargo", default)]
    pub cargo: Option<String>,
    #[serde(rename = "TransceiverClass", default)]
    pub transceiver_class: Option<String>,
}

impl RawReport {
    /// Vessel name with surrounding whitespace removed, `None` when blank.
    pub fn name(&self) -> Option<&str> {
        self.vessel_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// One report after the kinematic pass. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub report: RawReport,
    pub time: Option<NaiveDateTime>,
    pub formatted_time: Option<String>,
    pub display_name: String,
    pub speed_mps: Option<f64>,
    pub elapsed_seconds: Option<f64>,
    pub acceleration_mps2: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn point(lat: f64, lon: f64) -> Self {
        Self {
            min_lat: lat,
            min_lon: lon,
            max_lat: lat,
            max_lon: lon,
        }
    }

    pub fn extend(&mut self, lat: f64, lon: f64) {
        self.min_lat = self.min_lat.min(lat);
        self.min_lon = self.min_lon.min(lon);
        self.max_lat = self.max_lat.max(lat);
        self.max_lon = self.max_lon.max(lon);
    }
}
