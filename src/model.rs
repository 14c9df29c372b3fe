use std::path::{Path, PathBuf};

use chrono::NaiveDate;

/// Columns every dataset must carry. Names are exact and case-sensitive.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "MMSI",
    "SOG",
    "LATITUDE",
    "LONGITUDE",
    "DATE",
    "HOUR",
    "SPEED_ANOMALY",
];

// Raw row as it sits in the cleaned AIS export. Every field stays text here so
// that validation can report the offending value verbatim.
//1.	MMSI				MMSI number of vessel
//2.	SOG				Speed over ground in knots
//3.	LATITUDE			Latitude of message report (e.g. 57.8794)
//4.	LONGITUDE			Longitude of message report (e.g. 17.9125)
//5.	DATE				Calendar date of the report
//6.	HOUR				Hour of day, 0-23
//7.	SPEED_ANOMALY			0/1 label from the upstream detector
// example: 305484000,6.8,56.134323,11.474578,2017-06-23,0,0
#[derive(Debug, serde::Deserialize)]
pub(crate) struct RawRecord {
    #[serde(rename = "MMSI")]
    pub mmsi: String,
    #[serde(rename = "SOG")]
    pub sog: String,
    #[serde(rename = "LATITUDE")]
    pub latitude: String,
    #[serde(rename = "LONGITUDE")]
    pub longitude: String,
    #[serde(rename = "DATE")]
    pub date: String,
    #[serde(rename = "HOUR")]
    pub hour: String,
    #[serde(rename = "SPEED_ANOMALY")]
    pub speed_anomaly: String,
}

/// One validated AIS position report.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct VesselReport {
    #[serde(rename = "MMSI")]
    pub mmsi: u64,
    /// Knots, never negative.
    #[serde(rename = "SOG")]
    pub sog: f64,
    #[serde(rename = "LATITUDE")]
    pub latitude: f64,
    #[serde(rename = "LONGITUDE")]
    pub longitude: f64,
    #[serde(rename = "DATE")]
    pub date: NaiveDate,
    #[serde(rename = "HOUR")]
    pub hour: u8,
    #[serde(rename = "SPEED_ANOMALY", serialize_with = "flag_as_int")]
    pub speed_anomaly: bool,
}

fn flag_as_int<S: serde::Serializer>(flag: &bool, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u8(u8::from(*flag))
}

/// A fully loaded dataset. Row order is file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    source: PathBuf,
    reports: Vec<VesselReport>,
}

impl Dataset {
    pub fn new(source: impl Into<PathBuf>, reports: Vec<VesselReport>) -> Self {
        Self {
            source: source.into(),
            reports,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn reports(&self) -> &[VesselReport] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}
