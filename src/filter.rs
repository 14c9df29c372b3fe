use chrono::NaiveDate;
use serde::Serialize;

use crate::model::VesselReport;

/// Flagged records in file order, cut to the first `limit` when one is given.
pub fn filter_anomalies(records: &[VesselReport], limit: Option<usize>) -> Vec<&VesselReport> {
    records
        .iter()
        .filter(|r| r.speed_anomaly)
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Row of the anomaly table: `MMSI, SOG, LATITUDE, LONGITUDE, DATE, HOUR`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyRow {
    #[serde(rename = "MMSI")]
    pub mmsi: u64,
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
}

impl From<&VesselReport> for AnomalyRow {
    fn from(r: &VesselReport) -> Self {
        Self {
            mmsi: r.mmsi,
            sog: r.sog,
            latitude: r.latitude,
            longitude: r.longitude,
            date: r.date,
            hour: r.hour,
        }
    }
}
