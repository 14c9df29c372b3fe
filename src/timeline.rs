use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::VesselReport;

/// One vessel position on the animated map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    #[serde(rename = "MMSI")]
    pub mmsi: u64,
    #[serde(rename = "LATITUDE")]
    pub latitude: f64,
    #[serde(rename = "LONGITUDE")]
    pub longitude: f64,
    #[serde(rename = "SPEED_ANOMALY")]
    pub speed_anomaly: bool,
}

/// All positions reported during one hour of day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourFrame {
    #[serde(rename = "HOUR")]
    pub hour: u8,
    pub points: Vec<MapPoint>,
}

/// Group reports by hour. Frames come out in ascending hour, points within a
/// frame in file order. Hours with no reports get no frame.
pub fn hourly_frames(records: &[VesselReport]) -> Vec<HourFrame> {
    let mut by_hour: BTreeMap<u8, Vec<MapPoint>> = BTreeMap::new();
    for r in records {
        by_hour.entry(r.hour).or_default().push(MapPoint {
            mmsi: r.mmsi,
            latitude: r.latitude,
            longitude: r.longitude,
            speed_anomaly: r.speed_anomaly,
        });
    }
    by_hour
        .into_iter()
        .map(|(hour, points)| HourFrame { hour, points })
        .collect()
}
