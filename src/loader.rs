use std::fs::File;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};

use crate::error::{FormatKind, ReportError, Result};
use crate::model::{Dataset, RawRecord, VesselReport, REQUIRED_COLUMNS};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%d/%m/%Y %H:%M:%S"];

/// Read and validate a whole dataset from a CSV file.
///
/// The header is checked before any row is read, so a missing column is
/// always reported as a format error even if the rows themselves are bad.
pub fn load(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|e| ReportError::format(path, e))?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Fields)
        .from_reader(file);

    let headers = rdr
        .headers()
        .map_err(|e| ReportError::format(path, e))?
        .clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(ReportError::format(path, FormatKind::MissingHeader));
    }
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ReportError::format(path, FormatKind::MissingColumn(column)));
        }
    }

    let mut reports = Vec::new();
    for (idx, result) in rdr.deserialize::<RawRecord>().enumerate() {
        let raw = result.map_err(|e| ReportError::format(path, e))?;
        let report = validate(&raw).map_err(|(column, value, reason)| ReportError::Validation {
            path: path.to_path_buf(),
            row: idx + 1,
            column,
            value,
            reason,
        })?;
        reports.push(report);
    }

    if reports.is_empty() {
        warn!("{} has a header but no records", path.display());
    }
    info!("{} has {} records loaded.", path.display(), reports.len());

    Ok(Dataset::new(path, reports))
}

type FieldError = (&'static str, String, String);

fn validate(raw: &RawRecord) -> std::result::Result<VesselReport, FieldError> {
    let mmsi = parse_mmsi(&raw.mmsi).map_err(|reason| ("MMSI", raw.mmsi.clone(), reason))?;
    let sog = parse_bounded(&raw.sog, 0.0, f64::INFINITY)
        .map_err(|reason| ("SOG", raw.sog.clone(), reason))?;
    let latitude = parse_bounded(&raw.latitude, -90.0, 90.0)
        .map_err(|reason| ("LATITUDE", raw.latitude.clone(), reason))?;
    let longitude = parse_bounded(&raw.longitude, -180.0, 180.0)
        .map_err(|reason| ("LONGITUDE", raw.longitude.clone(), reason))?;
    let date = parse_date(&raw.date).map_err(|reason| ("DATE", raw.date.clone(), reason))?;
    let hour = parse_hour(&raw.hour).map_err(|reason| ("HOUR", raw.hour.clone(), reason))?;
    let speed_anomaly = parse_flag(&raw.speed_anomaly)
        .map_err(|reason| ("SPEED_ANOMALY", raw.speed_anomaly.clone(), reason))?;

    Ok(VesselReport {
        mmsi,
        sog,
        latitude,
        longitude,
        date,
        hour,
        speed_anomaly,
    })
}

fn require(value: &str) -> std::result::Result<&str, String> {
    if value.is_empty() {
        Err("value is missing".to_string())
    } else {
        Ok(value)
    }
}

fn parse_mmsi(value: &str) -> std::result::Result<u64, String> {
    require(value)?
        .parse::<u64>()
        .map_err(|_| "not a vessel identifier".to_string())
}

/// Finite float within `[low, high]`.
fn parse_bounded(value: &str, low: f64, high: f64) -> std::result::Result<f64, String> {
    let v = require(value)?
        .parse::<f64>()
        .map_err(|_| "not a number".to_string())?;
    if !v.is_finite() {
        return Err("not a finite number".to_string());
    }
    if v < low || v > high {
        return Err(if high.is_infinite() {
            format!("must be at least {low}")
        } else {
            format!("must be within [{low}, {high}]")
        });
    }
    Ok(v)
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    let value = require(value)?;
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            TIMESTAMP_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|ts| ts.date())
        })
        .ok_or_else(|| "not a calendar date".to_string())
}

fn parse_hour(value: &str) -> std::result::Result<u8, String> {
    let hour = require(value)?
        .parse::<i64>()
        .map_err(|_| "not an integer".to_string())?;
    match u8::try_from(hour) {
        Ok(h) if h <= 23 => Ok(h),
        _ => Err("must be within [0, 23]".to_string()),
    }
}

fn parse_flag(value: &str) -> std::result::Result<bool, String> {
    match require(value)? {
        "1" => Ok(true),
        "0" => Ok(false),
        other if other.eq_ignore_ascii_case("true") => Ok(true),
        other if other.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err("must be 0 or 1".to_string()),
    }
}
