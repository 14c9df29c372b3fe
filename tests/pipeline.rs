use deep_sea_report::{
    filter_anomalies, histogram, load, summarize, DatasetCache, FormatKind, Report, ReportError,
    ReportOptions, REQUIRED_COLUMNS,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_csv(path: &Path, header: &[&str], rows: &[&str]) {
    let mut out = String::new();
    out.push_str(&header.join(","));
    out.push('\n');
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    fs::write(path, out).unwrap();
}

fn five_rows(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("ais.csv");
    write_csv(
        &path,
        &REQUIRED_COLUMNS,
        &[
            "219000001,14.2,56.10,11.40,2017-06-23,0,1",
            "219000002,8.0,56.20,11.50,2017-06-23,0,0",
            "219000001,15.1,56.15,11.45,2017-06-23,1,1",
            "219000003,0.0,55.90,10.90,2017-06-23,1,0",
            "219000004,22.7,57.00,12.00,2017-06-23,2,1",
        ],
    );
    path
}

#[test]
fn five_row_example() {
    let dir = TempDir::new().unwrap();
    let dataset = load(&five_rows(&dir)).unwrap();
    let records = dataset.reports();

    let metrics = summarize(records);
    assert_eq!(metrics.total, 5);
    assert_eq!(metrics.unique_vessels, 4);
    assert_eq!(metrics.anomaly_count, 3);

    let anomalies = filter_anomalies(records, None);
    assert_eq!(anomalies.len(), metrics.anomaly_count);
    assert_eq!(anomalies[0], &records[0]);
    assert_eq!(anomalies[1], &records[2]);
    assert_eq!(anomalies[2], &records[4]);
}

#[test]
fn loading_twice_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = five_rows(&dir);
    assert_eq!(load(&path).unwrap(), load(&path).unwrap());
}

#[test]
fn extra_columns_are_ignored_and_order_is_free() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wide.csv");
    write_csv(
        &path,
        &["HOUR", "NAME", "SPEED_ANOMALY", "MMSI", "SOG", "LATITUDE", "LONGITUDE", "DATE"],
        &["5,ICE MOON,1,305484000,6.8,56.134323,11.474578,23/06/2017"],
    );
    let dataset = load(&path).unwrap();
    assert_eq!(dataset.len(), 1);
    let r = &dataset.reports()[0];
    assert_eq!(r.mmsi, 305484000);
    assert_eq!(r.hour, 5);
    assert!(r.speed_anomaly);
}

#[test]
fn missing_sog_column_is_a_format_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no_sog.csv");
    // The row is also invalid; the header problem must win.
    write_csv(
        &path,
        &["MMSI", "LATITUDE", "LONGITUDE", "DATE", "HOUR", "SPEED_ANOMALY"],
        &["x,1,1,2020-01-01,99,7"],
    );
    match load(&path).unwrap_err() {
        ReportError::Format {
            kind: FormatKind::MissingColumn(column),
            ..
        } => assert_eq!(column, "SOG"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn column_names_are_case_sensitive() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lower.csv");
    write_csv(
        &path,
        &["mmsi", "SOG", "LATITUDE", "LONGITUDE", "DATE", "HOUR", "SPEED_ANOMALY"],
        &["1,1,1,1,2020-01-01,1,0"],
    );
    assert!(load(&path).unwrap_err().is_format());
}

#[test]
fn padded_column_names_do_not_match() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("padded.csv");
    write_csv(
        &path,
        &[" MMSI ", " SOG ", "LATITUDE", "LONGITUDE", "DATE", "HOUR", "SPEED_ANOMALY"],
        &["1,1.0,1,1,2020-01-01,3,0"],
    );
    assert!(load(&path).unwrap_err().is_format());
}

#[test]
fn padded_values_are_trimmed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("spaced.csv");
    write_csv(&path, &REQUIRED_COLUMNS, &[" 7 , 1.5 ,1,1, 2020-01-01 , 3 , 1 "]);
    let dataset = load(&path).unwrap();
    let r = &dataset.reports()[0];
    assert_eq!(r.mmsi, 7);
    assert_eq!(r.sog, 1.5);
    assert_eq!(r.hour, 3);
    assert!(r.speed_anomaly);
}

#[test]
fn out_of_range_hours_are_validation_errors() {
    let dir = TempDir::new().unwrap();
    for (name, hour) in [("late.csv", "24"), ("early.csv", "-1")] {
        let path = dir.path().join(name);
        let bad = format!("2,1.0,1,1,2020-01-01,{hour},0");
        write_csv(&path, &REQUIRED_COLUMNS, &["1,1.0,1,1,2020-01-01,3,0", bad.as_str()]);
        match load(&path).unwrap_err() {
            ReportError::Validation { row, column, value, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "HOUR");
                assert_eq!(value, hour);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn non_numeric_speed_and_empty_fields_fail() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad_speed.csv");
    write_csv(&path, &REQUIRED_COLUMNS, &["1,fast,1,1,2020-01-01,3,0"]);
    assert!(load(&path).unwrap_err().is_validation());

    let path = dir.path().join("empty_field.csv");
    write_csv(&path, &REQUIRED_COLUMNS, &["1,2.0,,1,2020-01-01,3,0"]);
    assert!(load(&path).unwrap_err().is_validation());
}

#[test]
fn ragged_rows_and_empty_files_are_format_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ragged.csv");
    write_csv(&path, &REQUIRED_COLUMNS, &["1,2.0,1,1,2020-01-01"]);
    assert!(load(&path).unwrap_err().is_format());

    let path = dir.path().join("empty.csv");
    fs::write(&path, "").unwrap();
    assert!(load(&path).unwrap_err().is_format());
}

#[test]
fn header_only_file_is_an_empty_dataset() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("header.csv");
    write_csv(&path, &REQUIRED_COLUMNS, &[]);
    let dataset = load(&path).unwrap();
    assert!(dataset.is_empty());
    assert!(histogram(dataset.reports(), 40).is_empty());
}

#[test]
fn constant_speed_histogram_has_one_bin() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("flat.csv");
    let rows: Vec<String> = (0..10)
        .map(|i| format!("{},12.0,56.0,11.0,2017-06-23,{},0", 100 + i, i))
        .collect();
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    write_csv(&path, &REQUIRED_COLUMNS, &rows);

    let dataset = load(&path).unwrap();
    let h = histogram(dataset.reports(), 40);
    assert_eq!(h.counts, vec![10]);
}

#[test]
fn cached_pipeline_produces_dashboard_report() {
    let dir = TempDir::new().unwrap();
    let path = five_rows(&dir);
    let cache = DatasetCache::new();

    let dataset = cache.get_or_load(&path).unwrap();
    let options = ReportOptions {
        anomaly_limit: Some(2),
        ..ReportOptions::default()
    };
    let report = Report::build(&dataset, &options);

    assert_eq!(report.metrics.anomaly_count, 3);
    assert_eq!(report.anomalies.len(), 2);
    assert_eq!(report.anomalies[1].sog, 15.1);
    assert_eq!(report.preview.len(), 5);
    assert_eq!(report.frames.iter().map(|f| f.hour).collect::<Vec<_>>(), vec![0, 1, 2]);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["metrics"]["unique_vessels"], 4);
    assert_eq!(json["preview"][0]["SPEED_ANOMALY"], 1);
    assert_eq!(json["anomalies"][0]["MMSI"], 219000001u64);
}

#[test]
fn cache_picks_up_a_rewritten_file() {
    let dir = TempDir::new().unwrap();
    let path = five_rows(&dir);
    let cache = DatasetCache::new();
    assert_eq!(cache.get_or_load(&path).unwrap().len(), 5);

    write_csv(&path, &REQUIRED_COLUMNS, &["1,1.0,1,1,2020-01-01,3,0"]);
    // Make the change visible even on filesystems with coarse timestamps.
    let later = std::time::SystemTime::now() + std::time::Duration::from_secs(10);
    fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(later)
        .unwrap();

    assert_eq!(cache.get_or_load(&path).unwrap().len(), 1);
}
