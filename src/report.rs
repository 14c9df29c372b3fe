use std::path::PathBuf;

use log::info;
use serde::Serialize;

use crate::filter::{filter_anomalies, AnomalyRow};
use crate::metrics::{histogram, summarize, Histogram, Metrics, DEFAULT_BINS};
use crate::model::{Dataset, VesselReport};
use crate::timeline::{hourly_frames, HourFrame};

/// Sizing knobs for the dashboard's panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub bins: usize,
    /// Rows shown in the anomaly table; `None` shows them all.
    pub anomaly_limit: Option<usize>,
    pub preview_rows: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            anomaly_limit: Some(30),
            preview_rows: 50,
        }
    }
}

/// Every data product the dashboard displays, computed once per load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub source: PathBuf,
    pub metrics: Metrics,
    pub histogram: Histogram,
    pub preview: Vec<VesselReport>,
    pub anomalies: Vec<AnomalyRow>,
    pub frames: Vec<HourFrame>,
}

impl Report {
    pub fn build(dataset: &Dataset, options: &ReportOptions) -> Self {
        let records = dataset.reports();
        let metrics = summarize(records);

        let report = Self {
            source: dataset.source().to_path_buf(),
            metrics,
            histogram: histogram(records, options.bins),
            preview: records.iter().take(options.preview_rows).cloned().collect(),
            anomalies: filter_anomalies(records, options.anomaly_limit)
                .into_iter()
                .map(AnomalyRow::from)
                .collect(),
            frames: hourly_frames(records),
        };

        info!(
            "{}: {} records, {} vessels, {} anomalies",
            dataset.source().display(),
            metrics.total,
            metrics.unique_vessels,
            metrics.anomaly_count
        );
        report
    }
}
