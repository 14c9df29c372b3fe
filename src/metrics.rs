use std::collections::HashSet;

use serde::Serialize;

use crate::model::VesselReport;

/// Bin count used by the speed distribution chart.
pub const DEFAULT_BINS: usize = 40;

/// Headline numbers for the KPI row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub total: usize,
    pub unique_vessels: usize,
    pub anomaly_count: usize,
}

pub fn summarize(records: &[VesselReport]) -> Metrics {
    let unique_vessels = records
        .iter()
        .map(|r| r.mmsi)
        .collect::<HashSet<_>>()
        .len();
    let anomaly_count = records.iter().filter(|r| r.speed_anomaly).count();

    Metrics {
        total: records.len(),
        unique_vessels,
        anomaly_count,
    }
}

/// Equal-width speed histogram. `edges` has one more element than `counts`;
/// bin `i` covers `[edges[i], edges[i + 1])` except the last, which is closed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Bin every speed over ground into `bins` equal-width bins spanning the
/// observed range. `bins == 0` is treated as one bin.
pub fn histogram(records: &[VesselReport], bins: usize) -> Histogram {
    let Some((min, max)) = sog_range(records) else {
        return Histogram {
            edges: Vec::new(),
            counts: Vec::new(),
        };
    };

    if min == max {
        return Histogram {
            edges: vec![min, max],
            counts: vec![records.len()],
        };
    }

    let bins = bins.max(1);
    let width = (max - min) / bins as f64;
    let mut edges: Vec<f64> = (0..bins).map(|i| min + width * i as f64).collect();
    edges.push(max);

    let mut counts = vec![0usize; bins];
    for r in records {
        let idx = ((r.sog - min) / width) as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    Histogram { edges, counts }
}

fn sog_range(records: &[VesselReport]) -> Option<(f64, f64)> {
    records.iter().map(|r| r.sog).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
