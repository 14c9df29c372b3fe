pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod report;
pub mod timeline;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, Command};
use log::debug;
use rayon::prelude::*;

pub use cache::DatasetCache;
pub use error::{FormatKind, ReportError};
pub use filter::{filter_anomalies, AnomalyRow};
pub use loader::load;
pub use metrics::{histogram, summarize, Histogram, Metrics, DEFAULT_BINS};
pub use model::{Dataset, VesselReport, REQUIRED_COLUMNS};
pub use report::{Report, ReportOptions};
pub use timeline::{hourly_frames, HourFrame, MapPoint};

#[derive(Debug)]
pub struct Config {
    paths: Vec<PathBuf>,
    options: ReportOptions,
    json: bool,
}

pub fn command() -> Command {
    Command::new("deep-sea-report")
        .version("0.1")
        .about("summarize AIS speed anomaly datasets [csv]")
        .arg(
            Arg::new("paths")
                .short('f')
                .long("file-path")
                .action(ArgAction::Append)
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("dataset file to summarize"),
        )
        .arg(
            Arg::new("bins")
                .long("bins")
                .default_value("40")
                .value_parser(value_parser!(u32).range(1..))
                .help("number of speed histogram bins"),
        )
        .arg(
            Arg::new("limit")
                .long("limit")
                .default_value("30")
                .value_parser(value_parser!(usize))
                .help("anomaly rows to list"),
        )
        .arg(
            Arg::new("all")
                .long("all")
                .action(ArgAction::SetTrue)
                .conflicts_with("limit")
                .help("list every anomaly row"),
        )
        .arg(
            Arg::new("preview")
                .long("preview")
                .default_value("50")
                .value_parser(value_parser!(usize))
                .help("dataset rows to preview"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("print reports as JSON"),
        )
}

pub fn get_arg() -> Result<Config> {
    config_from(command().get_matches())
}

fn config_from(matches: clap::ArgMatches) -> Result<Config> {
    let paths = matches
        .get_many::<PathBuf>("paths")
        .unwrap_or_default()
        .cloned()
        .collect::<Vec<PathBuf>>();

    let defaults = ReportOptions::default();
    let options = ReportOptions {
        bins: matches
            .get_one::<u32>("bins")
            .map_or(defaults.bins, |&b| b as usize),
        anomaly_limit: if matches.get_flag("all") {
            None
        } else {
            matches.get_one::<usize>("limit").copied()
        },
        preview_rows: matches
            .get_one::<usize>("preview")
            .copied()
            .unwrap_or(defaults.preview_rows),
    };

    Ok(Config {
        paths,
        options,
        json: matches.get_flag("json"),
    })
}

pub fn run(config: Config) -> Result<()> {
    debug!("config is {:?}", config);

    let cache = DatasetCache::new();
    let reports = config
        .paths
        .par_iter()
        .map(|path| process_file(&cache, path, &config.options))
        .collect::<Result<Vec<Report>>>()?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    Ok(())
}

pub fn process_file(cache: &DatasetCache, path: &Path, options: &ReportOptions) -> Result<Report> {
    let dataset = cache.get_or_load(path)?;
    Ok(Report::build(&dataset, options))
}

fn print_report(report: &Report) {
    let m = &report.metrics;
    println!("== {}", report.source.display());
    println!("total records:   {}", m.total);
    println!("unique vessels:  {}", m.unique_vessels);
    println!("speed anomalies: {}", m.anomaly_count);

    println!();
    println!("speed over ground (knots):");
    for (i, count) in report.histogram.counts.iter().enumerate() {
        println!(
            "  {:>8.2} - {:<8.2} {}",
            report.histogram.edges[i],
            report.histogram.edges[i + 1],
            count
        );
    }

    println!();
    println!("hours with traffic: {}", report.frames.len());

    println!();
    println!("total anomalies detected: {}", m.anomaly_count);
    println!("MMSI,SOG,LATITUDE,LONGITUDE,DATE,HOUR");
    for row in &report.anomalies {
        println!(
            "{},{},{},{},{},{}",
            row.mmsi, row.sog, row.latitude, row.longitude, row.date, row.hour
        );
    }
    println!();
}
