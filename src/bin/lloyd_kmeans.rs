//! Cluster a comma-delimited text file with Lloyd's k-means.
//!
//! Usage: `lloyd-kmeans data/iris.txt -k 3 --labelled`

#[macro_use]
extern crate log;

use clap::Parser;
use lloyd_kmeans::{
    Dataset, InitStrategy, IterationReport, KMeans, KMeansConfig, LogReporter, Reporter,
    RunStatus, RunSummary,
};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "lloyd-kmeans")]
#[command(about = "Lloyd's k-means clustering of delimited text data", version)]
struct Args {
    /// Input file, one comma-separated observation per line
    input: PathBuf,

    /// Number of clusters
    #[arg(short, long = "clusters", default_value_t = 3)]
    k: usize,

    /// Treat the last field of each line as a ground-truth label and report purity
    #[arg(long, default_value_t = false)]
    labelled: bool,

    /// Initialization strategy (sample-based or bounding-box-random)
    #[arg(long, default_value = "sample-based")]
    init: InitStrategy,

    /// Random seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Maximum number of iterations
    #[arg(long, default_value_t = 300)]
    max_iters: usize,

    /// Keep the input order instead of shuffling before initialization
    #[arg(long, default_value_t = false)]
    no_shuffle: bool,

    /// Write one JSON record per iteration to stdout
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Verbose logging
    #[arg(long, default_value_t = false)]
    debug: bool,
}

/// Writes every report as a JSON line
struct JsonLinesReporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter for JsonLinesReporter<W> {
    fn on_iteration(&mut self, report: &IterationReport) {
        match serde_json::to_string(report) {
            Ok(line) => {
                if let Err(e) = writeln!(self.out, "{}", line) {
                    error!("unable to write report: {}", e);
                }
            }
            Err(e) => error!("unable to serialize report: {}", e),
        }
    }

    fn on_finish(&mut self, summary: &RunSummary) {
        match serde_json::to_string(summary) {
            Ok(line) => {
                if let Err(e) = writeln!(self.out, "{}", line) {
                    error!("unable to write summary: {}", e);
                }
            }
            Err(e) => error!("unable to serialize summary: {}", e),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    pretty_env_logger::formatted_timed_builder()
        .filter_level(level)
        .init();

    info!("params: {:#?}", args);

    let dataset = Dataset::from_path(&args.input, args.labelled)?;
    info!(
        "Loaded {} observations x {} features ({} labels)",
        dataset.len(),
        dataset.dimensions,
        dataset.labels.len()
    );

    let config = KMeansConfig::new(args.k)
        .with_init(args.init)
        .with_seed(args.seed)
        .with_max_iters(args.max_iters)
        .with_shuffle(!args.no_shuffle)
        .with_purity(args.labelled);

    let mut kmeans =
        KMeans::with_config(dataset.dimensions, config).with_label_vocabulary(dataset.labels);

    if args.json {
        let stdout = io::stdout();
        let mut reporter = JsonLinesReporter { out: stdout.lock() };
        kmeans.fit_with_reporter(dataset.observations, &mut reporter)?;
    } else {
        kmeans.fit_with_reporter(dataset.observations, &mut LogReporter)?;
    }

    if kmeans.status() == Some(RunStatus::IterationLimitReached) {
        warn!(
            "no convergence within {} iterations; results are from the last iteration",
            args.max_iters
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lloyd_kmeans::Observation;
    use serde_json::Value;

    fn fit_into_buffer() -> (KMeans, Vec<u8>) {
        let observations = vec![
            Observation::labelled(vec![0.0], "a"),
            Observation::labelled(vec![1.0], "a"),
            Observation::labelled(vec![10.0], "b"),
            Observation::labelled(vec![11.0], "b"),
        ];
        let config = KMeansConfig::new(2).with_shuffle(false).with_purity(true);
        let mut kmeans = KMeans::with_config(1, config);

        let mut reporter = JsonLinesReporter { out: Vec::new() };
        kmeans.fit_with_reporter(observations, &mut reporter).unwrap();
        (kmeans, reporter.out)
    }

    #[test]
    fn test_json_lines_one_record_per_iteration_then_summary() {
        let (kmeans, out) = fit_into_buffer();
        let text = String::from_utf8(out).unwrap();
        let records: Vec<Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(records.len(), kmeans.n_iterations() + 1);

        let first = &records[0];
        assert_eq!(first["iteration"], 1);
        assert_eq!(first["membership_changed"], true);
        let centroids = first["centroids"].as_array().unwrap();
        assert_eq!(centroids.len(), 2);
        assert_eq!(centroids[0]["name"], "cluster 0");
        assert!(centroids[0]["member_count"].is_u64());
        assert!(centroids[0].get("purity").is_some());

        let summary = records.last().unwrap();
        assert_eq!(summary["status"], "converged");
        assert_eq!(summary["iterations"], kmeans.n_iterations());
    }

    #[test]
    fn test_json_lines_final_iteration_is_stable() {
        let (_, out) = fit_into_buffer();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        let last_iteration: Value = serde_json::from_str(lines[lines.len() - 2]).unwrap();
        assert_eq!(last_iteration["membership_changed"], false);
        let counts: Vec<u64> = last_iteration["centroids"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["member_count"].as_u64().unwrap())
            .collect();
        assert_eq!(counts, vec![2, 2]);
    }
}
