//! Command-line front end for the film chart digest.
//!
//! Parses flags, initializes logging, stamps provenance with the local
//! wall clock and runs the pipeline once. Everything below this file is
//! deterministic given the flags and the fetched page.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, ValueEnum};
use digest_core::{CleanPolicy, Provenance, MIN_RATING_FLOOR};
use digest_engine::{
    render_report, ExportOptions, FetchSettings, PageSchema, Pipeline, PipelineConfig,
    ProgressSink, ReportContext, RunOutcome, StageProgress, DEFAULT_CHART_URL,
};
use digest_logging::{digest_debug, digest_info, LogDestination};

/// Timestamp format used for both provenance and the report header.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Parser)]
#[command(name = "digest")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Digest a ranked film chart into a CSV table and a text report", long_about = None)]
struct Cli {
    /// Chart page to digest
    #[arg(long, default_value = DEFAULT_CHART_URL)]
    url: String,

    /// Directory receiving the CSV, report and manifest
    #[arg(long, default_value = "output")]
    out: PathBuf,

    /// CSV filename inside the output directory
    #[arg(long, default_value = "movies_enhanced.csv")]
    csv_name: String,

    /// Report filename inside the output directory
    #[arg(long, default_value = "analysis_report.txt")]
    report_name: String,

    /// Minimum rating a record needs to be kept
    #[arg(long, default_value_t = MIN_RATING_FLOOR)]
    min_rating: f64,

    /// Source label stamped into every record
    #[arg(long, default_value = "Douban Top250")]
    source_label: String,

    /// Analyst attribution printed in the report
    #[arg(long)]
    analyst: Option<String>,

    /// Where log output goes
    #[arg(long, value_enum, default_value = "term")]
    log: LogTarget,

    /// Suppress the report body on stdout
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogTarget {
    /// Write to ./digest.log
    File,
    /// Write to the terminal
    Term,
    /// Write to both
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Term => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

/// Forwards pipeline progress to the log: stage transitions at info,
/// per-chunk download counters at debug.
struct LogSink;

impl ProgressSink for LogSink {
    fn emit(&self, progress: StageProgress) {
        match (progress.bytes, progress.records) {
            (Some(bytes), _) => digest_debug!("downloaded {bytes} bytes"),
            (None, Some(records)) => {
                digest_info!("stage {:?} ({records} records)", progress.stage)
            }
            (None, None) => digest_info!("stage {:?}", progress.stage),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    digest_logging::initialize(cli.log.into());

    let now = Local::now().format(TIMESTAMP_FORMAT).to_string();
    let report_context = ReportContext {
        generated_at: now.clone(),
        analyst: cli.analyst.clone(),
    };

    let config = PipelineConfig {
        chart_url: cli.url.clone(),
        output_dir: cli.out.clone(),
        provenance: Provenance {
            source_label: cli.source_label.clone(),
            collected_at: now,
        },
        fetch: FetchSettings::default(),
        schema: PageSchema::default(),
        clean: CleanPolicy {
            min_rating: cli.min_rating,
        },
        export: ExportOptions {
            csv_filename: cli.csv_name.clone(),
            report_filename: cli.report_name.clone(),
            ..ExportOptions::default()
        },
        report: report_context.clone(),
    };

    let pipeline = Pipeline::new(config).context("invalid digest configuration")?;
    let outcome = pipeline
        .run(&LogSink)
        .with_context(|| format!("digest of {} failed", cli.url))?;

    print_outcome(&outcome);
    if !cli.quiet {
        println!();
        println!("{}", render_report(&outcome.summary, &report_context));
    }

    Ok(())
}

fn print_outcome(outcome: &RunOutcome) {
    println!(
        "Digested {} records ({} dropped below the rating floor)",
        outcome.kept, outcome.dropped
    );
    println!("CSV:      {}", outcome.csv_path.display());
    println!("Report:   {}", outcome.report_path.display());
    if let Some(path) = &outcome.manifest_path {
        println!("Manifest: {}", path.display());
    }
}
