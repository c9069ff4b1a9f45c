use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use driftwatch_adapter_data::{CsvBatchSource, CsvReferenceLoader};
use driftwatch_adapter_notification::LogAlertSink;
use driftwatch_adapter_telemetry::RedisCounterStore;
use driftwatch_application::MonitoringEngine;
use driftwatch_domain::{DriftBackend, DriftwatchConfig, MonitoringReport};
use driftwatch_ports::{BatchSourcePort, PortSet, ReferenceLoaderPort};

use crate::bootstrap::statistical_backend;
use crate::output::render_report;

#[derive(Debug, Parser)]
#[command(name = "driftwatch", version, about = "Data drift and schema compliance monitor")]
pub struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, global = true, env = "DRIFTWATCH_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "DRIFTWATCH_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate one batch against a reference and print the report.
    Check(CheckArgs),
    /// Run the monitoring loop from configuration.
    Run,
}

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Reference CSV.
    #[arg(long)]
    pub reference: PathBuf,

    /// Current batch CSV.
    #[arg(long)]
    pub current: PathBuf,

    /// Override the configured drift threshold.
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Skip the statistical backend.
    #[arg(long)]
    pub mean_shift: bool,

    /// Only evaluate the last N rows of the current batch.
    #[arg(long)]
    pub sample_rows: Option<usize>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn check(config: &DriftwatchConfig, args: &CheckArgs) -> Result<()> {
    let report = evaluate_once(config, args)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

/// One cycle with log-only alerting and no metrics export.
pub fn evaluate_once(config: &DriftwatchConfig, args: &CheckArgs) -> Result<MonitoringReport> {
    let mut config = config.clone();
    if let Some(threshold) = args.threshold {
        config.drift.threshold = threshold;
    }
    if args.mean_shift {
        config.drift.backend = DriftBackend::MeanShift;
    }
    config.validate()?;

    let mut ports = PortSet::empty().with_alerts(Arc::new(LogAlertSink));
    if let Some(url) = &config.counters.redis_url {
        ports = ports.with_counters(Arc::new(RedisCounterStore::open(url, config.io.timeout())?));
    }

    let engine = MonitoringEngine::from_config(&config, ports, statistical_backend(&config));
    let reference = CsvReferenceLoader
        .load_reference(&args.reference)
        .context("failed to load reference data")?;
    engine.set_reference(reference);

    let batch = CsvBatchSource::new(&args.current)
        .with_sample_rows(args.sample_rows)
        .fetch_current_batch()
        .context("failed to load current data")?;
    Ok(engine.run_cycle(&batch))
}
