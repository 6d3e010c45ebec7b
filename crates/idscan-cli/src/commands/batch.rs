//! Batch command - process every folder and archive under a root.

use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::error;

use idscan_core::batch::{ProgressObserver, UnitOutcome};
use idscan_core::models::ExportFormat;
use idscan_core::BatchReport;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Batch root; each folder and ZIP archive directly inside is one unit
    #[arg(required = true)]
    root: PathBuf,

    /// Format of the per-unit files inside the bundle (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<ArtifactFormat>,

    /// Reference date for validity calculations (YYYY-MM-DD, default: today)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Print the run report as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ArtifactFormat {
    /// One CSV sheet per unit
    Csv,
    /// One JSON array per unit
    Json,
}

impl From<ArtifactFormat> for ExportFormat {
    fn from(format: ArtifactFormat) -> Self {
        match format {
            ArtifactFormat::Csv => ExportFormat::Csv,
            ArtifactFormat::Json => ExportFormat::Json,
        }
    }
}

/// Forwards orchestrator notifications to a progress bar.
struct BarObserver {
    bar: ProgressBar,
}

impl ProgressObserver for BarObserver {
    fn on_progress(&self, percent: f64) {
        self.bar.set_position(percent.round() as u64);
    }

    fn on_status(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if let Some(format) = args.format {
        config.batch.export_format = format.into();
    }

    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")?
            .progress_chars("=>-"),
    );

    let observer = BarObserver { bar: bar.clone() };
    let root = args.root.clone();
    let today = args.today;

    // The run is blocking file I/O; keep it off the async runtime
    let result = tokio::task::spawn_blocking(move || {
        let orchestrator = super::build_orchestrator(&config, today);
        orchestrator.run(&root, &observer)
    })
    .await?;

    let report = match result {
        Ok(report) => {
            bar.finish_and_clear();
            report
        }
        Err(e) => {
            bar.abandon();
            error!("Batch over {} failed: {}", args.root.display(), e);
            return Err(e.into());
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report, start);
    }

    Ok(())
}

fn print_summary(report: &BatchReport, start: Instant) {
    println!(
        "{} Processed {} units in {:?}",
        style("✓").green(),
        report.total_units,
        start.elapsed()
    );
    println!(
        "   {} exported, {} skipped, {} failed ({} records)",
        style(report.exported()).green(),
        style(report.skipped()).yellow(),
        style(report.failed()).red(),
        report.records()
    );

    if !report.units.is_empty() {
        println!();
    }
    for unit in &report.units {
        match &unit.outcome {
            UnitOutcome::Exported { records, .. } => {
                println!("  {} {} -> {} ({} records)", style("✓").green(), unit.name, unit.label, records)
            }
            UnitOutcome::Skipped { reason } => {
                println!("  {} {}: {}", style("-").yellow(), unit.name, reason)
            }
            UnitOutcome::Failed { error } => {
                println!("  {} {}: {}", style("✗").red(), unit.name, error)
            }
        }
    }

    println!();
    match &report.bundle {
        Some(bundle) => println!("{} Results: {}", style("✓").green(), bundle.display()),
        None => println!("{} No results to bundle", style("ℹ").blue()),
    }
}
