//! Process command - extract records from a document, folder or archive.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Args;
use console::style;
use glob::glob;
use tracing::info;

use idscan_core::batch::write_csv;
use idscan_core::{BatchOrchestrator, ExtractionRecord};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input document (PDF or text), folder or ZIP archive; glob patterns allowed
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Only print the detected document type of each file
    #[arg(long)]
    type_only: bool,

    /// Reference date for validity calculations (YYYY-MM-DD, default: today)
    #[arg(long)]
    today: Option<NaiveDate>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let orchestrator = super::build_orchestrator(&config, args.today);

    let inputs = expand_inputs(&args.input)?;

    if args.type_only {
        for input in &inputs {
            for (name, detected) in classify_input(&orchestrator, input)? {
                println!("{}: {}", name, detected);
            }
        }
        return Ok(());
    }

    let mut records = Vec::new();
    for input in &inputs {
        info!("Processing {}", input.display());
        records.extend(orchestrator.process_input(input)?);
    }

    if records.is_empty() {
        anyhow::bail!("No valid records extracted from {}", args.input);
    }

    let output = format_records(&records, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} records written to {}",
            style("✓").green(),
            records.len(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    Ok(())
}

/// Literal paths pass through; anything else is treated as a glob pattern.
fn expand_inputs(input: &str) -> anyhow::Result<Vec<PathBuf>> {
    let literal = PathBuf::from(input);
    if literal.exists() {
        return Ok(vec![literal]);
    }

    let matches: Vec<PathBuf> = glob(input)?.filter_map(|r| r.ok()).collect();
    if matches.is_empty() {
        anyhow::bail!("Input not found: {}", input);
    }
    Ok(matches)
}

fn classify_input(
    orchestrator: &BatchOrchestrator,
    input: &Path,
) -> anyhow::Result<Vec<(String, String)>> {
    let results = orchestrator.with_documents(input, |documents| {
        documents
            .iter()
            .map(|path| {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                let detected = match orchestrator.text_source().read_text(path) {
                    Ok(text) => orchestrator.extractor().classify(&text).to_string(),
                    Err(e) => format!("error ({})", e),
                };
                (name, detected)
            })
            .collect::<Vec<_>>()
    })?;
    Ok(results)
}

fn format_records(records: &[ExtractionRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)? + "\n"),
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            write_csv(records, &mut buf)?;
            Ok(String::from_utf8(buf)?)
        }
        OutputFormat::Text => Ok(records.iter().map(format_text).collect::<Vec<_>>().join("\n")),
    }
}

fn format_text(record: &ExtractionRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} {}: {}\n",
        record.document_type(),
        record.document_number(),
        record.holder_name()
    ));
    output.push_str(&format!(
        "  Issued:      {} {} {}\n",
        record.issue_day(),
        record.issue_month_name(),
        record.issue_year()
    ));
    if let Some(valid_until) = record.valid_until() {
        output.push_str(&format!(
            "  Valid until: {} ({} days)\n",
            valid_until,
            record.days_remaining()
        ));
    }
    output.push_str(&format!("  Status:      {}\n", record.status()));
    output.push_str(&format!("  Source:      {}\n", record.source_filename()));

    output
}
