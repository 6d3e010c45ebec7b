//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use idscan_core::models::IdScanConfig;
use idscan_core::{BatchOrchestrator, FieldExtractor, FixedClock};

/// `<config_dir>/idscan/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("idscan")
        .join("config.json")
}

/// Config file selected by `--config`, else the default location.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load the configuration, falling back to defaults when no file exists.
///
/// An explicit `--config` file must exist.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<IdScanConfig> {
    if let Some(path) = config_path {
        return Ok(IdScanConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading configuration from {}", path.display());
        Ok(IdScanConfig::from_file(&path)?)
    } else {
        Ok(IdScanConfig::default())
    }
}

/// Orchestrator for `config`, pinned to `today` when given.
pub fn build_orchestrator(config: &IdScanConfig, today: Option<NaiveDate>) -> BatchOrchestrator {
    let orchestrator = BatchOrchestrator::new(config);
    match today {
        Some(date) => orchestrator
            .with_extractor(FieldExtractor::new(&config.extraction).with_clock(FixedClock(date))),
        None => orchestrator,
    }
}
