//! Configuration structures for extraction and batch processing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::record::RecordStatus;
use crate::error::{IdScanError, Result};

/// Main configuration for the idscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdScanConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Batch orchestration configuration.
    pub batch: BatchConfig,
}

/// Where the certificate window of a foreign-resident card starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CeValidityAnchor {
    /// No window; the record carries no validity date.
    #[default]
    None,
    /// Window starts at the issue date printed on the document.
    IssueDate,
    /// Window starts on the day the document is processed.
    ProcessingTime,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Days before expiry at which a record turns POR_VENCER.
    pub alert_threshold_days: i64,

    /// Length of the synthesized certificate window (PPT, anchored CE).
    pub certificate_window_days: i64,

    /// Anchor for the CE certificate window.
    pub ce_validity_anchor: CeValidityAnchor,

    /// Status given to records whose validity cannot be computed.
    pub no_expiry_status: RecordStatus,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            alert_threshold_days: 30,
            certificate_window_days: 30,
            ce_validity_anchor: CeValidityAnchor::None,
            no_expiry_status: RecordStatus::Extraido,
        }
    }
}

/// Format of the per-unit artifact files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Batch orchestration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// File extensions treated as archive units (without the dot).
    pub archive_extensions: Vec<String>,

    /// File extensions treated as documents inside a unit.
    pub document_extensions: Vec<String>,

    /// File name of the final bundle, created directly under the batch root.
    pub bundle_name: String,

    /// Maximum length of an artifact label, in characters.
    pub max_label_length: usize,

    /// Artifact file format.
    pub export_format: ExportFormat,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            archive_extensions: vec!["zip".to_string()],
            document_extensions: vec!["pdf".to_string(), "txt".to_string()],
            bundle_name: "resultados_extraccion.zip".to_string(),
            max_label_length: 50,
            export_format: ExportFormat::Csv,
        }
    }
}

impl BatchConfig {
    /// Whether a file name ends in one of the archive extensions.
    pub fn is_archive_name(&self, name: &str) -> bool {
        has_extension(name, &self.archive_extensions)
    }

    /// Whether a file name ends in one of the document extensions.
    pub fn is_document_name(&self, name: &str) -> bool {
        has_extension(name, &self.document_extensions)
    }
}

/// Case-insensitive `.ext` suffix match.
pub(crate) fn has_extension(name: &str, extensions: &[String]) -> bool {
    let lower = name.to_lowercase();
    extensions
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext.to_lowercase())))
}

impl IdScanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the pipeline cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.extraction.alert_threshold_days < 0 {
            return Err(IdScanError::Config(
                "extraction.alert_threshold_days must not be negative".to_string(),
            ));
        }
        if self.extraction.certificate_window_days < 0 {
            return Err(IdScanError::Config(
                "extraction.certificate_window_days must not be negative".to_string(),
            ));
        }
        if self.batch.max_label_length == 0 {
            return Err(IdScanError::Config(
                "batch.max_label_length must be at least 1".to_string(),
            ));
        }
        if self.batch.bundle_name.trim().is_empty() {
            return Err(IdScanError::Config("batch.bundle_name is empty".to_string()));
        }
        Ok(())
    }
}
