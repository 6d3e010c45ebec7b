//! Data models: extraction records and configuration.

pub mod config;
pub mod record;

pub use config::{BatchConfig, CeValidityAnchor, ExportFormat, ExtractionConfig, IdScanConfig};
pub use record::{DaysRemaining, DocumentType, ExtractionRecord, IssueDate, RecordStatus, NOT_AVAILABLE};
