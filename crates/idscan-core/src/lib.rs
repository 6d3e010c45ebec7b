//! Core library for identity document extraction.
//!
//! This crate provides:
//! - Document text sources (PDF via lopdf/pdf-extract, plain text)
//! - Classification of CC, TI, PPT and CE certificates by content signature
//! - Per-type field extraction and validity status computation
//! - Batch orchestration over folders and ZIP archives with CSV/JSON export

pub mod batch;
pub mod clock;
pub mod document;
pub mod error;
pub mod models;
pub mod pdf;

pub use batch::{BatchOrchestrator, BatchPhase, BatchReport, NoopObserver, ProgressObserver, UnitOutcome};
pub use clock::{Clock, FixedClock, SystemClock};
pub use document::{classify, DocumentClassifier, FieldExtractor, TypeExtractor, ValidityPolicy};
pub use error::{BatchError, ExtractionError, IdScanError, PdfError, Result};
pub use models::{
    DaysRemaining, DocumentType, ExportFormat, ExtractionRecord, IdScanConfig, RecordStatus,
};
pub use pdf::{FileTextSource, PdfExtractor, PdfProcessor, TextSource};
