//! Error types for the idscan-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the idscan library.
#[derive(Error, Debug)]
pub enum IdScanError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Document field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Batch orchestration error.
    #[error("batch error: {0}")]
    Batch(#[from] BatchError),

    /// ZIP archive read or write error.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// CSV export error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a document type the text source can read.
    #[error("unsupported document format: {}", .0.display())]
    UnsupportedDocument(PathBuf),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading text out of PDF files.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to document field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Failed to parse a value.
    #[error("failed to parse {field}: {value}")]
    Parse { field: String, value: String },

    /// A spelled-out month could not be mapped to a calendar month.
    #[error("unknown month name: {0}")]
    UnknownMonth(String),

    /// No document data could be extracted.
    #[error("no document data found")]
    NoData,
}

/// Errors raised while driving a batch run.
#[derive(Error, Debug)]
pub enum BatchError {
    /// The batch root does not exist or is not a directory.
    #[error("invalid batch root: {}", .0.display())]
    InvalidRoot(PathBuf),

    /// The archive format is not supported by the unpacker.
    #[error("unsupported archive format: {}", .0.display())]
    UnsupportedArchive(PathBuf),

    /// A unit contained no document files.
    #[error("no documents found in {0}")]
    NoDocuments(String),

    /// A unit contained documents but none produced a record.
    #[error("no valid records extracted from {0}")]
    NoRecords(String),

    /// Bundling the per-unit artifacts failed.
    #[error("aggregation failed: {0}")]
    Aggregation(String),
}

impl BatchError {
    /// Whether this error aborts the whole run rather than a single unit.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BatchError::InvalidRoot(_) | BatchError::Aggregation(_))
    }
}

/// Result type for the idscan library.
pub type Result<T> = std::result::Result<T, IdScanError>;
