//! Document text sources.

mod extractor;

pub use extractor::PdfExtractor;

use std::any::Any;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{IdScanError, PdfError};

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF, pages in document order.
    fn extract_text(&self) -> Result<String>;
}

/// Reads the plain text of a document file.
pub trait TextSource: Send + Sync {
    fn read_text(&self, path: &Path) -> crate::Result<String>;
}

/// Message carried by a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Text source keyed on file extension: `.pdf` through [`PdfExtractor`],
/// `.txt` read verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTextSource;

impl TextSource for FileTextSource {
    fn read_text(&self, path: &Path) -> crate::Result<String> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => {
                let data = fs::read(path)?;
                let mut extractor = PdfExtractor::new();
                extractor.load(&data)?;
                let text = extractor.extract_text()?;
                debug!(
                    "Read {} chars from {} ({} pages)",
                    text.len(),
                    path.display(),
                    extractor.page_count()
                );
                Ok(text)
            }
            Some("txt") => Ok(fs::read_to_string(path)?),
            _ => Err(IdScanError::UnsupportedDocument(path.to_path_buf())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_panic_message_from_payload() {
        let payload = std::panic::catch_unwind(|| -> u8 { panic!("bad font {}", 7) }).unwrap_err();
        assert_eq!(panic_message(&*payload), "bad font 7");

        let payload = std::panic::catch_unwind(|| -> u8 { panic!("static") }).unwrap_err();
        assert_eq!(panic_message(&*payload), "static");
    }

    #[test]
    fn test_reads_text_files_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.TXT");
        fs::write(&path, "Cédula de Ciudadanía: 1\n").unwrap();

        let text = FileTextSource.read_text(&path).unwrap();
        assert_eq!(text, "Cédula de Ciudadanía: 1\n");
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan.png");
        fs::write(&path, [0u8; 4]).unwrap();

        assert!(matches!(
            FileTextSource.read_text(&path),
            Err(IdScanError::UnsupportedDocument(_))
        ));
    }

    #[test]
    fn test_broken_pdf_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"not a pdf").unwrap();

        assert!(matches!(
            FileTextSource.read_text(&path),
            Err(IdScanError::Pdf(PdfError::Parse(_)))
        ));
    }
}
