//! Content-signature classification of identity document text.

use regex::Regex;

use super::rules::patterns::{CC_SIGNATURE, CE_SIGNATURE, PPT_SIGNATURE, TI_SIGNATURE};
use crate::models::DocumentType;

/// A marker phrase that identifies one document type.
#[derive(Debug, Clone)]
pub struct Signature {
    pub document_type: DocumentType,
    pub pattern: Regex,
}

/// Ordered signature list; the first matching signature wins.
#[derive(Debug, Clone)]
pub struct DocumentClassifier {
    signatures: Vec<Signature>,
}

impl DocumentClassifier {
    /// Classifier with the built-in CC, TI, PPT, CE signatures, in that order.
    pub fn new() -> Self {
        let signatures = [
            (DocumentType::Cc, &*CC_SIGNATURE),
            (DocumentType::Ti, &*TI_SIGNATURE),
            (DocumentType::Ppt, &*PPT_SIGNATURE),
            (DocumentType::Ce, &*CE_SIGNATURE),
        ]
        .into_iter()
        .map(|(document_type, pattern)| Signature {
            document_type,
            pattern: pattern.clone(),
        })
        .collect();

        Self { signatures }
    }

    /// Append a signature with the lowest priority.
    pub fn with_signature(mut self, document_type: DocumentType, pattern: Regex) -> Self {
        self.signatures.push(Signature { document_type, pattern });
        self
    }

    /// Classify text. Never fails: unmatched text is [`DocumentType::Unknown`].
    pub fn classify(&self, text: &str) -> DocumentType {
        self.signatures
            .iter()
            .find(|signature| signature.pattern.is_match(text))
            .map(|signature| signature.document_type)
            .unwrap_or(DocumentType::Unknown)
    }
}

impl Default for DocumentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify text with the built-in signatures.
pub fn classify(text: &str) -> DocumentType {
    DocumentClassifier::new().classify(text)
}
