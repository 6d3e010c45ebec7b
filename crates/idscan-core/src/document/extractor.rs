//! Registry of per-type rule sets producing [`ExtractionRecord`]s.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::classifier::DocumentClassifier;
use super::rules::{CcRules, CeRules, DocumentFields, PptRules, TiRules, TypeExtractor};
use super::validity::ValidityPolicy;
use crate::clock::{Clock, SystemClock};
use crate::models::{DocumentType, ExtractionConfig, ExtractionRecord, NOT_AVAILABLE};

/// Classifies document text and runs the matching rule set.
///
/// Rule sets are keyed by document type; registering a rule set for a type
/// replaces the previous one. Extraction is a pure function of the text,
/// the file name and the clock's date.
pub struct FieldExtractor {
    classifier: DocumentClassifier,
    rules: HashMap<DocumentType, Box<dyn TypeExtractor>>,
    policy: ValidityPolicy,
    clock: Arc<dyn Clock>,
}

impl FieldExtractor {
    /// Extractor with the four built-in rule sets and the system clock.
    pub fn new(config: &ExtractionConfig) -> Self {
        let mut extractor = Self {
            classifier: DocumentClassifier::new(),
            rules: HashMap::new(),
            policy: ValidityPolicy::from_config(config),
            clock: Arc::new(SystemClock),
        };

        extractor.register(Box::new(CcRules));
        extractor.register(Box::new(TiRules));
        extractor.register(Box::new(PptRules::new(config.certificate_window_days)));
        extractor.register(Box::new(CeRules::new(
            config.ce_validity_anchor,
            config.certificate_window_days,
        )));

        extractor
    }

    /// Replace the clock used for "today".
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replace the document classifier.
    pub fn with_classifier(mut self, classifier: DocumentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Register a rule set under its own document type.
    pub fn register(&mut self, rules: Box<dyn TypeExtractor>) {
        self.rules.insert(rules.document_type(), rules);
    }

    pub fn classify(&self, text: &str) -> DocumentType {
        self.classifier.classify(text)
    }

    /// Classify `text` and extract a record from it.
    pub fn extract_document(&self, text: &str, filename: &str) -> Option<ExtractionRecord> {
        let document_type = self.classify(text);
        if !document_type.is_known() {
            debug!("{}: no document signature matched", filename);
            return None;
        }
        self.extract(text, filename, document_type)
    }

    /// Extract a record for an already classified document.
    ///
    /// Returns `None` when no rule set is registered for the type, when a
    /// required field is missing, or when a matched value cannot be
    /// interpreted; the last case is logged as a warning.
    pub fn extract(
        &self,
        text: &str,
        filename: &str,
        document_type: DocumentType,
    ) -> Option<ExtractionRecord> {
        let rules = self.rules.get(&document_type)?;
        let today = self.clock.today();

        match rules.extract(text, today) {
            Ok(Some(fields)) => Some(self.build_record(document_type, fields, filename, today)),
            Ok(None) => {
                debug!("{}: {} rules found no complete record", filename, document_type);
                None
            }
            Err(e) => {
                warn!("{}: failed to extract {} data: {}", filename, document_type, e);
                None
            }
        }
    }

    fn build_record(
        &self,
        document_type: DocumentType,
        fields: DocumentFields,
        filename: &str,
        today: chrono::NaiveDate,
    ) -> ExtractionRecord {
        let (days_remaining, status) = self.policy.assess(fields.valid_until, today);

        ExtractionRecord::new(
            document_type,
            fields.document_number,
            fields.holder_name.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            fields.issue,
            fields.valid_until,
            days_remaining,
            status,
            filename.to_string(),
        )
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}
