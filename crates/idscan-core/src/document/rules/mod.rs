//! Rule sets: one field extractor per identity document type.

pub mod cc;
pub mod ce;
pub mod dates;
pub mod patterns;
pub mod ppt;
pub mod ti;

pub use cc::CcRules;
pub use ce::CeRules;
pub use ppt::PptRules;
pub use ti::TiRules;

use chrono::NaiveDate;
use regex::{Captures, Regex};
use tracing::debug;

use crate::error::ExtractionError;
use crate::models::{DocumentType, IssueDate};

/// Result type for rule evaluation.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Fields pulled out of one document by a rule set, before validity is judged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFields {
    /// Digits only, never empty.
    pub document_number: String,
    /// Normalized holder name, if any name pattern matched.
    pub holder_name: Option<String>,
    /// Issue date as printed.
    pub issue: IssueDate,
    /// Expiry, either read from the text or synthesized by the rule set.
    pub valid_until: Option<NaiveDate>,
}

/// Extraction rules for a single document type.
///
/// `Ok(None)` means a required field did not match and the document yields
/// no record. `Err` means the text matched but could not be interpreted
/// (e.g. an impossible date).
pub trait TypeExtractor: Send + Sync {
    /// The document type these rules handle.
    fn document_type(&self) -> DocumentType;

    /// Run the rules against document text.
    fn extract(&self, text: &str, today: NaiveDate) -> Result<Option<DocumentFields>>;
}

/// Capture group 1 of `pattern` as a digit string, separators stripped.
pub(crate) fn capture_number(pattern: &Regex, text: &str) -> Option<String> {
    let caps = pattern.captures(text)?;
    let digits: String = caps[1].chars().filter(|c| c.is_ascii_digit()).collect();
    (!digits.is_empty()).then_some(digits)
}

/// First non-empty name captured by any of `patterns`, whitespace collapsed.
pub(crate) fn capture_name(patterns: &[&Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| {
        let caps = pattern.captures(text)?;
        let name = normalize_name(&caps[1]);
        (!name.is_empty()).then_some(name)
    })
}

/// Issue date from a "day, spelled month, year" capture (groups 1-3).
pub(crate) fn spelled_issue(caps: &Captures<'_>) -> IssueDate {
    IssueDate {
        day: caps[1].to_string(),
        month: dates::title_case(&caps[2]),
        year: caps[3].to_string(),
    }
}

/// Trim and collapse internal whitespace runs to single spaces.
pub(crate) fn normalize_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Log a required-field miss and yield "no record".
pub(crate) fn missing(document_type: DocumentType, field: &str) -> Result<Option<DocumentFields>> {
    debug!("{} document is missing required field: {}", document_type, field);
    Ok(None)
}
