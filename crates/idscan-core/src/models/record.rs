//! Extraction record produced for each recognized identity document.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

/// Sentinel written for values that could not be extracted or computed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Identity document types recognized by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Cédula de ciudadanía (citizenship card).
    #[serde(rename = "CC")]
    Cc,
    /// Tarjeta de identidad (identity card).
    #[serde(rename = "TI")]
    Ti,
    /// Permiso por protección temporal (temporary-protection permit).
    #[serde(rename = "PPT")]
    Ppt,
    /// Cédula de extranjería (foreign-resident card).
    #[serde(rename = "CE")]
    Ce,
    /// Text matched no known signature.
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl DocumentType {
    /// Short code used in exports.
    pub fn code(&self) -> &'static str {
        match self {
            DocumentType::Cc => "CC",
            DocumentType::Ti => "TI",
            DocumentType::Ppt => "PPT",
            DocumentType::Ce => "CE",
            DocumentType::Unknown => "UNKNOWN",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, DocumentType::Unknown)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Validity judgment attached to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    /// Valid beyond the alert threshold.
    Vigente,
    /// Valid, but expiring within the alert threshold.
    PorVencer,
    /// Already expired.
    Vencido,
    /// Extracted without a validity judgment.
    Extraido,
}

impl RecordStatus {
    /// Label as written in exported spreadsheets.
    pub fn label(&self) -> &'static str {
        match self {
            RecordStatus::Vigente => "VIGENTE",
            RecordStatus::PorVencer => "POR VENCER",
            RecordStatus::Vencido => "VENCIDO",
            RecordStatus::Extraido => "EXTRAÍDO",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whole days left until expiry, or the `N/A` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaysRemaining {
    Days(i64),
    NotApplicable,
}

impl fmt::Display for DaysRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaysRemaining::Days(days) => write!(f, "{}", days),
            DaysRemaining::NotApplicable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for DaysRemaining {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DaysRemaining::Days(days) => serializer.serialize_i64(*days),
            DaysRemaining::NotApplicable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// Issue date exactly as printed on the document.
///
/// Kept as three strings because documents render it inconsistently
/// (numeric vs. spelled month, year-first vs. day-first ordering).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueDate {
    /// Day of month as captured.
    pub day: String,
    /// Localized month name, title case (e.g. "Enero").
    pub month: String,
    /// Four-digit year as captured.
    pub year: String,
}

/// Structured data extracted from one identity document.
///
/// Records are built once by the field extractor and never mutated; the
/// fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionRecord {
    document_type: DocumentType,
    document_number: String,
    holder_name: String,
    issue_day: String,
    issue_month_name: String,
    issue_year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    valid_until: Option<NaiveDate>,
    days_remaining: DaysRemaining,
    status: RecordStatus,
    source_filename: String,
}

impl ExtractionRecord {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        document_type: DocumentType,
        document_number: String,
        holder_name: String,
        issue: IssueDate,
        valid_until: Option<NaiveDate>,
        days_remaining: DaysRemaining,
        status: RecordStatus,
        source_filename: String,
    ) -> Self {
        debug_assert!(!document_number.is_empty());
        Self {
            document_type,
            document_number,
            holder_name,
            issue_day: issue.day,
            issue_month_name: issue.month,
            issue_year: issue.year,
            valid_until,
            days_remaining,
            status,
            source_filename,
        }
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// Digits only, separators stripped. Never empty.
    pub fn document_number(&self) -> &str {
        &self.document_number
    }

    /// Holder name, or [`NOT_AVAILABLE`] when no name pattern matched.
    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn issue_day(&self) -> &str {
        &self.issue_day
    }

    pub fn issue_month_name(&self) -> &str {
        &self.issue_month_name
    }

    pub fn issue_year(&self) -> &str {
        &self.issue_year
    }

    pub fn valid_until(&self) -> Option<NaiveDate> {
        self.valid_until
    }

    pub fn days_remaining(&self) -> DaysRemaining {
        self.days_remaining
    }

    pub fn status(&self) -> RecordStatus {
        self.status
    }

    pub fn source_filename(&self) -> &str {
        &self.source_filename
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_remaining_serializes_sentinel() {
        assert_eq!(serde_json::to_string(&DaysRemaining::Days(-3)).unwrap(), "-3");
        assert_eq!(
            serde_json::to_string(&DaysRemaining::NotApplicable).unwrap(),
            "\"N/A\""
        );
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&RecordStatus::PorVencer).unwrap(),
            "\"POR_VENCER\""
        );
        assert_eq!(RecordStatus::Extraido.label(), "EXTRAÍDO");
    }

    #[test]
    fn test_document_type_codes() {
        assert_eq!(DocumentType::Ppt.to_string(), "PPT");
        assert_eq!(serde_json::to_string(&DocumentType::Ce).unwrap(), "\"CE\"");
        assert!(!DocumentType::Unknown.is_known());
    }
}
