//! Permiso por protección temporal (PPT) rules.
//!
//! The permit text has no expiry; the certificate is valid for a fixed
//! window counted from its issue date.

use chrono::NaiveDate;

use super::dates::{add_days, spelled_date};
use super::patterns::{LABELED_NAME, PPT_ISSUE_DATE, PPT_NAME, PPT_NUMBER};
use super::{capture_name, capture_number, missing, spelled_issue, DocumentFields, Result, TypeExtractor};
use crate::models::DocumentType;

/// Temporary-protection permit rule set.
#[derive(Debug, Clone, Copy)]
pub struct PptRules {
    window_days: i64,
}

impl PptRules {
    /// Create PPT rules with the given certificate window.
    pub fn new(window_days: i64) -> Self {
        Self { window_days }
    }
}

impl Default for PptRules {
    fn default() -> Self {
        Self::new(30)
    }
}

impl TypeExtractor for PptRules {
    fn document_type(&self) -> DocumentType {
        DocumentType::Ppt
    }

    fn extract(&self, text: &str, _today: NaiveDate) -> Result<Option<DocumentFields>> {
        let Some(document_number) = capture_number(&PPT_NUMBER, text) else {
            return missing(DocumentType::Ppt, "document number");
        };
        let Some(issue) = PPT_ISSUE_DATE.captures(text) else {
            return missing(DocumentType::Ppt, "issue date");
        };

        let issued_on = spelled_date(&issue[1], &issue[2], &issue[3])?;
        let valid_until = add_days(issued_on, self.window_days)?;

        Ok(Some(DocumentFields {
            document_number,
            holder_name: capture_name(&[&PPT_NAME, &LABELED_NAME], text),
            issue: spelled_issue(&issue),
            valid_until: Some(valid_until),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;

    const SAMPLE: &str = "Migración Colombia\n\
        Permiso Por Protección Temporal\n\
        Se certifica que el migrante venezolano CARLOS EDUARDO MENDOZA surtió el proceso de registro.\n\
        PPT número: 4567890\n\
        Dado en Bogotá a los 10 días del mes de enero de 2024\n";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_extract_full_sample() {
        let fields = PptRules::default().extract(SAMPLE, today()).unwrap().unwrap();

        assert_eq!(fields.document_number, "4567890");
        assert_eq!(fields.holder_name.as_deref(), Some("CARLOS EDUARDO MENDOZA"));
        assert_eq!(fields.issue.month, "Enero");
        assert_eq!(fields.valid_until, NaiveDate::from_ymd_opt(2024, 2, 9));
    }

    #[test]
    fn test_rumv_number() {
        let text = SAMPLE.replace("PPT número: 4567890", "RUMV 7.654.321");
        let fields = PptRules::default().extract(&text, today()).unwrap().unwrap();
        assert_eq!(fields.document_number, "7654321");
    }

    #[test]
    fn test_custom_window() {
        let fields = PptRules::new(90).extract(SAMPLE, today()).unwrap().unwrap();
        assert_eq!(fields.valid_until, NaiveDate::from_ymd_opt(2024, 4, 9));
    }

    #[test]
    fn test_unknown_month_is_an_error() {
        let text = SAMPLE.replace("mes de enero", "mes de enerro");
        assert!(matches!(
            PptRules::default().extract(&text, today()),
            Err(ExtractionError::UnknownMonth(_))
        ));
    }

    #[test]
    fn test_missing_number_yields_none() {
        let text = SAMPLE.replace("PPT número: 4567890\n", "");
        assert!(PptRules::default().extract(&text, today()).unwrap().is_none());
    }
}
