//! Tarjeta de identidad (TI) rules. TI certificates carry no expiry.

use chrono::NaiveDate;

use super::patterns::{LABELED_NAME, TI_ISSUE_DATE, TI_NAME, TI_NUMBER};
use super::{capture_name, capture_number, missing, spelled_issue, DocumentFields, Result, TypeExtractor};
use crate::models::DocumentType;

/// Identity card rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct TiRules;

impl TypeExtractor for TiRules {
    fn document_type(&self) -> DocumentType {
        DocumentType::Ti
    }

    fn extract(&self, text: &str, _today: NaiveDate) -> Result<Option<DocumentFields>> {
        let Some(document_number) = capture_number(&TI_NUMBER, text) else {
            return missing(DocumentType::Ti, "document number");
        };
        let Some(issue) = TI_ISSUE_DATE.captures(text) else {
            return missing(DocumentType::Ti, "issue date");
        };

        Ok(Some(DocumentFields {
            document_number,
            holder_name: capture_name(&[&TI_NAME, &LABELED_NAME], text),
            issue: spelled_issue(&issue),
            valid_until: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "La Registraduría Nacional del Estado Civil certifica que una vez consultado \
        el Archivo Nacional de Identificación, SOFIA VALENTINA RUIZ\n\
        TORRES tiene inscrito el siguiente documento:\n\
        Tarjeta de Identidad\n\
        Número Único de Identificación Personal 1098765432\n\
        Expedida el 3 DE FEBRERO DE 2019\n";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_extract_full_sample() {
        let fields = TiRules.extract(SAMPLE, today()).unwrap().unwrap();

        assert_eq!(fields.document_number, "1098765432");
        assert_eq!(fields.holder_name.as_deref(), Some("SOFIA VALENTINA RUIZ TORRES"));
        assert_eq!(fields.issue.day, "3");
        assert_eq!(fields.issue.month, "Febrero");
        assert_eq!(fields.issue.year, "2019");
        assert_eq!(fields.valid_until, None);
    }

    #[test]
    fn test_missing_issue_date_yields_none() {
        let text = SAMPLE.replace("Expedida el 3 DE FEBRERO DE 2019", "");
        assert!(TiRules.extract(&text, today()).unwrap().is_none());
    }

    #[test]
    fn test_missing_name_is_not_fatal() {
        let text = SAMPLE.replace("tiene inscrito", "registra");
        let fields = TiRules.extract(&text, today()).unwrap().unwrap();
        assert_eq!(fields.holder_name, None);
    }
}
