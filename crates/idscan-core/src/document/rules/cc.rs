//! Cédula de ciudadanía (CC) rules.
//!
//! The certificate prints its own expiry ("válida en todo el territorio
//! nacional hasta el ..."), so that phrase is required alongside the
//! number and issue date.

use chrono::NaiveDate;

use super::dates::spelled_date;
use super::patterns::{CC_EXPIRY, CC_ISSUE_DATE, CC_NAME, CC_NUMBER, LABELED_NAME};
use super::{capture_name, capture_number, missing, spelled_issue, DocumentFields, Result, TypeExtractor};
use crate::models::DocumentType;

/// Citizenship card rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct CcRules;

impl TypeExtractor for CcRules {
    fn document_type(&self) -> DocumentType {
        DocumentType::Cc
    }

    fn extract(&self, text: &str, _today: NaiveDate) -> Result<Option<DocumentFields>> {
        let Some(document_number) = capture_number(&CC_NUMBER, text) else {
            return missing(DocumentType::Cc, "document number");
        };
        let Some(issue) = CC_ISSUE_DATE.captures(text) else {
            return missing(DocumentType::Cc, "issue date");
        };
        let Some(expiry) = CC_EXPIRY.captures(text) else {
            return missing(DocumentType::Cc, "expiry");
        };

        let valid_until = spelled_date(&expiry[1], &expiry[2], &expiry[3])?;

        Ok(Some(DocumentFields {
            document_number,
            holder_name: capture_name(&[&CC_NAME, &LABELED_NAME], text),
            issue: spelled_issue(&issue),
            valid_until: Some(valid_until),
        }))
    }
}
