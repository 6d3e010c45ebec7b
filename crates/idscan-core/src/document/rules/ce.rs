//! Cédula de extranjería (CE) rules.
//!
//! CE certificates print the issue date year-first and numerically
//! (`YYYY/MM/DD`); the month is stored by name like the other types.
//! Whether a certificate window is synthesized, and from which day, is
//! decided by [`CeValidityAnchor`].

use chrono::NaiveDate;

use super::dates::{add_days, calendar_date, month_name};
use super::patterns::{CE_ISSUE_DATE, CE_NAME, CE_NUMBER, LABELED_NAME};
use super::{capture_name, capture_number, missing, DocumentFields, Result, TypeExtractor};
use crate::error::ExtractionError;
use crate::models::{CeValidityAnchor, DocumentType, IssueDate};

/// Foreign-resident card rule set.
#[derive(Debug, Clone, Copy)]
pub struct CeRules {
    anchor: CeValidityAnchor,
    window_days: i64,
}

impl CeRules {
    /// Create CE rules with the given window anchor and length.
    pub fn new(anchor: CeValidityAnchor, window_days: i64) -> Self {
        Self { anchor, window_days }
    }
}

impl Default for CeRules {
    fn default() -> Self {
        Self::new(CeValidityAnchor::None, 30)
    }
}

impl TypeExtractor for CeRules {
    fn document_type(&self) -> DocumentType {
        DocumentType::Ce
    }

    fn extract(&self, text: &str, today: NaiveDate) -> Result<Option<DocumentFields>> {
        let Some(document_number) = capture_number(&CE_NUMBER, text) else {
            return missing(DocumentType::Ce, "document number");
        };
        let Some(issue) = CE_ISSUE_DATE.captures(text) else {
            return missing(DocumentType::Ce, "issue date");
        };

        let (year, month, day) = (&issue[1], &issue[2], &issue[3]);
        let month_number: u32 = month.parse().map_err(|_| ExtractionError::Parse {
            field: "issue month".to_string(),
            value: month.to_string(),
        })?;
        let month_label = month_name(month_number).ok_or_else(|| ExtractionError::Parse {
            field: "issue month".to_string(),
            value: month.to_string(),
        })?;

        let valid_until = match self.anchor {
            CeValidityAnchor::None => None,
            CeValidityAnchor::IssueDate => {
                let issued_on = calendar_date(year, month_number, day)?;
                Some(add_days(issued_on, self.window_days)?)
            }
            CeValidityAnchor::ProcessingTime => Some(add_days(today, self.window_days)?),
        };

        Ok(Some(DocumentFields {
            document_number,
            holder_name: capture_name(&[&CE_NAME, &LABELED_NAME], text),
            issue: IssueDate {
                day: day.to_string(),
                month: month_label.to_string(),
                year: year.to_string(),
            },
            valid_until,
        }))
    }
}
