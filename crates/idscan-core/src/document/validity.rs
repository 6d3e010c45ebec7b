//! Days-remaining and status computation.

use chrono::NaiveDate;

use crate::models::{DaysRemaining, ExtractionConfig, RecordStatus};

/// Judges a validity date against "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityPolicy {
    /// Inclusive upper bound of the POR_VENCER band, in days.
    pub alert_threshold_days: i64,
    /// Status for records with no validity date.
    pub no_expiry_status: RecordStatus,
}

impl ValidityPolicy {
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            alert_threshold_days: config.alert_threshold_days,
            no_expiry_status: config.no_expiry_status,
        }
    }

    /// Days remaining and status for an optional validity date.
    pub fn assess(&self, valid_until: Option<NaiveDate>, today: NaiveDate) -> (DaysRemaining, RecordStatus) {
        match valid_until {
            Some(date) => {
                let days = (date - today).num_days();
                (DaysRemaining::Days(days), self.status_for(days))
            }
            None => (DaysRemaining::NotApplicable, self.no_expiry_status),
        }
    }

    /// negative -> VENCIDO, 0..=threshold -> POR_VENCER, above -> VIGENTE.
    pub fn status_for(&self, days_remaining: i64) -> RecordStatus {
        if days_remaining < 0 {
            RecordStatus::Vencido
        } else if days_remaining <= self.alert_threshold_days {
            RecordStatus::PorVencer
        } else {
            RecordStatus::Vigente
        }
    }
}

impl Default for ValidityPolicy {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_bands() {
        let policy = ValidityPolicy::default();

        assert_eq!(policy.status_for(-1), RecordStatus::Vencido);
        assert_eq!(policy.status_for(0), RecordStatus::PorVencer);
        assert_eq!(policy.status_for(30), RecordStatus::PorVencer);
        assert_eq!(policy.status_for(31), RecordStatus::Vigente);
    }

    #[test]
    fn test_assess_counts_whole_days() {
        let policy = ValidityPolicy::default();
        let today = date(2024, 6, 1);

        assert_eq!(
            policy.assess(Some(date(2024, 7, 1)), today),
            (DaysRemaining::Days(30), RecordStatus::PorVencer)
        );
        assert_eq!(
            policy.assess(Some(date(2024, 7, 2)), today),
            (DaysRemaining::Days(31), RecordStatus::Vigente)
        );
        assert_eq!(
            policy.assess(Some(date(2024, 5, 31)), today),
            (DaysRemaining::Days(-1), RecordStatus::Vencido)
        );
    }

    #[test]
    fn test_assess_without_date_uses_configured_default() {
        let today = date(2024, 6, 1);

        assert_eq!(
            ValidityPolicy::default().assess(None, today),
            (DaysRemaining::NotApplicable, RecordStatus::Extraido)
        );

        let policy = ValidityPolicy {
            alert_threshold_days: 30,
            no_expiry_status: RecordStatus::Vigente,
        };
        assert_eq!(
            policy.assess(None, today),
            (DaysRemaining::NotApplicable, RecordStatus::Vigente)
        );
    }
}
