//! Date helpers for Spanish-language identity documents.

use chrono::{Days, NaiveDate};

use super::Result;
use crate::error::ExtractionError;

const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Map a Spanish month name (any case) to its number.
pub fn month_number(name: &str) -> Option<u32> {
    match name.trim().to_lowercase().as_str() {
        "enero" => Some(1),
        "febrero" => Some(2),
        "marzo" => Some(3),
        "abril" => Some(4),
        "mayo" => Some(5),
        "junio" => Some(6),
        "julio" => Some(7),
        "agosto" => Some(8),
        "septiembre" | "setiembre" => Some(9),
        "octubre" => Some(10),
        "noviembre" => Some(11),
        "diciembre" => Some(12),
        _ => None,
    }
}

/// Title-case Spanish name for a month number (1-12).
pub fn month_name(number: u32) -> Option<&'static str> {
    let index = usize::try_from(number).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

/// Upper-case the first character and lower-case the rest ("ENERO" -> "Enero").
pub fn title_case(word: &str) -> String {
    let mut chars = word.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Build a calendar date from captured numeric components.
pub fn calendar_date(year: &str, month: u32, day: &str) -> Result<NaiveDate> {
    let y: i32 = year.parse().map_err(|_| ExtractionError::Parse {
        field: "year".to_string(),
        value: year.to_string(),
    })?;
    let d: u32 = day.parse().map_err(|_| ExtractionError::Parse {
        field: "day".to_string(),
        value: day.to_string(),
    })?;

    NaiveDate::from_ymd_opt(y, month, d).ok_or_else(|| ExtractionError::Parse {
        field: "date".to_string(),
        value: format!("{}-{:02}-{}", year, month, day),
    })
}

/// Build a calendar date from "day, spelled month, year" components.
pub fn spelled_date(day: &str, month: &str, year: &str) -> Result<NaiveDate> {
    let number =
        month_number(month).ok_or_else(|| ExtractionError::UnknownMonth(month.to_string()))?;
    calendar_date(year, number, day)
}

/// Add a fixed number of days to a date.
pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    let overflow = || ExtractionError::Parse {
        field: "validity window".to_string(),
        value: format!("{} + {} days", date, days),
    };
    let days = u64::try_from(days).map_err(|_| overflow())?;
    date.checked_add_days(Days::new(days)).ok_or_else(overflow)
}
