//! Common regex patterns for identity document extraction.
//!
//! All patterns are case-insensitive and accept both accented and unaccented
//! spellings of the marker phrases (e.g. "Cédula"/"Cedula").

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Classification signatures, checked in this order
    pub static ref CC_SIGNATURE: Regex = Regex::new(
        r"(?i)c[eé]dula\s+de\s+ciudadan[ií]a"
    ).unwrap();

    pub static ref TI_SIGNATURE: Regex = Regex::new(
        r"(?i)n[uú]mero\s+[uú]nico\s+de\s+identificaci[oó]n\s+personal"
    ).unwrap();

    pub static ref PPT_SIGNATURE: Regex = Regex::new(
        r"(?i)permiso\s+por\s+protecci[oó]n\s+temporal|\bPPT\b|\bRUMV\b"
    ).unwrap();

    pub static ref CE_SIGNATURE: Regex = Regex::new(
        r"(?i)c[eé]dula\s+de\s+extranjer[ií]a"
    ).unwrap();

    // Cédula de ciudadanía
    pub static ref CC_NUMBER: Regex = Regex::new(
        r"(?i)c[eé]dula\s+de\s+ciudadan[ií]a\s*:\s*(\d[\d.,]*)"
    ).unwrap();

    pub static ref CC_ISSUE_DATE: Regex = Regex::new(
        r"(?i)fecha\s+de\s+expedici[oó]n\s*:\s*(\d{1,2})\s+de\s+([a-z]+)\s+de\s+(\d{4})"
    ).unwrap();

    pub static ref CC_EXPIRY: Regex = Regex::new(
        r"(?i)v[aá]lida\s+en\s+todo\s+el\s+territorio\s+nacional\s+hasta\s+el\s+(\d{1,2})\s+de\s+([a-z]+)\s+de\s+(\d{4})"
    ).unwrap();

    pub static ref CC_NAME: Regex = Regex::new(
        r"(?i)a\s+nombre\s+de\s*:[ \t]*(?:\r?\n[ \t]*)?([A-ZÁÉÍÓÚÑÜ][A-ZÁÉÍÓÚÑÜ \t]*?)[ \t]*(?:\r?\n|estado|$)"
    ).unwrap();

    // Tarjeta de identidad
    pub static ref TI_NUMBER: Regex = Regex::new(
        r"(?i)n[uú]mero\s+[uú]nico\s+de\s+identificaci[oó]n\s+personal\s*:?\s*(\d[\d.,]*)"
    ).unwrap();

    pub static ref TI_ISSUE_DATE: Regex = Regex::new(
        r"(?i)\bel\s+(\d{1,2})\s+de\s+([a-z]+)\s+de\s+(\d{4})"
    ).unwrap();

    pub static ref TI_NAME: Regex = Regex::new(
        r"(?is)certifica\s+que\s+una\s+vez\s+consultado.*?,\s+([A-ZÁÉÍÓÚÑÜ][A-ZÁÉÍÓÚÑÜ\s]*?)\s+tiene\s+inscrito"
    ).unwrap();

    // Permiso por protección temporal
    pub static ref PPT_NUMBER: Regex = Regex::new(
        r"(?i)\b(?:PPT|RUMV)\s*(?:n[uú]mero|no\.)?\s*:?\s*(\d[\d.,]*)"
    ).unwrap();

    pub static ref PPT_ISSUE_DATE: Regex = Regex::new(
        r"(?i)a\s+los\s+(\d{1,2})\s+d[ií]as\s+del\s+mes\s+de\s+([a-z]+)\s+de\s+(\d{4})"
    ).unwrap();

    pub static ref PPT_NAME: Regex = Regex::new(
        r"(?i)el\s+migrante\s+venezolano\s+([A-ZÁÉÍÓÚÑÜ][A-ZÁÉÍÓÚÑÜ\s]*?)\s+surti[oó]"
    ).unwrap();

    // Cédula de extranjería
    pub static ref CE_NUMBER: Regex = Regex::new(
        r"(?i)c[eé]dula\s+de\s+extranjer[ií]a\s*:\s*(\d[\d.,]*)"
    ).unwrap();

    pub static ref CE_ISSUE_DATE: Regex = Regex::new(
        r"(?i)fecha\s+de\s+expedici[oó]n\s*:\s*(\d{4})[/\-](\d{1,2})[/\-](\d{1,2})"
    ).unwrap();

    pub static ref CE_NAME: Regex = Regex::new(
        r"(?i)nombres\s+y\s+apellidos[ \t]*:?[ \t]*(?:\r?\n[ \t]*)?([A-ZÁÉÍÓÚÑÜ][A-ZÁÉÍÓÚÑÜ \t]*?)[ \t]*(?:\r?\n|fecha\s+de\s+nacimiento|$)"
    ).unwrap();

    // Generic "label: NAME" fallback shared by every rule set
    pub static ref LABELED_NAME: Regex = Regex::new(
        r"(?i)(?:nombres?\s+y\s+apellidos|nombre\s+completo|titular)\s*:[ \t]*([A-ZÁÉÍÓÚÑÜ][A-ZÁÉÍÓÚÑÜ \t]*?)[ \t]*(?:\r?\n|$)"
    ).unwrap();
}
