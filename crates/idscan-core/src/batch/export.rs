//! Per-unit artifact writers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::ArtifactExporter;
use crate::error::Result;
use crate::models::{ExportFormat, ExtractionRecord};

/// Spreadsheet column headers, in column order.
pub const CSV_HEADERS: [&str; 10] = [
    "TIPO DE DOCUMENTO",
    "NUMERO DE DOCUMENTO",
    "NOMBRES Y APELLIDOS",
    "DIA",
    "MES",
    "AÑO",
    "FECHA DE VIGENCIA",
    "DIAS RESTANTES",
    "ESTADO",
    "ARCHIVO ORIGEN",
];

/// Write `records` as CSV (header row included) to any writer.
pub fn write_csv<W: Write>(records: &[ExtractionRecord], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADERS)?;

    for record in records {
        let month = record.issue_month_name().to_uppercase();
        let valid_until = record
            .valid_until()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let days_remaining = record.days_remaining().to_string();

        wtr.write_record([
            record.document_type().code(),
            record.document_number(),
            record.holder_name(),
            record.issue_day(),
            month.as_str(),
            record.issue_year(),
            valid_until.as_str(),
            days_remaining.as_str(),
            record.status().label(),
            record.source_filename(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn artifact_path(output_dir: &Path, label: &str, extension: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", label, extension))
}

/// Writes one CSV file per unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl ArtifactExporter for CsvExporter {
    fn extension(&self) -> &'static str {
        ExportFormat::Csv.extension()
    }

    fn export(&self, records: &[ExtractionRecord], label: &str, output_dir: &Path) -> Result<PathBuf> {
        let path = artifact_path(output_dir, label, self.extension());
        write_csv(records, BufWriter::new(File::create(&path)?))?;
        info!("Exported {} records to {}", records.len(), path.display());
        Ok(path)
    }
}

/// Writes one JSON array file per unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl ArtifactExporter for JsonExporter {
    fn extension(&self) -> &'static str {
        ExportFormat::Json.extension()
    }

    fn export(&self, records: &[ExtractionRecord], label: &str, output_dir: &Path) -> Result<PathBuf> {
        let path = artifact_path(output_dir, label, self.extension());
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.flush()?;
        info!("Exported {} records to {}", records.len(), path.display());
        Ok(path)
    }
}

/// Exporter for a configured format.
pub fn exporter_for(format: ExportFormat) -> Box<dyn ArtifactExporter> {
    match format {
        ExportFormat::Csv => Box::new(CsvExporter),
        ExportFormat::Json => Box::new(JsonExporter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DaysRemaining, DocumentType, IssueDate, RecordStatus};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn records() -> Vec<ExtractionRecord> {
        vec![
            ExtractionRecord::new(
                DocumentType::Cc,
                "79123456".to_string(),
                "PEDRO PABLO LEON".to_string(),
                IssueDate {
                    day: "2".to_string(),
                    month: "Enero".to_string(),
                    year: "2005".to_string(),
                },
                NaiveDate::from_ymd_opt(2024, 7, 1),
                DaysRemaining::Days(30),
                RecordStatus::PorVencer,
                "cc.pdf".to_string(),
            ),
            ExtractionRecord::new(
                DocumentType::Ti,
                "1001002003".to_string(),
                "N/A".to_string(),
                IssueDate {
                    day: "9".to_string(),
                    month: "Mayo".to_string(),
                    year: "2020".to_string(),
                },
                None,
                DaysRemaining::NotApplicable,
                RecordStatus::Extraido,
                "ti.txt".to_string(),
            ),
        ]
    }

    #[test]
    fn test_csv_rows() {
        let mut out = Vec::new();
        write_csv(&records(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "TIPO DE DOCUMENTO,NUMERO DE DOCUMENTO,NOMBRES Y APELLIDOS,DIA,MES,AÑO,FECHA DE VIGENCIA,DIAS RESTANTES,ESTADO,ARCHIVO ORIGEN",
                "CC,79123456,PEDRO PABLO LEON,2,ENERO,2005,2024-07-01,30,POR VENCER,cc.pdf",
                "TI,1001002003,N/A,9,MAYO,2020,,N/A,EXTRAÍDO,ti.txt",
            ]
        );
    }

    #[test]
    fn test_csv_exporter_names_artifact_after_label() {
        let dir = TempDir::new().unwrap();
        let path = CsvExporter.export(&records(), "Lote_1", dir.path()).unwrap();

        assert_eq!(path, dir.path().join("Lote_1.csv"));
        assert!(std::fs::read_to_string(&path).unwrap().contains("PEDRO PABLO LEON"));
    }

    #[test]
    fn test_json_exporter_writes_array() {
        let dir = TempDir::new().unwrap();
        let path = exporter_for(ExportFormat::Json)
            .export(&records(), "A", dir.path())
            .unwrap();

        assert_eq!(path, dir.path().join("A.json"));
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["days_remaining"], "N/A");
    }
}
