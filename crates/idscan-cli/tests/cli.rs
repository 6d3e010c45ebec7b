use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const CC_TEXT: &str = "Cédula de Ciudadanía: 79.123.456\n\
    Fecha de Expedición: 2 de enero de 2005\n\
    A nombre de: PEDRO PABLO LEON\n\
    válida en todo el territorio nacional hasta el 1 de julio de 2024\n";

const TI_TEXT: &str = "certifica que una vez consultado el archivo, LUCIA MARTINEZ tiene inscrito\n\
    Número Único de Identificación Personal 1001002003\n\
    expedida el 9 de mayo de 2020\n";

fn idscan(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("idscan").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

/// Temp workspace with an all-defaults config file.
fn workspace() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, "{}").unwrap();
    (dir, config)
}

fn write_zip(path: &Path, members: &[(&str, &str)]) {
    let mut writer = ZipWriter::new(File::create(path).unwrap());
    for (name, content) in members {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("idscan")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_process_document_as_csv() {
    let (dir, config) = workspace();
    let doc = dir.path().join("cedula.txt");
    fs::write(&doc, CC_TEXT).unwrap();

    idscan(&config)
        .args(["process", "--format", "csv", "--today", "2024-06-01"])
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("TIPO DE DOCUMENTO"))
        .stdout(predicate::str::contains(
            "CC,79123456,PEDRO PABLO LEON,2,ENERO,2005,2024-07-01,30,POR VENCER,cedula.txt",
        ));
}

#[test]
fn test_process_folder_as_json() {
    let (dir, config) = workspace();
    let input = dir.path().join("docs");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("cc.txt"), CC_TEXT).unwrap();
    fs::write(input.join("ti.txt"), TI_TEXT).unwrap();

    let output = idscan(&config)
        .args(["process", "--today", "2024-06-01"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["document_type"], "CC");
    assert_eq!(records[1]["document_type"], "TI");
    assert_eq!(records[1]["days_remaining"], "N/A");
}

#[test]
fn test_process_archive_to_file() {
    let (dir, config) = workspace();
    let archive = dir.path().join("lote.zip");
    write_zip(&archive, &[("ti.txt", TI_TEXT)]);
    let out = dir.path().join("out.txt");

    idscan(&config)
        .args(["process", "--format", "text", "--output"])
        .arg(&out)
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 records written"));

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("TI 1001002003: LUCIA MARTINEZ"));
    assert!(text.contains("EXTRAÍDO"));
}

#[test]
fn test_process_type_only() {
    let (dir, config) = workspace();
    let input = dir.path().join("docs");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("cc.txt"), CC_TEXT).unwrap();
    fs::write(input.join("factura.txt"), "Factura de venta 001").unwrap();

    idscan(&config)
        .args(["process", "--type-only"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("cc.txt: CC"))
        .stdout(predicate::str::contains("factura.txt: UNKNOWN"));
}

#[test]
fn test_process_without_records_fails() {
    let (dir, config) = workspace();
    let doc = dir.path().join("factura.txt");
    fs::write(&doc, "Factura de venta 001").unwrap();

    idscan(&config)
        .arg("process")
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No valid records"));
}

#[test]
fn test_process_missing_input_fails() {
    let (dir, config) = workspace();

    idscan(&config)
        .arg("process")
        .arg(dir.path().join("missing.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input not found"));
}

#[test]
fn test_batch_creates_bundle() {
    let (dir, config) = workspace();
    let root = dir.path().join("Batch1");
    fs::create_dir_all(root.join("A")).unwrap();
    fs::write(root.join("A/cc.txt"), CC_TEXT).unwrap();
    write_zip(&root.join("B.zip"), &[("ti.txt", TI_TEXT)]);

    idscan(&config)
        .args(["batch", "--today", "2024-06-01"])
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 exported, 0 skipped, 0 failed"))
        .stdout(predicate::str::contains("resultados_extraccion.zip"));

    assert!(root.join("resultados_extraccion.zip").is_file());
}

#[test]
fn test_batch_json_report() {
    let (dir, config) = workspace();
    let root = dir.path().join("root");
    fs::create_dir_all(root.join("good")).unwrap();
    fs::write(root.join("good/cc.txt"), CC_TEXT).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();

    let output = idscan(&config)
        .args(["batch", "--json", "--format", "json"])
        .arg(&root)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["total_units"], 2);
    assert_eq!(report["units"][0]["name"], "empty");
    assert_eq!(report["units"][0]["outcome"]["outcome"], "skipped");
    assert_eq!(report["units"][1]["outcome"]["outcome"], "exported");
    assert_eq!(report["units"][1]["outcome"]["entry"], "good.json");
    assert_eq!(
        report["bundle"],
        root.join("resultados_extraccion.zip").display().to_string()
    );
}

#[test]
fn test_batch_invalid_root_fails() {
    let (dir, config) = workspace();

    idscan(&config)
        .arg("batch")
        .arg(dir.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid batch root"));
}

#[test]
fn test_config_init_get_set() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("nested/config.json");

    idscan(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.is_file());

    idscan(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    idscan(&config)
        .args(["config", "get", "extraction.alert_threshold_days"])
        .assert()
        .success()
        .stdout(predicate::str::contains("30"));

    idscan(&config)
        .args(["config", "set", "batch.export_format", "json"])
        .assert()
        .success();

    idscan(&config)
        .args(["config", "get", "batch.export_format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"json\""));
}

#[test]
fn test_config_set_rejects_bad_values() {
    let (_dir, config) = workspace();

    idscan(&config)
        .args(["config", "set", "batch.no_such_key", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));

    idscan(&config)
        .args(["config", "set", "batch.max_label_length", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_label_length"));
}
