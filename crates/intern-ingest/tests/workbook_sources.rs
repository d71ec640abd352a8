use std::fs;
use std::path::PathBuf;

use intern_ingest::{Cell, IngestError, read_workbook};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn csv_becomes_single_sheet_named_after_stem() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        &dir,
        "Promo 2023.csv",
        "Prénom,CIN,Note\n  Sami   Ben Ali ,12345678,\"15,5\"\nLeila,87654321,true\n,,\n",
    );

    let workbook = read_workbook(&path).expect("read csv");
    assert_eq!(workbook.sheet_names(), vec!["Promo 2023"]);

    let sheet = &workbook.sheets[0];
    assert_eq!(sheet.data_len(), 2);
    assert_eq!(sheet.rows[1][0], Cell::text("Sami Ben Ali"));
    assert_eq!(sheet.rows[1][1], Cell::Number(12_345_678.0));
    assert_eq!(sheet.rows[1][2], Cell::Number(15.5));
    assert_eq!(sheet.rows[2][2], Cell::Bool(true));
}

#[test]
fn csv_rows_may_have_uneven_length() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "ragged.csv", "A,B,C\n1\n2,3\n");

    let workbook = read_workbook(&path).expect("read csv");
    let sheet = &workbook.sheets[0];
    assert_eq!(sheet.rows[1].len(), 1);
    assert_eq!(sheet.rows[2].len(), 2);
}

#[test]
fn json_payload_keeps_every_sheet() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        &dir,
        "upload.json",
        r#"{"sheets": {"Etudiants 2022": [["CIN"], [11111111]], "Entreprises": [["Nom"]]}}"#,
    );

    let workbook = read_workbook(&path).expect("read json");
    assert_eq!(workbook.sheets.len(), 2);
    let students = workbook.sheet("Etudiants 2022").expect("student sheet");
    assert_eq!(students.rows[1][0], Cell::Number(11_111_111.0));
}

#[test]
fn json_payload_keeps_sheet_order() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        &dir,
        "upload.json",
        r#"{"sheets": {"Promo 2023": [["CIN"]], "Mise a jour 2023": [["CIN"]]}}"#,
    );

    let workbook = read_workbook(&path).expect("read json");
    assert_eq!(workbook.sheet_names(), vec!["Promo 2023", "Mise a jour 2023"]);
}

#[test]
fn json_payload_without_sheets_is_empty() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "empty.json", "{}");

    let workbook = read_workbook(&path).expect("read json");
    assert!(workbook.is_empty());
}

#[test]
fn invalid_json_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "broken.json", "{\"sheets\": [");

    let error = read_workbook(&path).unwrap_err();
    assert!(matches!(error, IngestError::Payload { .. }));
}

#[test]
fn missing_file_and_unknown_extension() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir.path().join("absent.xlsx");
    assert!(matches!(
        read_workbook(&missing),
        Err(IngestError::FileNotFound { .. })
    ));

    let path = write_file(&dir, "notes.pdf", "%PDF");
    match read_workbook(&path) {
        Err(IngestError::UnsupportedFormat { extension, .. }) => assert_eq!(extension, "pdf"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn corrupt_spreadsheet_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "corrupt.xlsx", "not a zip archive");

    assert!(matches!(
        read_workbook(&path),
        Err(IngestError::Spreadsheet { .. })
    ));
}
