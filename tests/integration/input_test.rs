//! Reading files and config into tables.

use std::fs;
use std::path::Path;

use pedigree::config::Config;
use pedigree::domain::{ColumnRef, ParentRef};
use pedigree::reader::Separator;
use tempfile::TempDir;

use crate::support::fixtures::fixture_path;

#[test]
fn test_load_sample_fixture() {
    let table = pedigree::load_table(&fixture_path("sample.csv"), &Config::default()).unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table.headers(), ["ID", "Vader", "Moeder", "Geboortedatum"]);
    let record = &table.records()[2];
    assert_eq!(record.id.as_str(), "15");
    assert_eq!(record.birth_date.unwrap().to_string(), "1941-01-01");
    assert_eq!(table.records()[0].sire, ParentRef::Unknown);
}

#[test]
fn test_load_with_named_columns() {
    let mut config = Config::default();
    config.input.separator = Separator::Semicolon;
    config.input.columns.id = ColumnRef::Name("dier".to_string());
    config.input.columns.sire = ColumnRef::Name("vader".to_string());
    config.input.columns.dam = ColumnRef::Name("moeder".to_string());
    config.input.columns.birth_date = Some(ColumnRef::Name("geboren".to_string()));

    let table = pedigree::load_table(&fixture_path("defects.csv"), &config).unwrap();
    assert_eq!(table.len(), 8);
    assert_eq!(table.records()[0].birth_date.unwrap().to_string(), "2001-05-01");
    assert_eq!(table.records()[0].fields[4], "bruin");
}

#[test]
fn test_missing_column_is_reported() {
    let mut config = Config::default();
    config.input.columns.sire = ColumnRef::Name("Father".to_string());

    let err = pedigree::load_table(&fixture_path("sample.csv"), &config).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Father"));
    assert!(message.contains("Vader"));
}

#[test]
fn test_header_only_file_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("empty.csv");
    fs::write(&path, "ID,Vader,Moeder\n").unwrap();

    let mut config = Config::default();
    config.input.columns.birth_date = None;
    assert!(pedigree::load_table(&path, &config).is_err());
}

#[test]
fn test_json_input() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("studbook.json");
    fs::write(
        &path,
        r#"[
            {"id": 15, "sire": 141209548, "dam": 0, "born": "1941-01-01"},
            {"id": 141209548, "sire": null, "dam": "0", "born": "1970-01-01"}
        ]"#,
    )
    .unwrap();

    let table = pedigree::load_table(&path, &Config::default()).unwrap();
    assert_eq!(table.headers(), ["id", "sire", "dam", "born"]);
    assert_eq!(
        table.records()[0].sire.known().map(|id| id.as_str()),
        Some("141209548")
    );
    assert_eq!(table.records()[1].sire, ParentRef::Unknown);
}

#[test]
fn test_latin1_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("latin1.csv");
    fs::write(&path, b"ID,Vader,Moeder,Naam\nA,0,0,Ren\xe9\n").unwrap();

    let mut config = Config::default();
    config.input.columns.birth_date = None;
    let table = pedigree::load_table(&path, &config).unwrap();
    assert_eq!(table.records()[0].fields[3], "René");
}

#[test]
fn test_missing_file() {
    let err = pedigree::load_table(Path::new("/nonexistent/studbook.csv"), &Config::default())
        .unwrap_err();
    assert!(err.to_string().contains("/nonexistent/studbook.csv"));
}
