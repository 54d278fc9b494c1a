//! Integration tests for reading and validating raw input.

use std::fs;
use std::path::{Path, PathBuf};

use nexus_cli::ingest::{InputFormat, parse_csv, parse_json, read_records, validate_required};
use nexus_model::{RecordValue, fields};
use nexus_normalize::NormalizationPipeline;

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn json_object_and_array_are_both_accepted() {
    let one = parse_json(r#"{"nasa_id": "A"}"#).unwrap();
    assert_eq!(one.len(), 1);

    let many = parse_json(r#"[{"nasa_id": "A"}, {"nasa_id": "B", "brightness": 2.5}]"#).unwrap();
    assert_eq!(many.len(), 2);
    assert_eq!(many[1].get("brightness"), Some(&RecordValue::Number(2.5)));
}

#[test]
fn json_scalars_are_rejected() {
    assert!(parse_json("42").is_err());
    assert!(parse_json("[1, 2]").is_err());
}

#[test]
fn csv_cells_become_text_and_blanks_absent() {
    let content = "\u{feff}nasa_id,title,distance_miles,lat,lon\nA, Andromeda ,10,,\nB,Bode,,1.5,2.5\n";
    let records = parse_csv(content.as_bytes()).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("nasa_id"), Some(&RecordValue::from("A")));
    assert_eq!(records[0].get("title"), Some(&RecordValue::from("Andromeda")));
    assert_eq!(records[0].get("lat"), Some(&RecordValue::Absent));
    assert_eq!(records[1].get("distance_miles"), Some(&RecordValue::Absent));
}

#[test]
fn csv_records_normalize_like_json() {
    let content = "nasa_id,title,distance_miles,lat,lon\nA,Andromeda,10,0,0\n";
    let records = parse_csv(content.as_bytes()).unwrap();
    let outcome = NormalizationPipeline::default().normalize(&records[0]);

    assert!(outcome.errors.is_empty());
    let km = outcome.record.distance_km().unwrap();
    assert!((km - 16.0934).abs() < 1e-9);
    assert_eq!(outcome.record.text(fields::DATASET_NAME), Some("Andromeda"));
    assert!(outcome.record.coordinates().is_some());
}

#[test]
fn read_records_detects_format() {
    let dir = tempfile::tempdir().unwrap();
    let json = write_file(dir.path(), "items.json", r#"[{"nasa_id": "A"}]"#);
    let csv = write_file(dir.path(), "items.csv", "nasa_id\nA\nB\n");

    assert_eq!(read_records(&json, None).unwrap().len(), 1);
    assert_eq!(read_records(&csv, None).unwrap().len(), 2);
    assert_eq!(
        read_records(&csv, Some(InputFormat::Csv)).unwrap().len(),
        2
    );
}

#[test]
fn unknown_extension_needs_explicit_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "items.txt", r#"{"nasa_id": "A"}"#);
    assert!(read_records(&path, None).is_err());
    assert_eq!(read_records(&path, Some(InputFormat::Json)).unwrap().len(), 1);
}

#[test]
fn validation_lists_every_missing_field() {
    let records = parse_json(
        r#"[
            {"nasa_id": "A", "title": "Andromeda"},
            {"nasa_id": null},
            {"title": "Bode"}
        ]"#,
    )
    .unwrap();
    let required = vec!["nasa_id".to_string(), "title".to_string()];

    let message = validate_required(&records, &required)
        .unwrap_err()
        .to_string();
    assert_eq!(
        message,
        "2 invalid record(s): record 2: missing nasa_id, title; record 3: missing nasa_id"
    );
    assert!(validate_required(&records[..1], &required).is_ok());
}

#[test]
fn csv_row_snapshot() {
    let records = parse_csv("nasa_id,keywords,brightness\nPIA002,\"mars, rover\",3.5\n".as_bytes())
        .unwrap();
    insta::assert_json_snapshot!(records[0], @r#"
    {
      "brightness": "3.5",
      "keywords": "mars, rover",
      "nasa_id": "PIA002"
    }
    "#);
}

#[test]
fn fixture_directory_is_removed_on_drop() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();
    let path = write_file(&root, "items.json", r#"{"nasa_id": "A"}"#);
    assert_eq!(read_records(&path, None).unwrap().len(), 1);

    drop(dir);
    assert!(!root.exists());
}
