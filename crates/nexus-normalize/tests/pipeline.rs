//! Integration tests for the normalization pipeline.

use nexus_model::{NexusConfig, RawRecord, RecordValue, fields};
use nexus_normalize::NormalizationPipeline;

fn raw_item() -> RawRecord {
    serde_json::from_str(
        r#"{
            "title": "Curiosity at Gale Crater",
            "nasa_id": "PIA16239",
            "description": "Self-portrait",
            "keywords": ["mars", "curiosity"],
            "media_type": "image",
            "date_created": "2012-10-31T00:00:00Z",
            "object_type": "planet",
            "coordinate_system": "Mars",
            "brightness": 4.5,
            "distance_miles": 140000000,
            "lat": -4.5895,
            "lon": 137.4417,
            "center": "JPL"
        }"#,
    )
    .expect("parse raw item")
}

#[test]
fn normalizing_twice_is_identical() {
    let pipeline = NormalizationPipeline::default();
    let raw = raw_item();

    let first = pipeline.normalize(&raw);
    let second = pipeline.normalize(&raw);

    assert_eq!(first, second);
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_eq!(
        serde_json::to_vec(&first.record).unwrap(),
        serde_json::to_vec(&second.record).unwrap()
    );
}

#[test]
fn full_record_has_derived_fields() {
    let outcome = NormalizationPipeline::default().normalize(&raw_item());
    assert!(outcome.is_clean(), "unexpected issues: {outcome:?}");

    let record = &outcome.record;
    let km = record.distance_km().expect("distance_km");
    assert!((km - 140_000_000.0 * 1.60934).abs() < 1e-3);

    let position = record.coordinates().expect("coordinates");
    assert!((position.norm() - 6371.0).abs() < 1e-6);
    assert!(position.z < 0.0, "southern latitude gives negative z");

    assert_eq!(record.text(fields::COORDINATE_SYSTEM), Some("Mars"));
    assert_eq!(record.number(fields::BRIGHTNESS), Some(4.5));
    assert!(!record.contains("center"));
    assert!(!record.contains("lat"));
    assert_eq!(outcome.normalization_version, "v1.0");
}

#[test]
fn bad_distance_is_reported_but_record_survives() {
    let raw = raw_item().with("distance_miles", "far away");
    let outcome = NormalizationPipeline::default().normalize(&raw);

    assert_eq!(outcome.errors.len(), 1);
    let error = &outcome.errors[0];
    assert_eq!(error.field, "distance_miles");
    assert_eq!(error.expected, "number");
    assert_eq!(error.actual, "text \"far away\"");

    assert!(outcome.record.distance_km().is_none());
    assert!(outcome.record.coordinates().is_some());
    assert_eq!(
        outcome.record.text(fields::NASA_ID),
        Some("PIA16239")
    );
}

#[test]
fn bad_latitude_skips_coordinates_only() {
    let raw = raw_item().with("lat", RecordValue::List(vec![]));
    let outcome = NormalizationPipeline::default().normalize(&raw);

    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].field, "lat");
    assert!(outcome.record.coordinates().is_none());
    assert!(outcome.record.distance_km().is_some());
}

#[test]
fn csv_style_text_numbers_are_coerced() {
    let raw = RawRecord::new()
        .with("nasa_id", "X1")
        .with("distance_au", "2")
        .with("latitude", "0")
        .with("longitude", "90");
    let outcome = NormalizationPipeline::default().normalize(&raw);

    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.record.distance_km(), Some(2.0 * 149_597_870.7));
    let position = outcome.record.coordinates().unwrap();
    assert!((position.y - 6371.0).abs() < 1e-9);
}

#[test]
fn null_prerequisites_are_treated_as_missing() {
    let raw = RawRecord::new()
        .with("distance_miles", RecordValue::Absent)
        .with("lat", RecordValue::Absent)
        .with("lon", 3.0);
    let outcome = NormalizationPipeline::default().normalize(&raw);

    assert!(outcome.errors.is_empty());
    assert!(!outcome.record.contains(fields::DISTANCE_KM));
    assert!(!outcome.record.contains(fields::COORDINATES_CARTESIAN));
}

#[test]
fn empty_record_reports_gaps() {
    let outcome = NormalizationPipeline::default().normalize(&RawRecord::new());
    assert_eq!(outcome.gaps.len(), 5);
    assert_eq!(outcome.record.get(fields::MEDIA_TYPE), Some(&RecordValue::Absent));
    assert_eq!(outcome.record.len(), 6);
}

#[test]
fn supplemental_units_are_converted() {
    let raw = RawRecord::new()
        .with("mass_earth", 1.0)
        .with("temperature_c", 0.0)
        .with("energy_j", 1.602e-19);
    let record = NormalizationPipeline::default().normalize(&raw).into_record();

    assert_eq!(record.number(fields::MASS_KG), Some(5.972e24));
    assert_eq!(record.number(fields::TEMPERATURE_K), Some(273.15));
    let ev = record.number(fields::ENERGY_EV).unwrap();
    assert!((ev - 1.0).abs() < 1e-12);
}

#[test]
fn batch_preserves_order_and_version() {
    let pipeline =
        NormalizationPipeline::new(NexusConfig::new().with_normalization_version("v2.0"));
    let raws = vec![
        RawRecord::new().with("nasa_id", "A"),
        RawRecord::new().with("nasa_id", "B"),
        RawRecord::new().with("nasa_id", "C"),
    ];

    let outcomes = pipeline.normalize_batch(&raws);
    let ids: Vec<&str> = outcomes
        .iter()
        .map(|o| o.record.text(fields::NASA_ID).unwrap())
        .collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
    assert!(outcomes.iter().all(|o| o.normalization_version == "v2.0"));
}

#[test]
fn canonical_output_snapshot() {
    let raw = RawRecord::new()
        .with("title", "Crab Nebula")
        .with("nasa_id", "M1")
        .with("description", "Supernova remnant")
        .with("keywords", "nebula, taurus")
        .with("media_type", "image")
        .with("date_created", "2005-12-01")
        .with("object_type", "nebula")
        .with("brightness", 8.4)
        .with("telescope", "Hubble");
    let outcome = NormalizationPipeline::default().normalize(&raw);

    insta::assert_json_snapshot!(outcome, @r#"
    {
      "record": {
        "brightness": 8.4,
        "dataset_name": "Crab Nebula",
        "date_created": "2005-12-01",
        "description": "Supernova remnant",
        "keywords": [
          "nebula",
          "taurus"
        ],
        "media_type": "image",
        "nasa_id": "M1",
        "object_type": "nebula"
      },
      "normalization_version": "v1.0"
    }
    "#);
}
