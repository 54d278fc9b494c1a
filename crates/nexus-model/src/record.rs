//! Raw and canonical record containers.
//!
//! Both records are ordered maps keyed by field name. Ordering is by key so
//! serialization, iteration, and fingerprints never depend on insertion order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::geometry::Cartesian;
use crate::value::RecordValue;

/// Canonical field names produced by the normalization pipeline.
pub mod fields {
    pub const DATASET_NAME: &str = "dataset_name";
    pub const NASA_ID: &str = "nasa_id";
    pub const DESCRIPTION: &str = "description";
    pub const KEYWORDS: &str = "keywords";
    pub const MEDIA_TYPE: &str = "media_type";
    pub const DATE_CREATED: &str = "date_created";

    pub const OBJECT_TYPE: &str = "object_type";
    pub const COORDINATE_SYSTEM: &str = "coordinate_system";
    pub const BRIGHTNESS: &str = "brightness";

    pub const DISTANCE_KM: &str = "distance_km";
    pub const COORDINATES_CARTESIAN: &str = "coordinates_cartesian";
    pub const MASS_KG: &str = "mass_kg";
    pub const TEMPERATURE_K: &str = "temperature_k";
    pub const ENERGY_EV: &str = "energy_ev";
}

/// Untyped ingestion payload as handed over by an upstream collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: BTreeMap<String, RecordValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mainly for tests and ad-hoc construction.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<RecordValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RecordValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&RecordValue> {
        self.fields.get(name)
    }

    /// Returns the value only when the field exists and is not `Absent`.
    pub fn present(&self, name: &str) -> Option<&RecordValue> {
        self.fields.get(name).filter(|value| !value.is_absent())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RecordValue)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<RecordValue>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<BTreeMap<String, RecordValue>> for RawRecord {
    fn from(fields: BTreeMap<String, RecordValue>) -> Self {
        Self { fields }
    }
}

/// Normalized, fixed-vocabulary record.
///
/// There is no mutating API: a canonical record is assembled once (by the
/// pipeline, or from a previously stored payload) and read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalRecord {
    fields: BTreeMap<String, RecordValue>,
}

impl CanonicalRecord {
    pub fn get(&self, name: &str) -> Option<&RecordValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Numeric value of a field, if it holds a number.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(RecordValue::as_f64)
    }

    /// Text value of a field, if it holds text.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(RecordValue::as_str)
    }

    pub fn distance_km(&self) -> Option<f64> {
        self.number(fields::DISTANCE_KM)
    }

    pub fn coordinates(&self) -> Option<Cartesian> {
        self.get(fields::COORDINATES_CARTESIAN)
            .and_then(Cartesian::from_record_value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RecordValue)> {
        self.fields.iter()
    }

    /// Fields holding a number, in key order.
    pub fn numeric_fields(&self) -> impl Iterator<Item = (&String, f64)> {
        self.fields
            .iter()
            .filter_map(|(key, value)| value.as_f64().map(|n| (key, n)))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> BTreeMap<String, RecordValue> {
        self.fields
    }

    /// SHA-256 digest (lowercase hex) over the record's contents.
    ///
    /// Two records have the same fingerprint exactly when they hold the same
    /// keys with the same values. Floats are hashed by bit pattern, so `0.0`
    /// and `-0.0` differ.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hash_map(&mut hasher, &self.fields);
        hex::encode(hasher.finalize())
    }
}

impl<K: Into<String>, V: Into<RecordValue>> FromIterator<(K, V)> for CanonicalRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<BTreeMap<String, RecordValue>> for CanonicalRecord {
    fn from(fields: BTreeMap<String, RecordValue>) -> Self {
        Self { fields }
    }
}

fn hash_map(hasher: &mut Sha256, map: &BTreeMap<String, RecordValue>) {
    hasher.update(b"{");
    hasher.update((map.len() as u64).to_be_bytes());
    for (key, value) in map {
        hash_str(hasher, key);
        hash_value(hasher, value);
    }
}

fn hash_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_be_bytes());
    hasher.update(value.as_bytes());
}

fn hash_value(hasher: &mut Sha256, value: &RecordValue) {
    match value {
        RecordValue::Absent => hasher.update(b"n"),
        RecordValue::Bool(b) => hasher.update(if *b { b"t" } else { b"f" }),
        RecordValue::Number(n) => {
            hasher.update(b"d");
            hasher.update(n.to_bits().to_be_bytes());
        }
        RecordValue::Text(s) => {
            hasher.update(b"s");
            hash_str(hasher, s);
        }
        RecordValue::List(items) => {
            hasher.update(b"[");
            hasher.update((items.len() as u64).to_be_bytes());
            for item in items {
                hash_value(hasher, item);
            }
        }
        RecordValue::Map(map) => hash_map(hasher, map),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_skips_absent_values() {
        let raw = RawRecord::new()
            .with("lat", RecordValue::Absent)
            .with("lon", 10.0);
        assert!(raw.contains("lat"));
        assert!(raw.present("lat").is_none());
        assert_eq!(raw.present("lon"), Some(&RecordValue::Number(10.0)));
    }

    #[test]
    fn fingerprint_ignores_insertion_order() {
        let a: CanonicalRecord = [("a", 1.0), ("b", 2.0)].into_iter().collect();
        let b: CanonicalRecord = [("b", 2.0), ("a", 1.0)].into_iter().collect();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn fingerprint_distinguishes_kinds() {
        let number: CanonicalRecord = [("a", RecordValue::from(1.0))].into_iter().collect();
        let text: CanonicalRecord = [("a", RecordValue::from("1"))].into_iter().collect();
        assert_ne!(number.fingerprint(), text.fingerprint());
    }

    #[test]
    fn coordinates_read_back_from_map() {
        let record: CanonicalRecord = [(
            fields::COORDINATES_CARTESIAN,
            Cartesian::new(1.0, 2.0, 3.0).to_record_value(),
        )]
        .into_iter()
        .collect();
        assert_eq!(record.coordinates(), Some(Cartesian::new(1.0, 2.0, 3.0)));
    }
}
