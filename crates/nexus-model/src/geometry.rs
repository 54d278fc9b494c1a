use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::RecordValue;

/// Cartesian position `(x, y, z)`, in the same length unit as the radius
/// used to produce it (kilometres for Earth-radius conversions).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cartesian {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Cartesian {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm of the vector.
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn to_record_value(self) -> RecordValue {
        let mut map = BTreeMap::new();
        map.insert("x".to_string(), RecordValue::Number(self.x));
        map.insert("y".to_string(), RecordValue::Number(self.y));
        map.insert("z".to_string(), RecordValue::Number(self.z));
        RecordValue::Map(map)
    }

    /// Reads back a `{x, y, z}` map; any missing or non-numeric axis yields `None`.
    pub fn from_record_value(value: &RecordValue) -> Option<Self> {
        let map = value.as_map()?;
        let axis = |name: &str| map.get(name).and_then(RecordValue::as_f64);
        Some(Self::new(axis("x")?, axis("y")?, axis("z")?))
    }
}
