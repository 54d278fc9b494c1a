//! Percent-change values that may be infinite.
//!
//! `percent_change(0, x)` is `+inf` for any non-zero `x`. JSON has no
//! infinity literal and `serde_json` would silently write `null`, so
//! non-finite values are written as the strings `"Infinity"`, `"-Infinity"`
//! and `"NaN"` and parsed back from the same strings. Finite values stay
//! plain JSON numbers.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

const POS_INFINITY: &str = "Infinity";
const NEG_INFINITY: &str = "-Infinity";
const NOT_A_NUMBER: &str = "NaN";

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct PercentChange(f64);

impl PercentChange {
    pub const ZERO: Self = Self(0.0);
    pub const INFINITY: Self = Self(f64::INFINITY);

    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> f64 {
        self.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl From<f64> for PercentChange {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<PercentChange> for f64 {
    fn from(value: PercentChange) -> Self {
        value.0
    }
}

/// Signed, two-decimal rendering such as `+50.00%` or `-12.50%`.
impl fmt::Display for PercentChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            write!(f, "nan%")
        } else if self.0.is_infinite() {
            let sign = if self.0 > 0.0 { '+' } else { '-' };
            write!(f, "{sign}inf%")
        } else {
            write!(f, "{:+.2}%", self.0)
        }
    }
}

impl Serialize for PercentChange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.is_finite() {
            serializer.serialize_f64(self.0)
        } else if self.0.is_nan() {
            serializer.serialize_str(NOT_A_NUMBER)
        } else if self.0 > 0.0 {
            serializer.serialize_str(POS_INFINITY)
        } else {
            serializer.serialize_str(NEG_INFINITY)
        }
    }
}

struct PercentVisitor;

impl Visitor<'_> for PercentVisitor {
    type Value = PercentChange;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "a number or one of \"{POS_INFINITY}\", \"{NEG_INFINITY}\", \"{NOT_A_NUMBER}\""
        )
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(PercentChange(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(PercentChange(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(PercentChange(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        match v {
            POS_INFINITY => Ok(PercentChange(f64::INFINITY)),
            NEG_INFINITY => Ok(PercentChange(f64::NEG_INFINITY)),
            NOT_A_NUMBER => Ok(PercentChange(f64::NAN)),
            other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for PercentChange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PercentVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_signed_percent() {
        assert_eq!(PercentChange::new(50.0).to_string(), "+50.00%");
        assert_eq!(PercentChange::new(-12.5).to_string(), "-12.50%");
        assert_eq!(PercentChange::INFINITY.to_string(), "+inf%");
        assert_eq!(PercentChange::new(f64::NEG_INFINITY).to_string(), "-inf%");
    }

    #[test]
    fn infinity_survives_json() {
        let json = serde_json::to_string(&PercentChange::INFINITY).unwrap();
        assert_eq!(json, "\"Infinity\"");
        let back: PercentChange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PercentChange::INFINITY);
    }

    #[test]
    fn finite_values_stay_numbers() {
        assert_eq!(serde_json::to_string(&PercentChange::new(50.0)).unwrap(), "50.0");
        let back: PercentChange = serde_json::from_str("-50").unwrap();
        assert_eq!(back.value(), -50.0);
    }

    #[test]
    fn unknown_text_is_rejected() {
        assert!(serde_json::from_str::<PercentChange>("\"lots\"").is_err());
    }
}
