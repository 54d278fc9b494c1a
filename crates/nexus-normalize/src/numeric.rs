//! Numeric coercion of raw field values.

use nexus_model::{ConversionError, RecordValue};

/// Parses a string as a finite f64, returning None for invalid, empty, or
/// non-finite text ("inf", "NaN").
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Coerces a raw value to f64 for a unit or coordinate conversion.
///
/// Numbers pass through; text is accepted when it parses as a number (CSV
/// uploads carry every cell as text). Anything else is a [`ConversionError`]
/// naming `field`.
pub fn coerce_f64(field: &str, value: &RecordValue) -> Result<f64, ConversionError> {
    match value {
        RecordValue::Number(n) => Ok(*n),
        RecordValue::Text(s) => {
            parse_f64(s).ok_or_else(|| ConversionError::new(field, "number", value.describe()))
        }
        other => Err(ConversionError::new(field, "number", other.describe())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_f64_trims_and_rejects_garbage() {
        assert_eq!(parse_f64(" 12.5 "), Some(12.5));
        assert_eq!(parse_f64("-3e2"), Some(-300.0));
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64("twelve"), None);
        assert_eq!(parse_f64("inf"), None);
        assert_eq!(parse_f64("NaN"), None);
    }

    #[test]
    fn coerce_accepts_numeric_text() {
        assert_eq!(coerce_f64("d", &RecordValue::from("42")), Ok(42.0));
        assert_eq!(coerce_f64("d", &RecordValue::from(1.5)), Ok(1.5));
    }

    #[test]
    fn coerce_reports_field_and_shape() {
        let err = coerce_f64("distance_miles", &RecordValue::from(true)).unwrap_err();
        assert_eq!(err.field, "distance_miles");
        assert_eq!(err.expected, "number");
        assert_eq!(err.actual, "boolean true");

        let err = coerce_f64("lat", &RecordValue::from("north")).unwrap_err();
        assert_eq!(err.actual, "text \"north\"");
    }
}
