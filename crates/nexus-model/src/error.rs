use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A raw value could not be coerced to the shape a conversion needs.
///
/// Carries the offending field name so callers can report it precisely.
/// Normalization keeps going after one of these; the affected field is left
/// out (or set to the absent marker) and the error is returned alongside the
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("cannot convert field `{field}`: expected {expected}, found {actual}")]
pub struct ConversionError {
    /// Raw field that held the bad value.
    pub field: String,
    /// Shape the conversion required (e.g. "number").
    pub expected: String,
    /// Description of what was actually there.
    pub actual: String,
}

impl ConversionError {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NexusError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error("dimension mismatch: left vector has {left} elements, right vector has {right}")]
    DimensionMismatch { left: usize, right: usize },
}

pub type Result<T> = std::result::Result<T, NexusError>;
