use serde::{Deserialize, Serialize};

use crate::error::ConversionError;
use crate::record::CanonicalRecord;

/// A required canonical field the raw record did not supply.
///
/// The field is still present in the canonical record, holding the absent
/// marker; the gap is reported so callers can see which vocabulary was missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaGap {
    /// Canonical field name.
    pub field: String,
    /// Raw field names that were looked up, in priority order.
    pub sources: Vec<String>,
}

/// Everything produced by normalizing one raw record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationOutcome {
    pub record: CanonicalRecord,
    /// Conversion failures; the rest of the record was still produced.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ConversionError>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gaps: Vec<SchemaGap>,
    pub normalization_version: String,
}

impl NormalizationOutcome {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// No conversion errors and no schema gaps.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.gaps.is_empty()
    }

    pub fn fingerprint(&self) -> String {
        self.record.fingerprint()
    }

    pub fn into_record(self) -> CanonicalRecord {
        self.record
    }
}
