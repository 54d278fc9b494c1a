//! Rule-driven mapping from raw vocabulary to canonical fields.
//!
//! The mapper is the only place that knows upstream field names. Each
//! [`FieldRule`] names a canonical target, the raw aliases to look it up
//! under, the shape the value must take, and what to do when no alias is
//! present. Supporting a new upstream source means adding rules here.

use std::collections::BTreeMap;

use nexus_model::{ConversionError, RawRecord, RecordValue, SchemaGap, fields};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::numeric::coerce_f64;

/// Shape a mapped value is converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Scalar text. Numbers and booleans are rendered to text.
    Text,
    /// Floating-point number. Numeric text is parsed.
    Number,
    /// List of text. A single text value is split on commas.
    TextList,
    /// Copied unchanged.
    Any,
}

/// What happens when none of a rule's sources is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// Emit the absent marker and report a [`SchemaGap`].
    Required,
    /// Leave the field out of the canonical record.
    Optional,
    /// Emit an empty list.
    DefaultEmptyList,
}

/// One canonical field and where to find it in raw records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub target: String,
    /// Raw field names, highest priority first.
    pub sources: Vec<String>,
    pub kind: FieldKind,
    pub presence: Presence,
}

impl FieldRule {
    pub fn new<S: Into<String>>(
        target: impl Into<String>,
        sources: impl IntoIterator<Item = S>,
        kind: FieldKind,
        presence: Presence,
    ) -> Self {
        Self {
            target: target.into(),
            sources: sources.into_iter().map(Into::into).collect(),
            kind,
            presence,
        }
    }

    pub fn required<S: Into<String>>(
        target: impl Into<String>,
        sources: impl IntoIterator<Item = S>,
        kind: FieldKind,
    ) -> Self {
        Self::new(target, sources, kind, Presence::Required)
    }

    pub fn optional<S: Into<String>>(
        target: impl Into<String>,
        sources: impl IntoIterator<Item = S>,
        kind: FieldKind,
    ) -> Self {
        Self::new(target, sources, kind, Presence::Optional)
    }

    /// First source that holds a non-absent value.
    fn lookup<'a>(&'a self, raw: &'a RawRecord) -> Option<(&'a str, &'a RecordValue)> {
        self.sources
            .iter()
            .find_map(|source| raw.present(source).map(|value| (source.as_str(), value)))
    }

    fn fallback(&self) -> Option<RecordValue> {
        match self.presence {
            Presence::Required => Some(RecordValue::Absent),
            Presence::Optional => None,
            Presence::DefaultEmptyList => Some(RecordValue::List(Vec::new())),
        }
    }
}

/// Canonical fields extracted from one raw record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedFields {
    pub fields: BTreeMap<String, RecordValue>,
    pub errors: Vec<ConversionError>,
    pub gaps: Vec<SchemaGap>,
}

/// Maps raw records onto the canonical vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaMapper {
    rules: Vec<FieldRule>,
}

impl Default for SchemaMapper {
    fn default() -> Self {
        Self::nasa_image_library()
    }
}

impl SchemaMapper {
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// Rules for NASA Image and Video Library search items, plus the
    /// optional analytic fields used for grouping.
    pub fn nasa_image_library() -> Self {
        Self::new(vec![
            FieldRule::required(fields::DATASET_NAME, ["title"], FieldKind::Text),
            FieldRule::required(fields::NASA_ID, ["nasa_id"], FieldKind::Text),
            FieldRule::required(
                fields::DESCRIPTION,
                ["description", "description_508"],
                FieldKind::Text,
            ),
            FieldRule::new(
                fields::KEYWORDS,
                ["keywords"],
                FieldKind::TextList,
                Presence::DefaultEmptyList,
            ),
            FieldRule::required(fields::MEDIA_TYPE, ["media_type"], FieldKind::Text),
            FieldRule::required(fields::DATE_CREATED, ["date_created"], FieldKind::Text),
            FieldRule::optional(fields::OBJECT_TYPE, ["object_type"], FieldKind::Text),
            FieldRule::optional(
                fields::COORDINATE_SYSTEM,
                ["coordinate_system"],
                FieldKind::Text,
            ),
            FieldRule::optional(fields::BRIGHTNESS, ["brightness"], FieldKind::Number),
        ])
    }

    /// Adds a rule, replacing any existing rule for the same target.
    #[must_use]
    pub fn with_rule(mut self, rule: FieldRule) -> Self {
        match self.rules.iter_mut().find(|r| r.target == rule.target) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
        self
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Extracts every canonical field the rules declare.
    ///
    /// Never fails: missing required fields become the absent marker plus a
    /// gap, and values of the wrong shape become a [`ConversionError`] with
    /// the field handled as if it were missing (without a gap).
    pub fn map_raw_to_standard(&self, raw: &RawRecord) -> MappedFields {
        let mut mapped = MappedFields::default();

        for rule in &self.rules {
            let Some((source, value)) = rule.lookup(raw) else {
                if rule.presence == Presence::Required {
                    mapped.gaps.push(SchemaGap {
                        field: rule.target.clone(),
                        sources: rule.sources.clone(),
                    });
                }
                if let Some(fallback) = rule.fallback() {
                    mapped.fields.insert(rule.target.clone(), fallback);
                }
                continue;
            };

            match convert(source, value, rule.kind) {
                Ok(converted) => {
                    trace!(source, target = %rule.target, "mapped field");
                    mapped.fields.insert(rule.target.clone(), converted);
                }
                Err(error) => {
                    mapped.errors.push(error);
                    if let Some(fallback) = rule.fallback() {
                        mapped.fields.insert(rule.target.clone(), fallback);
                    }
                }
            }
        }

        mapped
    }
}

fn convert(
    source: &str,
    value: &RecordValue,
    kind: FieldKind,
) -> Result<RecordValue, ConversionError> {
    match kind {
        FieldKind::Any => Ok(value.clone()),
        FieldKind::Number => coerce_f64(source, value).map(RecordValue::Number),
        FieldKind::Text => scalar_text(value)
            .map(RecordValue::Text)
            .ok_or_else(|| ConversionError::new(source, "text", value.describe())),
        FieldKind::TextList => text_list(value)
            .map(RecordValue::List)
            .ok_or_else(|| ConversionError::new(source, "list of text", value.describe())),
    }
}

fn scalar_text(value: &RecordValue) -> Option<String> {
    match value {
        RecordValue::Text(s) => Some(s.clone()),
        RecordValue::Number(_) | RecordValue::Bool(_) => Some(value.to_string()),
        _ => None,
    }
}

fn text_list(value: &RecordValue) -> Option<Vec<RecordValue>> {
    match value {
        RecordValue::List(items) => items
            .iter()
            .map(|item| scalar_text(item).map(RecordValue::Text))
            .collect(),
        RecordValue::Text(s) => Some(
            s.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(RecordValue::from)
                .collect(),
        ),
        _ => None,
    }
}
