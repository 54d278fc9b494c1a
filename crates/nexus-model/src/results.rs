//! Output types of the analytics engine.
//!
//! Everything here is a plain value meant to be serialized straight into a
//! response body. None of it has a lifecycle beyond the call that built it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::percent::PercentChange;
use crate::value::RecordValue;

/// Descriptive statistics over one numeric sequence.
///
/// Every field is `0.0` for an empty sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    pub error_margin: f64,
}

/// Per-field difference between two records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldDelta {
    /// Both sides hold numbers.
    Numeric {
        value_a: f64,
        value_b: f64,
        percent_change: PercentChange,
    },
    /// At least one side is not a number (including a missing side).
    Categorical {
        value_a: RecordValue,
        value_b: RecordValue,
        equal: bool,
    },
}

impl FieldDelta {
    /// True when the two sides hold the same value.
    pub fn is_unchanged(&self) -> bool {
        match self {
            Self::Numeric { value_a, value_b, .. } => value_a == value_b,
            Self::Categorical { equal, .. } => *equal,
        }
    }
}

/// Field-by-field diff plus an overall similarity score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub fields: BTreeMap<String, FieldDelta>,
    /// Inverse-distance similarity over shared numeric fields, in `[0, 1]`.
    pub similarity_score: f64,
}

impl ComparisonResult {
    pub fn get(&self, field: &str) -> Option<&FieldDelta> {
        self.fields.get(field)
    }

    /// Names of fields whose values differ between the two records.
    pub fn changed_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, delta)| !delta.is_unchanged())
            .map(|(name, _)| name.as_str())
    }
}

/// Direction of change between two series' means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    #[serde(rename = "increase")]
    Increase,
    #[serde(rename = "decrease")]
    Decrease,
    #[serde(rename = "stable")]
    Stable,
    /// One of the series was empty.
    #[serde(rename = "no data")]
    NoData,
}

impl Trend {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
            Self::Stable => "stable",
            Self::NoData => "no data",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesDelta {
    pub mean1: f64,
    pub mean2: f64,
    pub percent_change: PercentChange,
}

/// Result of comparing two numeric series.
///
/// Serializes to `{"trend": "no data"}` when either series was empty and to
/// `{"mean1", "mean2", "percent_change", "trend"}` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesComparison {
    #[serde(flatten)]
    pub delta: Option<SeriesDelta>,
    pub trend: Trend,
}

impl TimeSeriesComparison {
    pub const fn no_data() -> Self {
        Self {
            delta: None,
            trend: Trend::NoData,
        }
    }

    pub fn is_no_data(&self) -> bool {
        self.trend == Trend::NoData
    }
}

/// Year span of a collection plus statistics over one numeric field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWindowSummary {
    /// `"<min year>–<max year>"`, e.g. `"2019–2023"`.
    pub time_window: String,
    pub mean: f64,
    /// `[min, max]` of the value field.
    pub range: [f64; 2],
}

/// Per-group rollup for object-type aggregation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupRollup {
    pub count: usize,
    /// Statistics over the requested value field, when one was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<SummaryStatistics>,
}

/// Outcome of one grouping strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationResult {
    /// `None` when no record carried a parseable date.
    TimeSummary(Option<TimeWindowSummary>),
    RegionCounts(BTreeMap<String, usize>),
    ObjectRollups(BTreeMap<String, GroupRollup>),
}

impl AggregationResult {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::TimeSummary(summary) => summary.is_none(),
            Self::RegionCounts(counts) => counts.is_empty(),
            Self::ObjectRollups(rollups) => rollups.is_empty(),
        }
    }
}

/// Statistics and grouping for a single canonical record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub statistics: SummaryStatistics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<AggregationResult>,
}
