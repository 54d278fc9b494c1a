//! Record diffing, similarity scoring, and trend detection.

use std::collections::BTreeSet;

use nexus_model::{
    CanonicalRecord, ComparisonResult, FieldDelta, NexusConfig, PercentChange, RecordValue,
    SeriesDelta, TimeSeriesComparison, Trend,
};
use tracing::debug;

use crate::statistics;

/// Compares canonical records and numeric series.
///
/// Holds only configuration; all methods are pure.
#[derive(Debug, Clone, Default)]
pub struct ComparisonEngine {
    config: NexusConfig,
}

impl ComparisonEngine {
    pub fn new(config: NexusConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NexusConfig {
        &self.config
    }

    /// Field-by-field diff over the union of both records' keys.
    ///
    /// Pairs where both sides are numbers get a percent change. Everything
    /// else, including a field missing on one side, gets a structural
    /// equality flag; a number never equals text that prints the same.
    pub fn compare_datasets(&self, a: &CanonicalRecord, b: &CanonicalRecord) -> ComparisonResult {
        let keys: BTreeSet<&String> = a.keys().chain(b.keys()).collect();
        let fields = keys
            .into_iter()
            .map(|key| (key.clone(), field_delta(a.get(key), b.get(key))))
            .collect();

        ComparisonResult {
            fields,
            similarity_score: self.compute_similarity_score(a, b),
        }
    }

    /// Classifies the change between the means of two series.
    ///
    /// The percent change of the means is compared against the configured
    /// threshold in both directions; an empty side gives [`Trend::NoData`].
    pub fn compare_time_series(&self, first: &[f64], second: &[f64]) -> TimeSeriesComparison {
        if first.is_empty() || second.is_empty() {
            debug!(
                first_len = first.len(),
                second_len = second.len(),
                "series comparison has no data"
            );
            return TimeSeriesComparison::no_data();
        }

        let mean1 = statistics::mean(first);
        let mean2 = statistics::mean(second);
        let change = statistics::percent_change(mean1, mean2);
        let threshold = self.config.trend_threshold_pct;
        let trend = if change > threshold {
            Trend::Increase
        } else if change < -threshold {
            Trend::Decrease
        } else {
            Trend::Stable
        };

        TimeSeriesComparison {
            delta: Some(SeriesDelta {
                mean1,
                mean2,
                percent_change: PercentChange::new(change),
            }),
            trend,
        }
    }

    /// `1 / (1 + d)` where `d` is the Euclidean distance over the keys that
    /// hold numbers in both records, rounded to the configured decimals.
    ///
    /// Returns `0.0` when the records share no numeric key, which reads the
    /// same as "maximally dissimilar".
    pub fn compute_similarity_score(&self, a: &CanonicalRecord, b: &CanonicalRecord) -> f64 {
        let (left, right): (Vec<f64>, Vec<f64>) = a
            .numeric_fields()
            .filter_map(|(key, value)| b.number(key).map(|other| (value, other)))
            .unzip();
        if left.is_empty() {
            return 0.0;
        }

        // both vectors come from the same key list, so lengths always match
        let distance = statistics::euclidean_distance(&left, &right).unwrap_or(f64::INFINITY);
        round_to(1.0 / (1.0 + distance), self.config.similarity_decimals)
    }
}

fn field_delta(a: Option<&RecordValue>, b: Option<&RecordValue>) -> FieldDelta {
    match (a.and_then(RecordValue::as_f64), b.and_then(RecordValue::as_f64)) {
        (Some(value_a), Some(value_b)) => FieldDelta::Numeric {
            value_a,
            value_b,
            percent_change: PercentChange::new(statistics::percent_change(value_a, value_b)),
        },
        _ => {
            let value_a = a.cloned().unwrap_or_default();
            let value_b = b.cloned().unwrap_or_default();
            FieldDelta::Categorical {
                equal: value_a == value_b,
                value_a,
                value_b,
            }
        }
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    if !scale.is_finite() {
        return value;
    }
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, RecordValue)]) -> CanonicalRecord {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn identical_numeric_records_are_fully_similar() {
        let a = record(&[("brightness", 4.5.into()), ("distance_km", 10.0.into())]);
        let engine = ComparisonEngine::default();
        assert_eq!(engine.compute_similarity_score(&a, &a.clone()), 1.0);
    }

    #[test]
    fn no_shared_numeric_keys_scores_zero() {
        let a = record(&[("brightness", 4.5.into())]);
        let b = record(&[("brightness", "bright".into()), ("mass_kg", 1.0.into())]);
        assert_eq!(ComparisonEngine::default().compute_similarity_score(&a, &b), 0.0);
    }

    #[test]
    fn similarity_is_rounded() {
        // distance 2 => 1/3
        let a = record(&[("x", 0.0.into())]);
        let b = record(&[("x", 2.0.into())]);
        let engine = ComparisonEngine::default();
        assert_eq!(engine.compute_similarity_score(&a, &b), 0.333);

        let precise = ComparisonEngine::new(NexusConfig::new().with_similarity_decimals(1));
        assert_eq!(precise.compute_similarity_score(&a, &b), 0.3);
    }

    #[test]
    fn number_never_equals_matching_text() {
        let a = record(&[("id", 5.0.into())]);
        let b = record(&[("id", "5".into())]);
        let result = ComparisonEngine::default().compare_datasets(&a, &b);
        assert_eq!(
            result.get("id"),
            Some(&FieldDelta::Categorical {
                value_a: 5.0.into(),
                value_b: "5".into(),
                equal: false,
            })
        );
    }

    #[test]
    fn missing_side_compares_as_absent() {
        let a = record(&[("object_type", "star".into())]);
        let b = CanonicalRecord::default();
        let result = ComparisonEngine::default().compare_datasets(&a, &b);
        assert_eq!(
            result.get("object_type"),
            Some(&FieldDelta::Categorical {
                value_a: "star".into(),
                value_b: RecordValue::Absent,
                equal: false,
            })
        );
        assert_eq!(result.similarity_score, 0.0);
    }

    #[test]
    fn trend_thresholds() {
        let engine = ComparisonEngine::default();
        assert_eq!(engine.compare_time_series(&[1.0, 1.0, 1.0], &[2.0, 2.0, 2.0]).trend, Trend::Increase);
        assert_eq!(engine.compare_time_series(&[2.0], &[1.0]).trend, Trend::Decrease);
        assert_eq!(engine.compare_time_series(&[100.0], &[104.0]).trend, Trend::Stable);
        assert!(engine.compare_time_series(&[], &[1.0]).is_no_data());
        assert!(engine.compare_time_series(&[1.0], &[]).is_no_data());
    }

    #[test]
    fn custom_threshold_changes_classification() {
        let engine = ComparisonEngine::new(NexusConfig::new().with_trend_threshold_pct(1.0));
        assert_eq!(engine.compare_time_series(&[100.0], &[104.0]).trend, Trend::Increase);
    }

    #[test]
    fn zero_baseline_is_an_infinite_increase() {
        let result = ComparisonEngine::default().compare_time_series(&[0.0], &[3.0]);
        assert_eq!(result.trend, Trend::Increase);
        assert_eq!(result.delta.unwrap().percent_change, PercentChange::INFINITY);
    }
}
