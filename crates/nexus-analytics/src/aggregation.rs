//! Grouping folds over collections of canonical records.
//!
//! Group keys are the field's exact value: no trimming, no case folding.
//! Text keys are used as-is, other scalars by their display form, and a
//! missing or `null` field counts as `"unknown"`.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use nexus_model::{CanonicalRecord, GroupRollup, RecordValue, SummaryStatistics, TimeWindowSummary};
use tracing::{debug, trace};

use crate::statistics;

/// Label used for records that lack the grouping field.
pub const UNKNOWN_GROUP: &str = "unknown";

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Year of an ISO 8601 date or datetime string.
///
/// Accepts RFC 3339 timestamps (`2019-04-10T13:00:00Z`), naive datetimes,
/// and plain dates (`2019-04-10`).
pub fn parse_year(text: &str) -> Option<i32> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.year());
    }
    if let Some(dt) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(dt.year());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|date| date.year())
}

/// Numeric values of `field` across records, skipping records without one.
pub fn field_values(records: &[CanonicalRecord], field: &str) -> Vec<f64> {
    records.iter().filter_map(|r| r.number(field)).collect()
}

/// Year span of `time_field` plus the mean and range of `value_field`.
///
/// Returns `None` when no record has a parseable date. The value field is
/// collected from every record that holds a number there, dated or not.
pub fn aggregate_by_time(
    records: &[CanonicalRecord],
    time_field: &str,
    value_field: &str,
) -> Option<TimeWindowSummary> {
    let years: Vec<i32> = records
        .iter()
        .filter_map(|record| record.text(time_field))
        .filter_map(|text| {
            let year = parse_year(text);
            if year.is_none() {
                trace!(value = text, "unparseable date skipped");
            }
            year
        })
        .collect();

    let (Some(first), Some(last)) = (years.iter().min(), years.iter().max()) else {
        debug!(time_field, "no parseable dates, time aggregation is empty");
        return None;
    };

    let values = field_values(records, value_field);
    Some(TimeWindowSummary {
        time_window: format!("{first}–{last}"),
        mean: statistics::mean(&values),
        range: [statistics::min(&values), statistics::max(&values)],
    })
}

/// Number of records per value of `field`.
pub fn aggregate_by_region(records: &[CanonicalRecord], field: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(group_key(record, field)).or_insert(0) += 1;
    }
    counts
}

/// Per-value rollup of `field`.
///
/// Each group carries its record count. When `value_field` is given, each
/// group also carries statistics over that field's numbers within the group.
pub fn aggregate_by_object_type(
    records: &[CanonicalRecord],
    field: &str,
    value_field: Option<&str>,
    confidence: f64,
) -> BTreeMap<String, GroupRollup> {
    let mut groups: BTreeMap<String, (usize, Vec<f64>)> = BTreeMap::new();
    for record in records {
        let (count, values) = groups.entry(group_key(record, field)).or_default();
        *count += 1;
        if let Some(value) = value_field.and_then(|name| record.number(name)) {
            values.push(value);
        }
    }

    groups
        .into_iter()
        .map(|(key, (count, values))| {
            let rollup = GroupRollup {
                count,
                statistics: value_field.map(|_| statistics::summary(&values, confidence)),
            };
            (key, rollup)
        })
        .collect()
}

/// Summary statistics over the numbers in `field` across records.
pub fn compute_summary_metrics(
    records: &[CanonicalRecord],
    field: &str,
    confidence: f64,
) -> SummaryStatistics {
    statistics::summary(&field_values(records, field), confidence)
}

fn group_key(record: &CanonicalRecord, field: &str) -> String {
    match record.get(field) {
        None | Some(RecordValue::Absent) => UNKNOWN_GROUP.to_string(),
        Some(RecordValue::Text(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_model::fields;

    fn region(name: &str) -> CanonicalRecord {
        [(fields::COORDINATE_SYSTEM, name)].into_iter().collect()
    }

    #[test]
    fn parses_common_iso_forms() {
        assert_eq!(parse_year("2019-04-10"), Some(2019));
        assert_eq!(parse_year("2019-04-10T13:00:00Z"), Some(2019));
        assert_eq!(parse_year("2020-01-01T00:00:00.000+02:00"), Some(2020));
        assert_eq!(parse_year("2021-06-30T08:15:00"), Some(2021));
        assert_eq!(parse_year("2022-02-02 10:00:00"), Some(2022));
        assert_eq!(parse_year("April 2019"), None);
        assert_eq!(parse_year(""), None);
    }

    #[test]
    fn region_counts_by_exact_value() {
        let records = vec![region("Mars"), region("Mars"), region("Earth"), region("mars")];
        let counts = aggregate_by_region(&records, fields::COORDINATE_SYSTEM);
        assert_eq!(counts.get("Mars"), Some(&2));
        assert_eq!(counts.get("Earth"), Some(&1));
        assert_eq!(counts.get("mars"), Some(&1));
    }

    #[test]
    fn missing_and_null_keys_are_unknown() {
        let records = vec![
            CanonicalRecord::default(),
            [(fields::COORDINATE_SYSTEM, RecordValue::Absent)]
                .into_iter()
                .collect(),
        ];
        let counts = aggregate_by_region(&records, fields::COORDINATE_SYSTEM);
        assert_eq!(counts.get(UNKNOWN_GROUP), Some(&2));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn numeric_keys_use_display_form() {
        let records: Vec<CanonicalRecord> = vec![[("zone", 3.5)].into_iter().collect()];
        let counts = aggregate_by_region(&records, "zone");
        assert_eq!(counts.get("3.5"), Some(&1));
    }

    #[test]
    fn object_rollups_without_value_field_only_count() {
        let records: Vec<CanonicalRecord> = ["star", "planet", "star"]
            .into_iter()
            .map(|kind| [(fields::OBJECT_TYPE, kind)].into_iter().collect())
            .collect();
        let rollups = aggregate_by_object_type(&records, fields::OBJECT_TYPE, None, 1.96);
        assert_eq!(rollups["star"], GroupRollup { count: 2, statistics: None });
        assert_eq!(rollups["planet"].count, 1);
    }

    #[test]
    fn empty_time_aggregation_is_none() {
        let records: Vec<CanonicalRecord> =
            vec![[(fields::DATE_CREATED, "not a date")].into_iter().collect()];
        assert_eq!(
            aggregate_by_time(&records, fields::DATE_CREATED, fields::BRIGHTNESS),
            None
        );
        assert_eq!(aggregate_by_time(&[], fields::DATE_CREATED, fields::BRIGHTNESS), None);
    }
}
