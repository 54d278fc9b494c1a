//! Per-record dataset summary.

use std::slice;

use nexus_model::{AggregationResult, CanonicalRecord, DatasetSummary, NexusConfig, fields};

use crate::{aggregation, statistics};

/// Statistics over a record's numeric fields plus one grouping.
///
/// The grouping is an object-type rollup when the record carries
/// `object_type`, a region count when it carries `coordinate_system`, and
/// nothing otherwise.
pub fn summarize_record(record: &CanonicalRecord, config: &NexusConfig) -> DatasetSummary {
    let values: Vec<f64> = record.numeric_fields().map(|(_, value)| value).collect();
    let records = slice::from_ref(record);

    let aggregation = if record.contains(fields::OBJECT_TYPE) {
        Some(AggregationResult::ObjectRollups(
            aggregation::aggregate_by_object_type(
                records,
                fields::OBJECT_TYPE,
                None,
                config.confidence,
            ),
        ))
    } else if record.contains(fields::COORDINATE_SYSTEM) {
        Some(AggregationResult::RegionCounts(
            aggregation::aggregate_by_region(records, fields::COORDINATE_SYSTEM),
        ))
    } else {
        None
    };

    DatasetSummary {
        statistics: statistics::summary(&values, config.confidence),
        aggregation,
    }
}
