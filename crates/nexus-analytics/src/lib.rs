//! Analytics over canonical Nexus records.
//!
//! # Overview
//!
//! - **statistics**: mean, median, spread, percent change, distances
//! - **aggregation**: grouping by time window, region, and object type
//! - **comparison**: record diffs, similarity scores, series trends
//! - **summary**: one-call statistics plus grouping for a single record
//!
//! Everything here is a pure function of its inputs. Empty inputs produce
//! neutral zeros or empty groupings rather than errors.

pub mod aggregation;
pub mod comparison;
pub mod statistics;
pub mod summary;

pub use aggregation::{
    UNKNOWN_GROUP, aggregate_by_object_type, aggregate_by_region, aggregate_by_time,
    compute_summary_metrics, parse_year,
};
pub use comparison::ComparisonEngine;
pub use summary::summarize_record;
