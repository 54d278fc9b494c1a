//! Shared types for the Nexus normalization pipeline and analytics engine.
//!
//! - [`value`]: the tagged [`RecordValue`] every record field holds
//! - [`record`]: [`RawRecord`] input and [`CanonicalRecord`] output
//! - [`results`]: comparison, aggregation, and statistics results
//! - [`options`]: [`NexusConfig`], the single tuning surface
//! - [`error`]: [`ConversionError`] and [`NexusError`]

pub mod error;
pub mod geometry;
pub mod normalization;
pub mod options;
pub mod percent;
pub mod record;
pub mod results;
pub mod value;

pub use error::{ConversionError, NexusError, Result};
pub use geometry::Cartesian;
pub use normalization::{NormalizationOutcome, SchemaGap};
pub use options::NexusConfig;
pub use percent::PercentChange;
pub use record::{CanonicalRecord, RawRecord, fields};
pub use results::{
    AggregationResult, ComparisonResult, DatasetSummary, FieldDelta, GroupRollup, SeriesDelta,
    SummaryStatistics, TimeSeriesComparison, TimeWindowSummary, Trend,
};
pub use value::RecordValue;
