//! Record normalization for Nexus.
//!
//! This crate turns raw ingestion payloads into canonical records:
//!
//! - **units**: distance, mass, temperature, and energy conversions
//! - **coordinates**: latitude/longitude to Cartesian and back
//! - **schema**: rule-driven mapping of raw field names to canonical ones
//! - **numeric**: coercion of raw values to numbers
//! - **pipeline**: the [`NormalizationPipeline`] tying the above together

pub mod coordinates;
pub mod numeric;
pub mod pipeline;
pub mod schema;
pub mod units;

// Re-export common items for external use
pub use coordinates::{EARTH_RADIUS_KM, cartesian_to_latlon, latlon_to_cartesian};
pub use numeric::{coerce_f64, parse_f64};
pub use pipeline::{NormalizationPipeline, UnitRule, default_unit_rules};
pub use schema::{FieldKind, FieldRule, MappedFields, Presence, SchemaMapper};
