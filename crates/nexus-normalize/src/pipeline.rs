//! Normalization pipeline: raw record in, canonical record out.
//!
//! Steps, each driven only by which raw fields are present:
//!
//! 1. Schema mapping ([`SchemaMapper`]) produces the base canonical fields.
//! 2. Unit rules attach converted quantities, e.g. `distance_miles` becomes
//!    `distance_km`.
//! 3. When both a latitude and a longitude are present, the position is
//!    attached as `coordinates_cartesian = {x, y, z}` at the configured radius.
//!
//! The pipeline holds no mutable state and reads no clock, so normalizing the
//! same raw record twice yields identical output. Timestamping a run is the
//! caller's business.

use std::collections::BTreeMap;

use nexus_model::{
    ConversionError, NexusConfig, NormalizationOutcome, RawRecord, RecordValue, fields,
};
use tracing::{debug, debug_span, field, info, warn};

use crate::coordinates::latlon_to_cartesian;
use crate::numeric::coerce_f64;
use crate::schema::{MappedFields, SchemaMapper};
use crate::units;

/// Scalar conversion applied to a raw quantity.
pub type Converter = fn(f64) -> f64;

/// Raw field names accepted as latitude, highest priority first.
pub const LATITUDE_FIELDS: [&str; 2] = ["lat", "latitude"];
/// Raw field names accepted as longitude, highest priority first.
pub const LONGITUDE_FIELDS: [&str; 2] = ["lon", "longitude"];

/// Derives one canonical quantity from the first present raw source.
#[derive(Debug, Clone)]
pub struct UnitRule {
    pub target: String,
    pub sources: Vec<(String, Converter)>,
}

impl UnitRule {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            sources: Vec::new(),
        }
    }

    /// Appends a raw source and the conversion into the target unit.
    #[must_use]
    pub fn source(mut self, field: impl Into<String>, convert: Converter) -> Self {
        self.sources.push((field.into(), convert));
        self
    }

    fn lookup<'a>(&'a self, raw: &'a RawRecord) -> Option<(&'a str, &'a RecordValue, Converter)> {
        self.sources.iter().find_map(|(field, convert)| {
            raw.present(field)
                .map(|value| (field.as_str(), value, *convert))
        })
    }
}

fn identity(value: f64) -> f64 {
    value
}

/// Default quantity rules: distance, mass, temperature, energy.
pub fn default_unit_rules() -> Vec<UnitRule> {
    vec![
        UnitRule::new(fields::DISTANCE_KM)
            .source("distance_miles", units::miles_to_km)
            .source("distance_au", units::au_to_km)
            .source("distance_ly", units::lightyears_to_km)
            .source("distance_pc", units::parsecs_to_km),
        UnitRule::new(fields::MASS_KG)
            .source("mass_solar", units::solar_masses_to_kg)
            .source("mass_earth", units::earth_masses_to_kg),
        UnitRule::new(fields::TEMPERATURE_K)
            .source("temperature_k", identity)
            .source("temperature_c", units::celsius_to_kelvin)
            .source("temperature_f", units::fahrenheit_to_kelvin),
        UnitRule::new(fields::ENERGY_EV).source("energy_j", units::joules_to_ev),
    ]
}

/// Canonicalizes raw records.
#[derive(Debug, Clone)]
pub struct NormalizationPipeline {
    mapper: SchemaMapper,
    unit_rules: Vec<UnitRule>,
    config: NexusConfig,
}

impl Default for NormalizationPipeline {
    fn default() -> Self {
        Self::new(NexusConfig::default())
    }
}

impl NormalizationPipeline {
    pub fn new(config: NexusConfig) -> Self {
        Self {
            mapper: SchemaMapper::default(),
            unit_rules: default_unit_rules(),
            config,
        }
    }

    #[must_use]
    pub fn with_mapper(mut self, mapper: SchemaMapper) -> Self {
        self.mapper = mapper;
        self
    }

    /// Adds a unit rule, replacing any existing rule for the same target.
    #[must_use]
    pub fn with_unit_rule(mut self, rule: UnitRule) -> Self {
        match self.unit_rules.iter_mut().find(|r| r.target == rule.target) {
            Some(existing) => *existing = rule,
            None => self.unit_rules.push(rule),
        }
        self
    }

    pub fn config(&self) -> &NexusConfig {
        &self.config
    }

    pub fn mapper(&self) -> &SchemaMapper {
        &self.mapper
    }

    /// Normalizes one raw record.
    ///
    /// Conversion failures do not stop the run: the affected derived field is
    /// left out and the error is returned in the outcome.
    pub fn normalize(&self, raw: &RawRecord) -> NormalizationOutcome {
        let span = debug_span!("normalize", nasa_id = field::Empty);
        let _guard = span.enter();

        let MappedFields {
            fields: mut canonical,
            mut errors,
            gaps,
        } = self.mapper.map_raw_to_standard(raw);
        let nasa_id = canonical.get(fields::NASA_ID).and_then(RecordValue::as_str);
        span.record("nasa_id", nasa_id.unwrap_or("-"));

        for rule in &self.unit_rules {
            apply_unit_rule(rule, raw, &mut canonical, &mut errors);
        }
        self.attach_coordinates(raw, &mut canonical, &mut errors);

        for error in &errors {
            warn!(field = %error.field, actual = %error.actual, "conversion failed");
        }
        if !gaps.is_empty() {
            debug!(gap_count = gaps.len(), "required fields missing from raw record");
        }

        NormalizationOutcome {
            record: canonical.into(),
            errors,
            gaps,
            normalization_version: self.config.normalization_version.clone(),
        }
    }

    /// Normalizes records one by one; output `i` belongs to input `i`.
    pub fn normalize_batch(&self, raws: &[RawRecord]) -> Vec<NormalizationOutcome> {
        let outcomes: Vec<NormalizationOutcome> =
            raws.iter().map(|raw| self.normalize(raw)).collect();
        let failed = outcomes.iter().filter(|o| o.has_errors()).count();
        info!(
            record_count = outcomes.len(),
            with_errors = failed,
            "normalization batch complete"
        );
        outcomes
    }

    fn attach_coordinates(
        &self,
        raw: &RawRecord,
        canonical: &mut BTreeMap<String, RecordValue>,
        errors: &mut Vec<ConversionError>,
    ) {
        let lat = first_present(raw, &LATITUDE_FIELDS);
        let lon = first_present(raw, &LONGITUDE_FIELDS);
        let (Some((lat_field, lat_value)), Some((lon_field, lon_value))) = (lat, lon) else {
            if lat.is_some() || lon.is_some() {
                debug!("only one of latitude/longitude present, skipping coordinates");
            }
            return;
        };

        let lat = coerce_f64(lat_field, lat_value);
        let lon = coerce_f64(lon_field, lon_value);
        match (lat, lon) {
            (Ok(lat), Ok(lon)) => {
                let position = latlon_to_cartesian(lat, lon, self.config.earth_radius_km);
                canonical.insert(
                    fields::COORDINATES_CARTESIAN.to_string(),
                    position.to_record_value(),
                );
            }
            (lat, lon) => {
                errors.extend(lat.err());
                errors.extend(lon.err());
            }
        }
    }
}

fn apply_unit_rule(
    rule: &UnitRule,
    raw: &RawRecord,
    canonical: &mut BTreeMap<String, RecordValue>,
    errors: &mut Vec<ConversionError>,
) {
    let Some((field, value, convert)) = rule.lookup(raw) else {
        return;
    };
    match coerce_f64(field, value) {
        Ok(quantity) => {
            canonical.insert(rule.target.clone(), RecordValue::Number(convert(quantity)));
        }
        Err(error) => errors.push(error),
    }
}

fn first_present<'a>(raw: &'a RawRecord, names: &[&'a str]) -> Option<(&'a str, &'a RecordValue)> {
    names
        .iter()
        .find_map(|name| raw.present(name).map(|value| (*name, value)))
}
