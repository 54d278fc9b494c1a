//! Tunable parameters for normalization and analytics.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
pub const DEFAULT_EARTH_RADIUS_KM: f64 = 6371.0;

/// z-score for a 95% confidence interval.
pub const DEFAULT_CONFIDENCE: f64 = 1.96;

/// Percent change of means beyond which a trend counts as increase/decrease.
pub const DEFAULT_TREND_THRESHOLD_PCT: f64 = 5.0;

/// Decimal places kept in similarity scores.
pub const DEFAULT_SIMILARITY_DECIMALS: u32 = 3;

/// Version label stamped on normalization outcomes.
pub const DEFAULT_NORMALIZATION_VERSION: &str = "v1.0";

/// Configuration passed explicitly into the pipeline and engines.
///
/// There is no process-wide instance; each component keeps its own copy, so
/// tests can run side by side with different settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NexusConfig {
    /// Sphere radius used for latitude/longitude to Cartesian conversion.
    pub earth_radius_km: f64,
    /// Multiplier applied to the standard error in `error_margin`.
    pub confidence: f64,
    /// Symmetric threshold (in percent) for trend classification.
    pub trend_threshold_pct: f64,
    /// Rounding applied to similarity scores.
    pub similarity_decimals: u32,
    pub normalization_version: String,
}

impl Default for NexusConfig {
    fn default() -> Self {
        Self {
            earth_radius_km: DEFAULT_EARTH_RADIUS_KM,
            confidence: DEFAULT_CONFIDENCE,
            trend_threshold_pct: DEFAULT_TREND_THRESHOLD_PCT,
            similarity_decimals: DEFAULT_SIMILARITY_DECIMALS,
            normalization_version: DEFAULT_NORMALIZATION_VERSION.to_string(),
        }
    }
}

impl NexusConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_earth_radius_km(mut self, radius: f64) -> Self {
        self.earth_radius_km = radius;
        self
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    #[must_use]
    pub fn with_trend_threshold_pct(mut self, threshold: f64) -> Self {
        self.trend_threshold_pct = threshold;
        self
    }

    #[must_use]
    pub fn with_similarity_decimals(mut self, decimals: u32) -> Self {
        self.similarity_decimals = decimals;
        self
    }

    #[must_use]
    pub fn with_normalization_version(mut self, version: impl Into<String>) -> Self {
        self.normalization_version = version.into();
        self
    }
}
