//! Descriptive statistics over numeric sequences.
//!
//! Every function returns `0.0` for an empty slice instead of failing. Callers
//! that need to tell "no data" apart from a genuine zero must check the input
//! length themselves.

use nexus_model::{NexusError, Result, SummaryStatistics};

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Middle value; the average of the two middle values for even lengths.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

/// Population standard deviation (divisor `n`).
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean(values);
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Percent change from `a` to `b`: `(b - a) / |a| * 100`.
///
/// `percent_change(0, 0)` is `0.0` and `percent_change(0, b)` is `+inf` for
/// any non-zero `b`, whatever its sign.
pub fn percent_change(a: f64, b: f64) -> f64 {
    if a == 0.0 {
        return if b == 0.0 { 0.0 } else { f64::INFINITY };
    }
    (b - a) / a.abs() * 100.0
}

/// Euclidean distance between two vectors of equal length.
///
/// # Errors
///
/// Returns [`NexusError::DimensionMismatch`] when the lengths differ.
pub fn euclidean_distance(left: &[f64], right: &[f64]) -> Result<f64> {
    if left.len() != right.len() {
        return Err(NexusError::DimensionMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(left
        .iter()
        .zip(right)
        .map(|(a, b)| (a - b).powi(2))
        .sum::<f64>()
        .sqrt())
}

/// `confidence * std_dev / sqrt(n)`, the half-width of a normal confidence
/// interval around the mean.
pub fn error_margin(values: &[f64], confidence: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    confidence * (std_dev(values) / (values.len() as f64).sqrt())
}

pub fn summary(values: &[f64], confidence: f64) -> SummaryStatistics {
    SummaryStatistics {
        mean: mean(values),
        median: median(values),
        min: min(values),
        max: max(values),
        std_dev: std_dev(values),
        error_margin: error_margin(values, confidence),
    }
}
