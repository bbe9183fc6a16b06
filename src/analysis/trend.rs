//! Linear trend of temperature over time.
//!
//! The time axis is fractional days since the Unix epoch, so the slope is in
//! °C per day. Multiply by 365.25 for a per-year rate.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::domain::Observation;
use crate::error::AnalysisError;
use crate::math::fit_line;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Timestamp as fractional days since 1970-01-01T00:00:00.
pub fn epoch_days(ts: NaiveDateTime) -> f64 {
    ts.and_utc().timestamp_millis() as f64 / MS_PER_DAY
}

/// OLS slope of temperature on time (°C/day).
///
/// Needs at least two distinct timestamps. A constant-temperature series
/// returns exactly `0.0`.
pub fn compute_trend(observations: &[Observation]) -> Result<f64, AnalysisError> {
    if observations.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }

    let distinct: BTreeSet<NaiveDateTime> = observations.iter().map(|o| o.timestamp).collect();
    if distinct.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            operation: "trend fit",
            needed: 2,
            have: distinct.len(),
        });
    }

    let first = observations[0].temperature;
    if observations.iter().all(|o| o.temperature == first) {
        return Ok(0.0);
    }

    let x: Vec<f64> = observations.iter().map(|o| epoch_days(o.timestamp)).collect();
    let y: Vec<f64> = observations.iter().map(|o| o.temperature).collect();

    let fit = fit_line(&x, &y)
        .ok_or_else(|| AnalysisError::DegenerateFit("least squares solve did not converge".to_string()))?;

    Ok(fit.slope)
}
