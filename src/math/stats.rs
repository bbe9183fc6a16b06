//! Sample statistics over `f64` slices.
//!
//! Conventions:
//! - std is the **sample** standard deviation (`n - 1` denominator)
//! - a single value has no defined std (`None`)
//! - empty input has no defined mean (`None`)

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (two-pass).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let n = values.len() as f64;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1.0);
    Some(variance.sqrt())
}

/// Mean and sample std in one call.
pub fn mean_and_std(values: &[f64]) -> Option<(f64, Option<f64>)> {
    Some((mean(values)?, sample_std(values)))
}

/// Minimum and maximum.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let (first, rest) = values.split_first()?;
    Some(rest.iter().fold((*first, *first), |(lo, hi), &v| (lo.min(v), hi.max(v))))
}
