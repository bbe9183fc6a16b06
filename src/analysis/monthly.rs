//! Annual cycle: temperature mean/std per calendar month.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::domain::{MonthlyStats, Observation};
use crate::math::mean_and_std;

const BAND_SIGMA: f64 = 2.0;

/// Mean, sample std and a `mean ± 2σ` band per calendar month (Jan → Dec).
///
/// Only months with data appear.
pub fn compute_monthly_cycle(observations: &[Observation]) -> Vec<MonthlyStats> {
    let mut months: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for obs in observations {
        months.entry(obs.timestamp.month()).or_default().push(obs.temperature);
    }

    months
        .into_iter()
        .filter_map(|(month, temps)| {
            let (mean, std) = mean_and_std(&temps)?;
            Some(MonthlyStats {
                month,
                mean,
                std,
                lower_bound: std.map(|s| mean - BAND_SIGMA * s),
                upper_bound: std.map(|s| mean + BAND_SIGMA * s),
                count: temps.len(),
            })
        })
        .collect()
}
