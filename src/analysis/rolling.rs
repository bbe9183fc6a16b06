//! Season-partitioned rolling statistics and anomaly flagging.
//!
//! The window is **not** a chronological window over the whole series. Rows
//! are first partitioned by their season label, then a trailing window of up
//! to `window` rows rolls over each partition in its original row order. With
//! multi-year data the window for a December day can therefore reach back into
//! the previous February, because both rows share the `winter` label.
//!
//! Window semantics:
//! - `min_periods = 1`: the first row of a partition gets a window of one
//! - std is the sample std, so a one-row window has `NaN` std
//! - any comparison against a `NaN` band is false, so such rows are never
//!   flagged

use std::collections::BTreeMap;

use crate::domain::{AnomalyRecord, Observation, RollingPoint, Season};
use crate::error::AnalysisError;
use crate::math::{mean, sample_std};

/// Rolling mean/std per row, computed within each season partition.
///
/// Output is in the input row order.
pub fn compute_rolling(observations: &[Observation], window: usize) -> Result<Vec<RollingPoint>, AnalysisError> {
    if window == 0 {
        return Err(AnalysisError::MalformedInput(
            "rolling window must be at least 1".to_string(),
        ));
    }

    let mut partitions: BTreeMap<Season, Vec<usize>> = BTreeMap::new();
    for (idx, obs) in observations.iter().enumerate() {
        partitions.entry(obs.season).or_default().push(idx);
    }

    let mut slots: Vec<Option<RollingPoint>> = vec![None; observations.len()];

    for rows in partitions.values() {
        let temps: Vec<f64> = rows.iter().map(|&i| observations[i].temperature).collect();

        for (pos, &row) in rows.iter().enumerate() {
            let start = (pos + 1).saturating_sub(window);
            let win = &temps[start..=pos];
            let obs = &observations[row];

            slots[row] = Some(RollingPoint {
                timestamp: obs.timestamp,
                season: obs.season,
                temperature: obs.temperature,
                rolling_mean: mean(win).unwrap_or(f64::NAN),
                rolling_std: sample_std(win).unwrap_or(f64::NAN),
                window_len: win.len(),
            });
        }
    }

    Ok(slots.into_iter().flatten().collect())
}

/// `true` iff `temperature` lies strictly outside `mean ± sigma * std`.
///
/// Returns `false` whenever `std` (or `mean`) is `NaN`.
pub fn is_anomalous(temperature: f64, rolling_mean: f64, rolling_std: f64, sigma: f64) -> bool {
    temperature > rolling_mean + sigma * rolling_std || temperature < rolling_mean - sigma * rolling_std
}

/// Rows outside their rolling band, in row order.
pub fn flag_anomalies(rolling: &[RollingPoint], sigma: f64) -> Vec<AnomalyRecord> {
    rolling
        .iter()
        .filter(|p| is_anomalous(p.temperature, p.rolling_mean, p.rolling_std, sigma))
        .map(|p| AnomalyRecord {
            timestamp: p.timestamp,
            temperature: p.temperature,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;

    fn series(rows: &[(Season, f64)]) -> Vec<Observation> {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        rows.iter()
            .enumerate()
            .map(|(i, &(season, temperature))| Observation {
                timestamp: start + Duration::days(i as i64),
                city: "Berlin".to_string(),
                temperature,
                season,
            })
            .collect()
    }

    #[test]
    fn window_rolls_within_season_partition() {
        use Season::*;
        let obs = series(&[(Winter, 0.0), (Summer, 20.0), (Winter, 2.0), (Summer, 22.0)]);

        let rolling = compute_rolling(&obs, 30).unwrap();

        // Row order preserved.
        let seasons: Vec<Season> = rolling.iter().map(|p| p.season).collect();
        assert_eq!(seasons, vec![Winter, Summer, Winter, Summer]);

        assert_eq!(rolling[2].rolling_mean, 1.0);
        assert_eq!(rolling[3].rolling_mean, 21.0);
        assert_eq!(rolling[2].window_len, 2);
        assert!((rolling[2].rolling_std - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn first_row_of_each_partition_has_undefined_std_and_is_not_flagged() {
        use Season::*;
        // Extreme values on partition heads must still not be flagged.
        let obs = series(&[(Spring, 1000.0), (Autumn, -1000.0), (Spring, 5.0)]);

        let rolling = compute_rolling(&obs, 30).unwrap();
        assert!(rolling[0].rolling_std.is_nan());
        assert!(rolling[1].rolling_std.is_nan());
        assert!(rolling[2].rolling_std.is_finite());

        let anomalies = flag_anomalies(&rolling, 2.0);
        assert!(anomalies.iter().all(|a| a.temperature != 1000.0 && a.temperature != -1000.0));
    }

    #[test]
    fn window_is_capped() {
        let rows: Vec<(Season, f64)> = (0..40).map(|i| (Season::Winter, i as f64)).collect();
        let obs = series(&rows);

        let rolling = compute_rolling(&obs, 30).unwrap();
        assert_eq!(rolling[39].window_len, 30);
        // Mean of 10..=39.
        assert!((rolling[39].rolling_mean - 24.5).abs() < 1e-12);
        assert_eq!(rolling[5].window_len, 6);
    }

    #[test]
    fn spike_is_flagged() {
        let mut rows: Vec<(Season, f64)> = (0..10)
            .map(|i| (Season::Winter, if i % 2 == 0 { 0.0 } else { 1.0 }))
            .collect();
        rows.push((Season::Winter, 30.0));
        let obs = series(&rows);

        let rolling = compute_rolling(&obs, 30).unwrap();
        let anomalies = flag_anomalies(&rolling, 2.0);

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].temperature, 30.0);
        assert_eq!(anomalies[0].timestamp, obs[10].timestamp);
    }

    #[test]
    fn constant_partition_never_flags() {
        let rows: Vec<(Season, f64)> = (0..45).map(|_| (Season::Summer, 0.1)).collect();
        let obs = series(&rows);

        let rolling = compute_rolling(&obs, 30).unwrap();
        assert!(flag_anomalies(&rolling, 2.0).is_empty());
    }

    #[test]
    fn nan_band_comparisons_are_false() {
        assert!(!is_anomalous(1e9, 0.0, f64::NAN, 2.0));
        assert!(!is_anomalous(-1e9, 0.0, f64::NAN, 2.0));
        assert!(is_anomalous(5.1, 0.0, 2.5, 2.0));
        assert!(!is_anomalous(5.0, 0.0, 2.5, 2.0));
    }

    #[test]
    fn zero_window_is_rejected() {
        let obs = series(&[(Season::Winter, 1.0)]);
        assert!(matches!(
            compute_rolling(&obs, 0),
            Err(AnalysisError::MalformedInput(_))
        ));
    }
}
