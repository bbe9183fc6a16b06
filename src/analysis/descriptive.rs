//! Whole-series descriptive statistics.

use crate::domain::{BasicStats, Observation};
use crate::error::AnalysisError;
use crate::math::{mean, min_max};

/// Mean, min and max temperature. An empty series is an error, not `NaN`.
pub fn compute_basic_stats(observations: &[Observation]) -> Result<BasicStats, AnalysisError> {
    let temps: Vec<f64> = observations.iter().map(|o| o.temperature).collect();

    let mean = mean(&temps).ok_or(AnalysisError::EmptySeries)?;
    let (min, max) = min_max(&temps).ok_or(AnalysisError::EmptySeries)?;

    Ok(BasicStats { mean, min, max })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::Season;

    fn obs(temperature: f64) -> Observation {
        Observation {
            timestamp: NaiveDate::from_ymd_opt(2023, 6, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            city: "Tokyo".to_string(),
            temperature,
            season: Season::Summer,
        }
    }

    #[test]
    fn basic_stats_over_series() {
        let data = [obs(20.0), obs(26.0), obs(23.0)];
        let stats = compute_basic_stats(&data).unwrap();
        assert_eq!(stats.mean, 23.0);
        assert_eq!(stats.min, 20.0);
        assert_eq!(stats.max, 26.0);
    }

    #[test]
    fn constant_series_collapses() {
        let data = vec![obs(-7.5); 12];
        let stats = compute_basic_stats(&data).unwrap();
        assert_eq!(stats.min, -7.5);
        assert_eq!(stats.max, -7.5);
        assert!((stats.mean + 7.5).abs() < 1e-12);
    }

    #[test]
    fn empty_series_is_an_error() {
        assert_eq!(compute_basic_stats(&[]), Err(AnalysisError::EmptySeries));
    }
}
