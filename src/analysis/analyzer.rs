//! One-city analysis: ties the individual estimators into an `AnalysisResult`.

use tracing::debug;

use crate::analysis::{
    compute_basic_stats, compute_monthly_cycle, compute_profile, compute_rolling, compute_trend, flag_anomalies,
};
use crate::domain::{AnalysisConfig, AnalysisResult, CitySeries, TrendDirection};
use crate::error::AnalysisError;

/// Stateless analyzer. Safe to share across threads; each call only reads its
/// input series.
#[derive(Debug, Clone, Copy)]
pub struct TemperatureAnalyzer {
    config: AnalysisConfig,
}

impl TemperatureAnalyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        if config.window == 0 {
            return Err(AnalysisError::MalformedInput(
                "rolling window must be at least 1".to_string(),
            ));
        }
        if !(config.sigma.is_finite() && config.sigma > 0.0) {
            return Err(AnalysisError::MalformedInput(format!(
                "anomaly sigma must be finite and > 0, got {}",
                config.sigma
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> AnalysisConfig {
        self.config
    }

    pub fn analyze(&self, series: &CitySeries) -> Result<AnalysisResult, AnalysisError> {
        let observations = series.observations();

        let basic = compute_basic_stats(observations)?;
        let rolling = compute_rolling(observations, self.config.window)?;
        let anomalies = flag_anomalies(&rolling, self.config.sigma);
        let season_profile = compute_profile(observations);
        let monthly_cycle = compute_monthly_cycle(observations);
        let trend = compute_trend(observations)?;

        debug!(
            city = series.city(),
            n = observations.len(),
            anomalies = anomalies.len(),
            seasons = season_profile.len(),
            trend,
            "city analyzed"
        );

        Ok(AnalysisResult {
            city: series.city().to_string(),
            n_observations: observations.len(),
            average_temperature: basic.mean,
            min_temperature: basic.min,
            max_temperature: basic.max,
            season_profile,
            monthly_cycle,
            trend,
            trend_direction: TrendDirection::from_slope(trend),
            rolling,
            anomalies,
            window: self.config.window,
            sigma: self.config.sigma,
        })
    }
}
