//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during analysis
//! - exported to JSON/CSV
//! - handed to any presentation layer as plain values

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Default trailing window (records) for rolling statistics.
pub const DEFAULT_WINDOW: usize = 30;

/// Default band half-width in standard deviations.
pub const DEFAULT_SIGMA: f64 = 2.0;

/// One of the four fixed season labels.
///
/// Variant order is the display order (winter first), and is what `Ord` uses
/// for the seasonal profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Autumn];

    pub fn as_str(self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Season::ALL
            .into_iter()
            .find(|season| season.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                AnalysisError::MalformedInput(format!(
                    "unknown season '{s}' (expected winter, spring, summer or autumn)"
                ))
            })
    }
}

/// A single historical record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub city: String,
    pub temperature: f64,
    pub season: Season,
}

/// One city's observations, in dataset order.
///
/// Construction guarantees the series is non-empty.
#[derive(Debug, Clone)]
pub struct CitySeries {
    city: String,
    observations: Vec<Observation>,
}

impl CitySeries {
    pub fn new(city: impl Into<String>, observations: Vec<Observation>) -> Result<Self, AnalysisError> {
        if observations.is_empty() {
            return Err(AnalysisError::EmptySeries);
        }
        Ok(Self {
            city: city.into(),
            observations,
        })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Rolling statistics for one record.
///
/// `rolling_std` is `NaN` when the trailing window holds a single record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RollingPoint {
    pub timestamp: NaiveDateTime,
    pub season: Season,
    pub temperature: f64,
    pub rolling_mean: f64,
    pub rolling_std: f64,
    pub window_len: usize,
}

impl RollingPoint {
    /// Lower/upper band at `sigma` standard deviations, if the std is defined.
    pub fn band(&self, sigma: f64) -> Option<(f64, f64)> {
        if !self.rolling_std.is_finite() {
            return None;
        }
        Some((
            self.rolling_mean - sigma * self.rolling_std,
            self.rolling_mean + sigma * self.rolling_std,
        ))
    }
}

/// A record flagged as anomalous by the rolling detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
}

/// Mean and sample std of one season over the whole series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonStats {
    pub mean: f64,
    /// `None` when the season holds a single observation.
    pub std: Option<f64>,
    pub count: usize,
}

/// Season → stats, one entry per season present in the data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeasonProfile {
    entries: BTreeMap<Season, SeasonStats>,
}

impl SeasonProfile {
    pub fn get(&self, season: Season) -> Result<&SeasonStats, AnalysisError> {
        self.entries
            .get(&season)
            .ok_or(AnalysisError::SeasonNotFound(season))
    }

    pub fn contains(&self, season: Season) -> bool {
        self.entries.contains_key(&season)
    }

    pub fn seasons(&self) -> impl Iterator<Item = Season> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Season, &SeasonStats)> + '_ {
        self.entries.iter().map(|(s, stats)| (*s, stats))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Season, SeasonStats)> for SeasonProfile {
    fn from_iter<I: IntoIterator<Item = (Season, SeasonStats)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Mean/std of one calendar month with a `mean ± 2σ` band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStats {
    /// 1 = January.
    pub month: u32,
    pub mean: f64,
    pub std: Option<f64>,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
    pub count: usize,
}

/// Sign of the fitted trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Warming,
    Cooling,
    Flat,
}

impl TrendDirection {
    /// Three-way classification of a slope. Exactly zero is `Flat`.
    pub fn from_slope(slope: f64) -> Self {
        match slope.partial_cmp(&0.0) {
            Some(std::cmp::Ordering::Greater) => TrendDirection::Warming,
            Some(std::cmp::Ordering::Less) => TrendDirection::Cooling,
            _ => TrendDirection::Flat,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TrendDirection::Warming => "positive (warming)",
            TrendDirection::Cooling => "negative (cooling)",
            TrendDirection::Flat => "zero (flat)",
        }
    }
}

/// Whole-series descriptive statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasicStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Output of one city analysis.
///
/// Built once by the analyzer and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub city: String,
    pub n_observations: usize,
    pub average_temperature: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub season_profile: SeasonProfile,
    pub monthly_cycle: Vec<MonthlyStats>,
    /// OLS slope in °C per day.
    pub trend: f64,
    pub trend_direction: TrendDirection,
    pub rolling: Vec<RollingPoint>,
    pub anomalies: Vec<AnomalyRecord>,
    pub window: usize,
    pub sigma: f64,
}

impl AnalysisResult {
    /// Rolling mean per record, in input row order.
    pub fn rolling_mean(&self) -> Vec<f64> {
        self.rolling.iter().map(|p| p.rolling_mean).collect()
    }

    /// Rolling std per record, in input row order (`NaN` for one-row windows).
    pub fn rolling_std(&self) -> Vec<f64> {
        self.rolling.iter().map(|p| p.rolling_std).collect()
    }
}

/// Verdict of a live reading against the seasonal normal range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalRangeCheck {
    pub season: Season,
    pub current_temp: f64,
    pub mean: f64,
    pub std: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub is_normal: bool,
}

/// Analysis knobs, derived from CLI flags (plus defaults).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    pub window: usize,
    pub sigma: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            sigma: DEFAULT_SIGMA,
        }
    }
}

/// A full `temps analyze` run as understood by the pipeline.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub csv_path: PathBuf,
    /// `None` analyzes every city in the dataset.
    pub city: Option<String>,
    pub analysis: AnalysisConfig,
    pub top_n: usize,
    pub export_results: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
    pub live: LiveReading,
    /// Date used to pick the "current" season.
    pub today: NaiveDate,
}

/// Where the live temperature for the normal-range check comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveReading {
    Skip,
    Manual(f64),
    Fetch { api_key: Option<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_parses_case_insensitively() {
        assert_eq!("Winter".parse::<Season>().unwrap(), Season::Winter);
        assert_eq!(" autumn ".parse::<Season>().unwrap(), Season::Autumn);
        assert!(matches!(
            "fall".parse::<Season>(),
            Err(AnalysisError::MalformedInput(_))
        ));
    }

    #[test]
    fn trend_direction_reaches_flat_branch() {
        assert_eq!(TrendDirection::from_slope(0.0), TrendDirection::Flat);
        assert_eq!(TrendDirection::from_slope(-0.0), TrendDirection::Flat);
        assert_eq!(TrendDirection::from_slope(1e-12), TrendDirection::Warming);
        assert_eq!(TrendDirection::from_slope(-3.5), TrendDirection::Cooling);
    }

    #[test]
    fn profile_lookup_of_absent_season_is_typed_error() {
        let profile: SeasonProfile = [(
            Season::Winter,
            SeasonStats {
                mean: -3.0,
                std: Some(1.0),
                count: 10,
            },
        )]
        .into_iter()
        .collect();

        assert!(profile.get(Season::Winter).is_ok());
        assert_eq!(
            profile.get(Season::Summer),
            Err(AnalysisError::SeasonNotFound(Season::Summer))
        );
    }

    #[test]
    fn empty_city_series_is_rejected() {
        assert_eq!(
            CitySeries::new("Oslo", Vec::new()).unwrap_err(),
            AnalysisError::EmptySeries
        );
    }

    #[test]
    fn band_is_undefined_for_single_record_window() {
        let point = RollingPoint {
            timestamp: NaiveDate::from_ymd_opt(2020, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            season: Season::Winter,
            temperature: 1.0,
            rolling_mean: 1.0,
            rolling_std: f64::NAN,
            window_len: 1,
        };
        assert!(point.band(2.0).is_none());
    }
}
