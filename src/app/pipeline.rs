//! Shared analysis pipeline used by the CLI commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV ingest -> city selection -> per-city analysis -> optional live check
//!
//! The command handlers in `app` then only deal with presentation.

use chrono::NaiveDate;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::analysis::{TemperatureAnalyzer, check_current_reading, compute_profile};
use crate::data::{FixedTemperature, OpenWeatherClient, TemperatureSource};
use crate::domain::{
    AnalysisConfig, AnalysisResult, CitySeries, LiveReading, NormalRangeCheck, RunConfig, SeasonProfile,
    calendar_mismatches, season_for_date,
};
use crate::error::{AnalysisError, AppError};
use crate::io::ingest::{Dataset, load_dataset};

/// Analysis outcome for one city.
#[derive(Debug, Clone)]
pub struct CityOutcome {
    pub city: String,
    pub analysis: Result<AnalysisResult, AnalysisError>,
}

/// Load the dataset and analyze the configured city (or all cities).
pub fn run_analysis(config: &RunConfig) -> Result<Vec<CityOutcome>, AppError> {
    let dataset = load_dataset(&config.csv_path)?;
    analyze_dataset(&dataset, config.city.as_deref(), config.analysis)
}

/// Analyze one named city, or every city in parallel when `city` is `None`.
///
/// A named city that fails is an error. In batch mode each city's failure is
/// kept in its `CityOutcome` and the other cities still run.
pub fn analyze_dataset(
    dataset: &Dataset,
    city: Option<&str>,
    config: AnalysisConfig,
) -> Result<Vec<CityOutcome>, AppError> {
    let analyzer = TemperatureAnalyzer::new(config)?;

    if let Some(name) = city {
        let series = dataset.city_series(name)?;
        let result = analyze_city(&analyzer, &series)?;
        return Ok(vec![CityOutcome {
            city: result.city.clone(),
            analysis: Ok(result),
        }]);
    }

    let names = dataset.cities();
    info!(cities = names.len(), "analyzing all cities");

    let outcomes = names
        .par_iter()
        .map(|name| CityOutcome {
            city: name.to_string(),
            analysis: dataset
                .city_series(name)
                .and_then(|series| analyze_city(&analyzer, &series)),
        })
        .collect();

    Ok(outcomes)
}

fn analyze_city(analyzer: &TemperatureAnalyzer, series: &CitySeries) -> Result<AnalysisResult, AnalysisError> {
    warn_on_label_mismatch(series);
    analyzer.analyze(series)
}

/// The live check picks the season from the Northern-hemisphere calendar,
/// whatever convention the dataset used for its labels.
fn warn_on_label_mismatch(series: &CitySeries) {
    let mismatches = calendar_mismatches(series.observations());
    if mismatches > 0 {
        warn!(
            city = series.city(),
            mismatches,
            total = series.len(),
            "season labels disagree with the Dec-Feb winter calendar; live checks may use a different season than the data"
        );
    }
}

/// Build the temperature source for a live check, if one was requested.
pub fn live_source(live: &LiveReading) -> Result<Option<Box<dyn TemperatureSource>>, AppError> {
    match live {
        LiveReading::Skip => Ok(None),
        LiveReading::Manual(temp) => Ok(Some(Box::new(FixedTemperature(*temp)))),
        LiveReading::Fetch { api_key } => {
            let client = OpenWeatherClient::from_env_or(api_key.clone())?;
            Ok(Some(Box::new(client)))
        }
    }
}

/// Fetch a reading for `result.city` and judge it against the season of `today`.
pub fn live_check(
    source: &dyn TemperatureSource,
    result: &AnalysisResult,
    today: NaiveDate,
) -> Result<NormalRangeCheck, AppError> {
    check_city_reading(source, &result.city, &result.season_profile, today)
}

/// Live check using only the seasonal profile of a city.
///
/// Unlike a full analysis this works on series too short for a trend fit.
pub fn check_series(
    source: &dyn TemperatureSource,
    series: &CitySeries,
    today: NaiveDate,
) -> Result<NormalRangeCheck, AppError> {
    warn_on_label_mismatch(series);
    let profile = compute_profile(series.observations());
    check_city_reading(source, series.city(), &profile, today)
}

fn check_city_reading(
    source: &dyn TemperatureSource,
    city: &str,
    profile: &SeasonProfile,
    today: NaiveDate,
) -> Result<NormalRangeCheck, AppError> {
    let current_temp = source.current_temperature(city)?;
    let season = season_for_date(today);
    info!(city, current_temp, season = %season, "checking live reading");
    Ok(check_current_reading(current_temp, profile, season)?)
}
