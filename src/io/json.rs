//! JSON export of a full analysis.
//!
//! The file carries everything a presentation layer needs to redraw the
//! dashboard without re-running the analysis: summary stats, seasonal profile,
//! monthly cycle, trend, rolling series, anomalies and (when performed) the
//! live normal-range check.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{AnalysisResult, NormalRangeCheck};
use crate::error::AppError;

/// Top-level JSON document.
#[derive(Debug, Serialize)]
pub struct AnalysisFile<'a> {
    pub tool: &'static str,
    pub generated_on: NaiveDate,
    pub analysis: &'a AnalysisResult,
    pub normal_range: Option<&'a NormalRangeCheck>,
}

/// Write an analysis JSON file.
pub fn write_analysis_json(
    path: &Path,
    result: &AnalysisResult,
    normal_range: Option<&NormalRangeCheck>,
    generated_on: NaiveDate,
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create analysis JSON '{}': {e}", path.display())))?;

    let doc = AnalysisFile {
        tool: "temps",
        generated_on,
        analysis: result,
        normal_range,
    };

    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::new(4, format!("Failed to write analysis JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::analysis::TemperatureAnalyzer;
    use crate::domain::{AnalysisConfig, CitySeries, Observation, Season};

    #[test]
    fn document_serializes_profile_keyed_by_season() {
        let start = NaiveDate::from_ymd_opt(2020, 7, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let obs: Vec<Observation> = (0..5)
            .map(|i| Observation {
                timestamp: start + Duration::days(i),
                city: "Madrid".to_string(),
                temperature: 25.0 + i as f64,
                season: Season::Summer,
            })
            .collect();
        let result = TemperatureAnalyzer::new(AnalysisConfig::default())
            .unwrap()
            .analyze(&CitySeries::new("Madrid", obs).unwrap())
            .unwrap();

        let doc = AnalysisFile {
            tool: "temps",
            generated_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            analysis: &result,
            normal_range: None,
        };
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["analysis"]["city"], "Madrid");
        assert_eq!(value["analysis"]["season_profile"]["summer"]["mean"], 27.0);
        assert_eq!(value["analysis"]["trend_direction"], "warming");
        // NaN std of the first rolling window serializes as null.
        assert!(value["analysis"]["rolling"][0]["rolling_std"].is_null());
        assert!(value["normal_range"].is_null());
    }
}
