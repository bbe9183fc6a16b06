//! Export per-record results to CSV.
//!
//! One row per observation in original dataset order, easy to consume in
//! spreadsheets or downstream plotting scripts. Undefined values (std of a
//! one-row window and the bands derived from it) are written as empty cells.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::analysis::is_anomalous;
use crate::domain::{AnalysisResult, Season};
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    timestamp: NaiveDateTime,
    city: &'a str,
    season: Season,
    temperature: f64,
    rolling_mean: f64,
    rolling_std: Option<f64>,
    lower_bound: Option<f64>,
    upper_bound: Option<f64>,
    anomaly: bool,
}

/// Write per-record results to a CSV file.
pub fn write_results_csv(path: &Path, result: &AnalysisResult) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results(file, result)
}

/// Write per-record results as CSV to any writer.
pub fn write_results<W: Write>(writer: W, result: &AnalysisResult) -> Result<(), AppError> {
    let mut out = csv::Writer::from_writer(writer);

    for p in &result.rolling {
        let band = p.band(result.sigma);
        out.serialize(ExportRow {
            timestamp: p.timestamp,
            city: &result.city,
            season: p.season,
            temperature: p.temperature,
            rolling_mean: p.rolling_mean,
            rolling_std: p.rolling_std.is_finite().then_some(p.rolling_std),
            lower_bound: band.map(|(lo, _)| lo),
            upper_bound: band.map(|(_, hi)| hi),
            anomaly: is_anomalous(p.temperature, p.rolling_mean, p.rolling_std, result.sigma),
        })
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }

    out.flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;
    use crate::analysis::TemperatureAnalyzer;
    use crate::domain::{AnalysisConfig, CitySeries, Observation};

    #[test]
    fn export_has_one_row_per_record_and_blank_undefined_cells() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let obs: Vec<Observation> = [1.0, 2.0, 3.0]
            .iter()
            .enumerate()
            .map(|(i, &t)| Observation {
                timestamp: start + Duration::days(i as i64),
                city: "Kyiv".to_string(),
                temperature: t,
                season: Season::Winter,
            })
            .collect();
        let series = CitySeries::new("Kyiv", obs).unwrap();
        let result = TemperatureAnalyzer::new(AnalysisConfig::default())
            .unwrap()
            .analyze(&series)
            .unwrap();

        let mut buf = Vec::new();
        write_results(&mut buf, &result).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "timestamp,city,season,temperature,rolling_mean,rolling_std,lower_bound,upper_bound,anomaly"
        );
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "2020-01-01T00:00:00,Kyiv,winter,1.0,1.0,,,,false");
        assert!(lines[2].starts_with("2020-01-02T00:00:00,Kyiv,winter,2.0,1.5,"));
    }
}
