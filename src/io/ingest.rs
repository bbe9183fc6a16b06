//! CSV ingest.
//!
//! Turns an uploaded historical dataset into typed `Observation`s.
//!
//! Design goals:
//! - **Strict schema**: `timestamp`, `city`, `temperature`, `season` must exist
//! - **Fail fast**: the first bad row aborts the load with its line number;
//!   values are never coerced or skipped
//! - **Separation of concerns**: no statistics here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use csv::StringRecord;
use tracing::{debug, info};

use crate::domain::{CitySeries, Observation, Season};
use crate::error::{AnalysisError, AppError};

const REQUIRED_COLUMNS: [&str; 4] = ["timestamp", "city", "temperature", "season"];

/// All rows of a dataset, in file order, indexed by city.
#[derive(Debug, Clone)]
pub struct Dataset {
    observations: Vec<Observation>,
    /// Distinct city names in first-seen order.
    cities: Vec<String>,
    /// City name → row indexes into `observations`, in file order.
    rows_by_city: HashMap<String, Vec<usize>>,
}

impl Dataset {
    /// Build the city index in one pass over the rows.
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        let mut cities = Vec::new();
        let mut rows_by_city: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, obs) in observations.iter().enumerate() {
            let rows = rows_by_city.entry(obs.city.clone()).or_insert_with(|| {
                cities.push(obs.city.clone());
                Vec::new()
            });
            rows.push(idx);
        }

        Self {
            observations,
            cities,
            rows_by_city,
        }
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

    /// Distinct city names in first-seen order.
    pub fn cities(&self) -> Vec<&str> {
        self.cities.iter().map(String::as_str).collect()
    }

    /// Number of rows for `city` (exact name).
    pub fn row_count(&self, city: &str) -> usize {
        self.rows_by_city.get(city).map_or(0, Vec::len)
    }

    /// One city's rows, preserving dataset order.
    ///
    /// Exact name match first, then a case-insensitive fallback.
    pub fn city_series(&self, city: &str) -> Result<CitySeries, AnalysisError> {
        let city = city.trim();
        let (name, rows) = self
            .rows_by_city
            .get_key_value(city)
            .or_else(|| {
                self.cities
                    .iter()
                    .find(|c| c.eq_ignore_ascii_case(city))
                    .and_then(|c| self.rows_by_city.get_key_value(c.as_str()))
            })
            .ok_or_else(|| AnalysisError::UnknownCity(city.to_string()))?;

        let observations: Vec<Observation> = rows.iter().map(|&i| self.observations[i].clone()).collect();

        CitySeries::new(name.clone(), observations)
    }
}

/// Open and parse a dataset CSV.
pub fn load_dataset(path: &Path) -> Result<Dataset, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;

    let dataset = read_dataset(file)?;
    info!(
        path = %path.display(),
        rows = dataset.len(),
        cities = dataset.cities.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Parse a dataset from any reader (file, stdin, in-memory).
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset, AnalysisError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AnalysisError::MalformedInput(format!("failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut observations = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header line; CSV lines are 1-based.
        let line = idx + 2;
        let record =
            result.map_err(|e| AnalysisError::MalformedInput(format!("line {line}: CSV parse error: {e}")))?;
        let obs = parse_row(&record, &header_map)
            .map_err(|msg| AnalysisError::MalformedInput(format!("line {line}: {msg}")))?;
        observations.push(obs);
    }

    if observations.is_empty() {
        return Err(AnalysisError::MalformedInput("dataset has no rows".to_string()));
    }

    debug!(rows = observations.len(), "dataset parsed");
    Ok(Dataset::from_observations(observations))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AnalysisError> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|c| !header_map.contains_key(*c))
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(AnalysisError::MalformedInput(format!(
        "missing required column(s): {}",
        missing
            .iter()
            .map(|c| format!("`{c}`"))
            .collect::<Vec<_>>()
            .join(", ")
    )))
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<Observation, String> {
    let timestamp = parse_timestamp(get_required(record, header_map, "timestamp")?)?;
    let city = get_required(record, header_map, "city")?.to_string();
    let temperature = parse_temperature(get_required(record, header_map, "temperature")?)?;
    let season = get_required(record, header_map, "season")?
        .parse::<Season>()
        .map_err(|e| match e {
            AnalysisError::MalformedInput(msg) => msg,
            other => other.to_string(),
        })?;

    Ok(Observation {
        timestamp,
        city,
        temperature,
        season,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

/// Parse an ISO-8601 timestamp.
///
/// Accepted: `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS[.f]]`,
/// `YYYY-MM-DD HH:MM[:SS[.f]]`, and RFC 3339 with an offset (converted to UTC).
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    const DATETIME_FMTS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d.and_time(NaiveTime::MIN));
    }
    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }

    Err(format!(
        "Invalid timestamp '{s}'. Expected ISO-8601 (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)."
    ))
}

fn parse_temperature(s: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid temperature '{s}' (not a number)."))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("Invalid temperature '{s}' (not finite)."))
    }
}
