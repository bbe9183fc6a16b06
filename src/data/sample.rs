//! Synthetic historical dataset generation.
//!
//! Produces daily readings for a handful of cities: a per-city seasonal
//! baseline plus Gaussian noise. Season labels come from the calendar mapping,
//! so every generated row is consistent with `season_for_date`.
//!
//! Output is fully determined by the seed.

use std::fs::File;
use std::path::Path;

use chrono::{Duration, NaiveDate, NaiveTime};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::domain::{Observation, Season, season_for_date};
use crate::error::AppError;

/// Per-season baseline mean (°C), in `Season::ALL` order.
struct CityClimate {
    name: &'static str,
    means: [f64; 4],
}

const CLIMATES: [CityClimate; 10] = [
    CityClimate { name: "New York", means: [0.0, 10.0, 25.0, 15.0] },
    CityClimate { name: "London", means: [5.0, 11.0, 18.0, 12.0] },
    CityClimate { name: "Paris", means: [4.0, 12.0, 20.0, 13.0] },
    CityClimate { name: "Tokyo", means: [6.0, 15.0, 27.0, 18.0] },
    CityClimate { name: "Moscow", means: [-10.0, 5.0, 18.0, 8.0] },
    CityClimate { name: "Sydney", means: [12.0, 18.0, 25.0, 20.0] },
    CityClimate { name: "Berlin", means: [0.0, 10.0, 20.0, 11.0] },
    CityClimate { name: "Beijing", means: [-2.0, 13.0, 27.0, 16.0] },
    CityClimate { name: "Cairo", means: [15.0, 25.0, 35.0, 25.0] },
    CityClimate { name: "Dubai", means: [20.0, 30.0, 40.0, 30.0] },
];

/// Knobs for `temps sample`.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub seed: u64,
    pub start: NaiveDate,
    pub days: usize,
    /// Number of cities from the built-in table (1..=10).
    pub cities: usize,
    /// Std of the daily noise around the seasonal baseline.
    pub noise_std: f64,
}

/// Generate rows grouped by city, each city in chronological order.
pub fn generate_dataset(config: &SampleConfig) -> Result<Vec<Observation>, AppError> {
    if config.days == 0 {
        return Err(AppError::new(2, "Sample days must be > 0."));
    }
    if config.cities == 0 || config.cities > CLIMATES.len() {
        return Err(AppError::new(
            2,
            format!("Sample cities must be in 1..={}.", CLIMATES.len()),
        ));
    }

    if !(config.noise_std.is_finite() && config.noise_std >= 0.0) {
        return Err(AppError::new(2, "Sample noise must be a finite value >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, config.noise_std)
        .map_err(|e| AppError::new(2, format!("Noise distribution error: {e}")))?;

    let mut rows = Vec::with_capacity(config.days * config.cities);
    for climate in CLIMATES.iter().take(config.cities) {
        for day in 0..config.days {
            let date = config.start + Duration::days(day as i64);
            let season = season_for_date(date);
            let base = climate.means[season_index(season)];
            let temperature = ((base + noise.sample(&mut rng)) * 100.0).round() / 100.0;

            rows.push(Observation {
                timestamp: date.and_time(NaiveTime::MIN),
                city: climate.name.to_string(),
                temperature,
                season,
            });
        }
    }

    Ok(rows)
}

/// Write rows in the ingest schema (`timestamp,city,temperature,season`).
pub fn write_dataset_csv(path: &Path, rows: &[Observation]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create sample CSV '{}': {e}", path.display())))?;
    let mut out = csv::Writer::from_writer(file);
    for row in rows {
        out.serialize(row)
            .map_err(|e| AppError::new(4, format!("Failed to write sample CSV row: {e}")))?;
    }
    out.flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush sample CSV: {e}")))?;
    Ok(())
}

fn season_index(season: Season) -> usize {
    match season {
        Season::Winter => 0,
        Season::Spring => 1,
        Season::Summer => 2,
        Season::Autumn => 3,
    }
}
