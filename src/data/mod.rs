//! Data sources outside the analysis core.
//!
//! - live readings from a weather provider (`weather`)
//! - synthetic historical datasets for demos (`sample`)

pub mod sample;
pub mod weather;

pub use sample::{SampleConfig, generate_dataset, write_dataset_csv};
pub use weather::{FixedTemperature, OpenWeatherClient, TemperatureSource, WeatherError};
