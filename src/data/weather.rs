//! Current-temperature providers.
//!
//! The analysis core only ever sees `Result<f64, WeatherError>`: a Celsius
//! reading or a classified failure. It never retries and never treats a
//! failure payload as data.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherError {
    #[error("no API key: pass --api-key or set OPENWEATHER_API_KEY (.env is read)")]
    MissingCredential,

    #[error("invalid API key: {0}")]
    InvalidCredential(String),

    #[error("provider returned status {code}: {message}")]
    Status { code: u16, message: String },

    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected response: {0}")]
    Parse(String),
}

/// Anything that can produce a live temperature for a city.
pub trait TemperatureSource {
    fn current_temperature(&self, city: &str) -> Result<f64, WeatherError>;
}

/// A reading supplied by hand (e.g. `--temp`).
#[derive(Debug, Clone, Copy)]
pub struct FixedTemperature(pub f64);

impl TemperatureSource for FixedTemperature {
    fn current_temperature(&self, _city: &str) -> Result<f64, WeatherError> {
        Ok(self.0)
    }
}

/// OpenWeatherMap "current weather" client (metric units).
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, WeatherError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(WeatherError::MissingCredential);
        }
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| WeatherError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key,
        })
    }

    /// Use the explicit key if given, else `OPENWEATHER_API_KEY` (after loading `.env`).
    pub fn from_env_or(api_key: Option<String>) -> Result<Self, WeatherError> {
        if let Some(key) = api_key {
            return Self::new(key);
        }
        dotenvy::dotenv().ok();
        let key = std::env::var(API_KEY_ENV).map_err(|_| WeatherError::MissingCredential)?;
        Self::new(key)
    }
}

impl TemperatureSource for OpenWeatherClient {
    fn current_temperature(&self, city: &str) -> Result<f64, WeatherError> {
        debug!(city, "fetching current temperature");

        let resp = self
            .client
            .get(BASE_URL)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .map_err(|e| WeatherError::Request(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| WeatherError::Request(format!("failed to read response body: {e}")))?;

        let reading = interpret_response(status, &body);
        if let Err(err) = &reading {
            warn!(city, status, error = %err, "current temperature unavailable");
        }
        reading
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    main: MainBlock,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Classify a provider response by status code and body.
fn interpret_response(status: u16, body: &str) -> Result<f64, WeatherError> {
    match status {
        200 => {
            let parsed: CurrentWeather =
                serde_json::from_str(body).map_err(|e| WeatherError::Parse(e.to_string()))?;
            let temp = parsed.main.temp;
            if temp.is_finite() {
                Ok(temp)
            } else {
                Err(WeatherError::Parse(format!("non-finite temperature {temp}")))
            }
        }
        401 => Err(WeatherError::InvalidCredential(
            error_message(body).unwrap_or_else(|| "unauthorized".to_string()),
        )),
        code => Err(WeatherError::Status {
            code,
            message: error_message(body).unwrap_or_else(|| "unexpected error".to_string()),
        }),
    }
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body).ok()?.message
}
