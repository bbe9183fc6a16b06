//! Error types.
//!
//! - `AnalysisError`: everything the analytical core can reject (bad input,
//!   too little data, missing seasons).
//! - `AppError`: the binary boundary. Carries the process exit code plus a
//!   user-facing message.
//!
//! Exit codes:
//! - 2: malformed input or configuration
//! - 3: insufficient data / season lookup failures
//! - 4: external provider failures and output I/O

use thiserror::Error;

use crate::data::weather::WeatherError;
use crate::domain::Season;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("series is empty")]
    EmptySeries,

    #[error("city '{0}' not found in dataset")]
    UnknownCity(String),

    #[error("insufficient data for {operation}: need {needed}, have {have}")]
    InsufficientData {
        operation: &'static str,
        needed: usize,
        have: usize,
    },

    #[error("season '{0}' not found in seasonal profile")]
    SeasonNotFound(Season),

    #[error("standard deviation for season '{season}' is undefined ({count} observation)")]
    UndefinedSpread { season: Season, count: usize },

    #[error("linear trend fit failed: {0}")]
    DegenerateFit(String),
}

impl AnalysisError {
    /// Exit code used when this error reaches the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            AnalysisError::MalformedInput(_) | AnalysisError::EmptySeries | AnalysisError::UnknownCity(_) => 2,
            AnalysisError::InsufficientData { .. }
            | AnalysisError::SeasonNotFound(_)
            | AnalysisError::UndefinedSpread { .. }
            | AnalysisError::DegenerateFit(_) => 3,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl From<WeatherError> for AppError {
    fn from(err: WeatherError) -> Self {
        let exit_code = match err {
            WeatherError::MissingCredential => 2,
            _ => 4,
        };
        AppError::new(exit_code, format!("Current temperature unavailable: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_map_to_distinct_exit_codes() {
        let input: AppError = AnalysisError::MalformedInput("bad".into()).into();
        let lookup: AppError = AnalysisError::SeasonNotFound(Season::Summer).into();
        let remote: AppError = WeatherError::InvalidCredential("nope".into()).into();

        assert_eq!(input.exit_code(), 2);
        assert_eq!(lookup.exit_code(), 3);
        assert_eq!(remote.exit_code(), 4);
        assert!(lookup.to_string().contains("summer"));
    }
}
