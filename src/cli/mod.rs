//! Command-line parsing for the temperature analyzer.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! analysis code. Everything here is turned into plain config values by
//! `app` before the pipeline runs.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_SIGMA, DEFAULT_WINDOW};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "temps", version, about = "Historical city temperature analysis with live normal-range checks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze one city (or every city in parallel): stats, seasonal profile, trend, anomalies.
    Analyze(AnalyzeArgs),
    /// List the cities in a dataset with their row counts.
    Cities(CitiesArgs),
    /// Check a live reading against a city's seasonal normal range.
    Check(CheckArgs),
    /// Write a synthetic multi-city dataset in the ingest schema.
    Sample(SampleArgs),
}

#[derive(Debug, Args, Clone)]
pub struct AnalyzeArgs {
    /// Historical dataset (columns: timestamp, city, temperature, season).
    #[arg(long, value_name = "CSV")]
    pub csv: PathBuf,

    /// City to analyze. Omit to analyze every city.
    #[arg(short = 'c', long)]
    pub city: Option<String>,

    /// Trailing rolling window (records within the same season).
    #[arg(long, default_value_t = DEFAULT_WINDOW)]
    pub window: usize,

    /// Anomaly band half-width in rolling standard deviations.
    #[arg(long, default_value_t = DEFAULT_SIGMA)]
    pub sigma: f64,

    /// Show at most N anomalies per city.
    #[arg(long, default_value_t = 20)]
    pub top: usize,

    /// Export per-record rolling stats and anomaly flags to CSV.
    #[arg(long, requires = "city")]
    pub export: Option<PathBuf>,

    /// Export the full analysis to JSON.
    #[arg(long = "export-json", requires = "city")]
    pub export_json: Option<PathBuf>,

    /// Fetch the current temperature and check it against the seasonal normal range.
    #[arg(long)]
    pub current: bool,

    #[command(flatten)]
    pub live: LiveArgs,
}

/// Options shared by every command that checks a live reading.
#[derive(Debug, Args, Clone)]
pub struct LiveArgs {
    /// Use this reading (°C) instead of calling the weather provider.
    #[arg(long, allow_hyphen_values = true)]
    pub temp: Option<f64>,

    /// OpenWeatherMap API key (defaults to OPENWEATHER_API_KEY / .env).
    #[arg(long)]
    pub api_key: Option<String>,

    /// Date that selects the current season (defaults to today).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Args, Clone)]
pub struct CitiesArgs {
    /// Historical dataset.
    #[arg(long, value_name = "CSV")]
    pub csv: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct CheckArgs {
    /// Historical dataset.
    #[arg(long, value_name = "CSV")]
    pub csv: PathBuf,

    /// City to check.
    #[arg(short = 'c', long)]
    pub city: String,

    #[command(flatten)]
    pub live: LiveArgs,
}

#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(long, value_name = "CSV")]
    pub out: PathBuf,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// First day of the series.
    #[arg(long, default_value = "2010-01-01")]
    pub start: NaiveDate,

    /// Number of daily records per city.
    #[arg(long, default_value_t = 3650)]
    pub days: usize,

    /// Number of cities (1-10).
    #[arg(long, default_value_t = 10)]
    pub cities: usize,

    /// Std of daily noise around the seasonal baseline (°C).
    #[arg(long, default_value_t = 5.0)]
    pub noise: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_defaults() {
        let cli = Cli::parse_from(["temps", "analyze", "--csv", "data.csv"]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.window, 30);
        assert_eq!(args.sigma, 2.0);
        assert!(args.city.is_none());
        assert!(!args.current);
    }

    #[test]
    fn export_requires_city() {
        let parsed = Cli::try_parse_from(["temps", "analyze", "--csv", "d.csv", "--export", "out.csv"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from([
            "temps", "analyze", "--csv", "d.csv", "--city", "Berlin", "--export", "out.csv",
        ]);
        assert!(parsed.is_ok());
    }

    #[test]
    fn check_accepts_negative_manual_reading_and_date() {
        let cli = Cli::parse_from([
            "temps", "check", "--csv", "d.csv", "--city", "Moscow", "--temp", "-12.5", "--date", "2024-01-15",
        ]);
        let Command::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.live.temp, Some(-12.5));
        assert_eq!(args.live.date, NaiveDate::from_ymd_opt(2024, 1, 15));
    }
}
