//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the historical dataset
//! - runs per-city analysis
//! - checks live readings
//! - prints reports and writes optional exports

use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::error;

use crate::cli::{AnalyzeArgs, CheckArgs, CitiesArgs, Command, LiveArgs, SampleArgs};
use crate::data::{SampleConfig, generate_dataset, write_dataset_csv};
use crate::domain::{AnalysisConfig, LiveReading, RunConfig};
use crate::error::AppError;
use crate::io::ingest::load_dataset;

pub mod pipeline;

/// Entry point for the `temps` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Cities(args) => handle_cities(args),
        Command::Check(args) => handle_check(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args, Local::now().date_naive());
    let outcomes = pipeline::run_analysis(&config)?;
    let source = pipeline::live_source(&config.live)?;

    // Keep reporting the remaining cities; the first failure decides the exit code.
    let mut first_err: Option<AppError> = None;

    for (i, outcome) in outcomes.iter().enumerate() {
        if i > 0 {
            println!();
        }

        let result = match &outcome.analysis {
            Ok(result) => result,
            Err(err) => {
                error!(city = %outcome.city, error = %err, "analysis failed");
                println!("=== temps - {} ===\nAnalysis failed: {err}", outcome.city);
                first_err.get_or_insert_with(|| err.clone().into());
                continue;
            }
        };

        print!("{}", crate::report::format_report(result, config.top_n));

        let mut normal_range = None;
        if let Some(source) = source.as_deref() {
            println!();
            match pipeline::live_check(source, result, config.today) {
                Ok(check) => {
                    print!("{}", crate::report::format_normal_range(&result.city, &check));
                    normal_range = Some(check);
                }
                Err(err) => {
                    println!("Live check failed: {err}");
                    first_err.get_or_insert(err);
                }
            }
        }

        // Optional exports.
        if let Some(path) = &config.export_results {
            crate::io::export::write_results_csv(path, result)?;
        }
        if let Some(path) = &config.export_json {
            crate::io::json::write_analysis_json(path, result, normal_range.as_ref(), config.today)?;
        }
    }

    match first_err {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn handle_cities(args: CitiesArgs) -> Result<(), AppError> {
    let dataset = load_dataset(&args.csv)?;

    println!("{:<24} {:>8}", "city", "rows");
    println!("{:-<24} {:-<8}", "", "");
    for city in dataset.cities() {
        let rows = dataset.row_count(city);
        println!("{city:<24} {rows:>8}");
    }

    Ok(())
}

fn handle_check(args: CheckArgs) -> Result<(), AppError> {
    let today = args.live.date.unwrap_or_else(|| Local::now().date_naive());
    let live = live_reading_from_args(&args.live, true);

    let dataset = load_dataset(&args.csv)?;
    let series = dataset.city_series(&args.city)?;
    let source = pipeline::live_source(&live)?
        .ok_or_else(|| AppError::new(2, "No live reading source: pass --temp or an API key."))?;

    let check = pipeline::check_series(source.as_ref(), &series, today)?;
    print!("{}", crate::report::format_normal_range(series.city(), &check));
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        seed: args.seed,
        start: args.start,
        days: args.days,
        cities: args.cities,
        noise_std: args.noise,
    };

    let rows = generate_dataset(&config)?;
    write_dataset_csv(&args.out, &rows)?;
    println!("Wrote {} rows to {}", rows.len(), args.out.display());
    Ok(())
}

pub fn run_config_from_args(args: &AnalyzeArgs, today: NaiveDate) -> RunConfig {
    RunConfig {
        csv_path: args.csv.clone(),
        city: args.city.clone(),
        analysis: AnalysisConfig {
            window: args.window,
            sigma: args.sigma,
        },
        top_n: args.top,
        export_results: args.export.clone(),
        export_json: args.export_json.clone(),
        live: live_reading_from_args(&args.live, args.current),
        today: args.live.date.unwrap_or(today),
    }
}

/// `--temp` wins over fetching; fetching only happens when requested.
fn live_reading_from_args(live: &LiveArgs, fetch: bool) -> LiveReading {
    match (live.temp, fetch) {
        (Some(temp), _) => LiveReading::Manual(temp),
        (None, true) => LiveReading::Fetch {
            api_key: live.api_key.clone(),
        },
        (None, false) => LiveReading::Skip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;

    fn analyze_args(argv: &[&str]) -> AnalyzeArgs {
        let mut full = vec!["temps", "analyze", "--csv", "data.csv"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Command::Analyze(args) => args,
            other => panic!("expected analyze, got {other:?}"),
        }
    }

    #[test]
    fn live_reading_resolution() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let config = run_config_from_args(&analyze_args(&[]), today);
        assert_eq!(config.live, LiveReading::Skip);
        assert_eq!(config.today, today);
        assert_eq!(config.analysis, AnalysisConfig::default());

        let config = run_config_from_args(&analyze_args(&["--current", "--api-key", "k"]), today);
        assert_eq!(
            config.live,
            LiveReading::Fetch {
                api_key: Some("k".to_string())
            }
        );

        let config = run_config_from_args(&analyze_args(&["--current", "--temp", "3.5"]), today);
        assert_eq!(config.live, LiveReading::Manual(3.5));
    }

    #[test]
    fn date_flag_overrides_today() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let config = run_config_from_args(&analyze_args(&["--date", "2023-12-24", "--window", "7"]), today);
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2023, 12, 24).unwrap());
        assert_eq!(config.analysis.window, 7);
    }
}
