//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the analysis code stays clean and testable
//! - output changes are localized

use crate::domain::{AnalysisResult, AnomalyRecord, MonthlyStats, NormalRangeCheck, SeasonProfile};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Days per year used to express the daily slope as an annual rate.
const DAYS_PER_YEAR: f64 = 365.25;

/// Header block: descriptive stats and trend.
pub fn format_summary(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== temps - {} ===\n", result.city));
    out.push_str(&format!(
        "Observations: n={} | rolling window={} | anomaly band=±{:.1}σ\n",
        result.n_observations, result.window, result.sigma
    ));
    out.push_str(&format!("Average temperature: {:.2}°C\n", result.average_temperature));
    out.push_str(&format!("Minimum temperature: {:.2}°C\n", result.min_temperature));
    out.push_str(&format!("Maximum temperature: {:.2}°C\n", result.max_temperature));
    out.push_str(&format!(
        "Trend: {} | slope={:+.6}°C/day ({:+.3}°C/year)\n",
        result.trend_direction.display_name(),
        result.trend,
        result.trend * DAYS_PER_YEAR
    ));

    out
}

/// Seasonal profile table.
pub fn format_season_profile(profile: &SeasonProfile) -> String {
    let mut out = String::new();
    out.push_str("Seasonal profile:\n");
    out.push_str(&format!("{:<8} {:>8} {:>8} {:>6}\n", "season", "mean", "std", "n"));
    out.push_str(&format!("{:-<8} {:-<8} {:-<8} {:-<6}\n", "", "", "", ""));

    for (season, stats) in profile.iter() {
        out.push_str(&format!(
            "{:<8} {:>8.2} {:>8} {:>6}\n",
            season.as_str(),
            stats.mean,
            fmt_opt(stats.std),
            stats.count
        ));
    }

    out
}

/// Annual cycle table with the `mean ± 2σ` band.
pub fn format_monthly_cycle(cycle: &[MonthlyStats]) -> String {
    let mut out = String::new();
    out.push_str("Monthly cycle:\n");
    out.push_str(&format!(
        "{:<5} {:>8} {:>8} {:>8} {:>8} {:>6}\n",
        "month", "mean", "std", "lower", "upper", "n"
    ));
    out.push_str(&format!(
        "{:-<5} {:-<8} {:-<8} {:-<8} {:-<8} {:-<6}\n",
        "", "", "", "", "", ""
    ));

    for m in cycle {
        let name = MONTH_NAMES
            .get(m.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("?");
        out.push_str(&format!(
            "{:<5} {:>8.2} {:>8} {:>8} {:>8} {:>6}\n",
            name,
            m.mean,
            fmt_opt(m.std),
            fmt_opt(m.lower_bound),
            fmt_opt(m.upper_bound),
            m.count
        ));
    }

    out
}

/// Anomaly list in row order, capped at `top_n` rows.
pub fn format_anomalies(anomalies: &[AnomalyRecord], top_n: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("Anomalies: {}\n", anomalies.len()));
    if anomalies.is_empty() {
        return out;
    }

    out.push_str(&format!("{:<20} {:>8}\n", "timestamp", "temp"));
    out.push_str(&format!("{:-<20} {:-<8}\n", "", ""));
    for a in anomalies.iter().take(top_n) {
        out.push_str(&format!(
            "{:<20} {:>8.2}\n",
            a.timestamp.format("%Y-%m-%d %H:%M"),
            a.temperature
        ));
    }
    if anomalies.len() > top_n {
        out.push_str(&format!("... {} more\n", anomalies.len() - top_n));
    }

    out
}

/// Live reading verdict.
pub fn format_normal_range(city: &str, check: &NormalRangeCheck) -> String {
    let mut out = String::new();
    out.push_str(&format!("Current temperature in {city}: {:.2}°C\n", check.current_temp));
    out.push_str(&format!(
        "Season: {} | mean={:.2}°C | std={:.2}°C\n",
        check.season, check.mean, check.std
    ));
    out.push_str(&format!(
        "Normal range: [{:.2}°C, {:.2}°C]\n",
        check.lower_bound, check.upper_bound
    ));
    if check.is_normal {
        out.push_str("Verdict: within the normal range.\n");
    } else {
        out.push_str("Verdict: OUTSIDE the normal range.\n");
    }
    out
}

/// Full report for one city.
pub fn format_report(result: &AnalysisResult, top_n: usize) -> String {
    let mut out = format_summary(result);
    out.push('\n');
    out.push_str(&format_season_profile(&result.season_profile));
    out.push('\n');
    out.push_str(&format_monthly_cycle(&result.monthly_cycle));
    out.push('\n');
    out.push_str(&format_anomalies(&result.anomalies, top_n));
    out
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}
