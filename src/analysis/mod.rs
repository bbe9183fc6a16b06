//! Temperature analytics.
//!
//! Module structure:
//! - `rolling`: season-partitioned rolling mean/std and anomaly flags
//! - `profile`: per-season mean/std over the whole series
//! - `descriptive`: mean/min/max
//! - `trend`: OLS slope of temperature on time
//! - `monthly`: annual cycle per calendar month
//! - `normal_range`: live reading vs. seasonal `mean ± 2σ`
//! - `analyzer`: runs the estimators for one city

pub mod analyzer;
pub mod descriptive;
pub mod monthly;
pub mod normal_range;
pub mod profile;
pub mod rolling;
pub mod trend;

pub use analyzer::TemperatureAnalyzer;
pub use descriptive::compute_basic_stats;
pub use monthly::compute_monthly_cycle;
pub use normal_range::{NORMAL_RANGE_SIGMA, check_current_reading};
pub use profile::compute_profile;
pub use rolling::{compute_rolling, flag_anomalies, is_anomalous};
pub use trend::{compute_trend, epoch_days};
