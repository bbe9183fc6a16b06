//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input records (`Observation`, `CitySeries`, `Season`)
//! - analysis outputs (`AnalysisResult`, `SeasonProfile`, `RollingPoint`, etc.)
//! - the calendar month → season mapping (`season`)

pub mod season;
pub mod types;

pub use season::*;
pub use types::*;
