//! Reporting utilities: formatted terminal output for analyses and live checks.

pub mod format;

pub use format::*;
