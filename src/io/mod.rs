//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - per-record CSV export (`export`)
//! - full-analysis JSON export (`json`)

pub mod export;
pub mod ingest;
pub mod json;

pub use export::*;
pub use ingest::*;
pub use json::*;
