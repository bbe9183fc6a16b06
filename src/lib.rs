//! `city-temps` library crate.
//!
//! The binary (`temps`) is a thin wrapper around this library so that:
//!
//! - the analysis core is testable without spawning processes
//! - results are plain values any front-end (dashboard, notebook, service) can consume
//! - the weather provider stays outside the analysis core

pub mod analysis;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod report;
