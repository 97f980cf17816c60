//! # Load Pipeline
//!
//! This module ties configuration, parsing and export together. A [`Pipeline`] owns the
//! PostgreSQL client for the duration of a run and performs the steps strictly in sequence:
//! connect, provision the table, parse and filter the export, insert, close.
//!
//! ## Submodules
//!
//! - **runner**: Defines `Pipeline` and the `RunSummary` it reports.

mod runner;

pub use runner::{Pipeline, RunSummary};
