//! # Pipeline Configuration
//!
//! This module holds the explicit configuration that drives a load run: where the PostgreSQL
//! server lives, which credentials to use, and which configuration export to read. The binary
//! fills it from command-line arguments and environment variables; library callers and tests
//! construct it directly.
//!
//! ## Submodules
//!
//! - **settings**: Defines `PipelineConfig` and its conversion into a `tokio_postgres::Config`.

mod settings;

pub use settings::{PipelineConfig, DEFAULT_DB_HOST, DEFAULT_DB_NAME, DEFAULT_DB_PORT, DEFAULT_INPUT_PATH};
