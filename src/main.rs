//! Interface Loader: Extract Router Interfaces and Load Them into PostgreSQL
//!
//! This application reads a Cisco IOS-XE configuration export produced by the UniConfig
//! topology, keeps the interfaces whose group is not excluded (`BDI`, `Loopback`), and inserts
//! them into the `interfaces` table of a PostgreSQL database.
//!
//! ## Design Overview
//! - **Configuration**: Connection settings and the input path are gathered into a
//!   `PipelineConfig` from environment variables or command-line arguments.
//! - **Parsing**: The `parse` module walks the native interface tree into records.
//! - **Exporting**: The `export` module creates the table if needed and performs the
//!   transactional batch insert.
//!
//! ## Usage
//! 1. Provide the database credentials, either in a `.env` file or in the environment:
//!    ```sh
//!    export DB_USERNAME=postgres
//!    export DB_PASSWORD=example
//!    ```
//! 2. Run the application from the directory containing `assignment/configClear_v2.json`:
//!    ```sh
//!    RUST_LOG=info cargo run
//!    ```
//! 3. Any setting can be overridden on the command line, e.g. `--input-path export.json`.
//!
//! ## Notes
//! - An existing `interfaces` table is reused; the creation attempt is logged and rolled back.
//! - A failed insert is rolled back completely and logged; the process still exits normally.

use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use interface_loader::config::{
  PipelineConfig, DEFAULT_DB_HOST, DEFAULT_DB_NAME, DEFAULT_DB_PORT, DEFAULT_INPUT_PATH,
};
use interface_loader::export::InsertOutcome;
use interface_loader::pipeline::Pipeline;
use log::{info, warn};
use std::path::PathBuf;

/// Command-line arguments for configuring the interface loader.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
  /// PostgreSQL server hostname.
  #[clap(long, env = "DB_HOST", default_value = DEFAULT_DB_HOST)]
  db_host: String,

  /// PostgreSQL server port.
  #[clap(long, env = "DB_PORT", default_value_t = DEFAULT_DB_PORT)]
  db_port: u16,

  /// Role used to connect.
  #[clap(long, env = "DB_USERNAME")]
  db_user: String,

  /// Password for the role.
  #[clap(long, env = "DB_PASSWORD", hide_env_values = true)]
  db_password: String,

  /// Database holding the `interfaces` table.
  #[clap(long, env = "DB_NAME", default_value = DEFAULT_DB_NAME)]
  db_name: String,

  /// Path of the JSON configuration export.
  #[clap(long, env = "INPUT_PATH", default_value = DEFAULT_INPUT_PATH)]
  input_path: PathBuf,
}

impl From<Args> for PipelineConfig {
  fn from(args: Args) -> Self {
    PipelineConfig {
      db_host: args.db_host,
      db_port: args.db_port,
      db_user: args.db_user,
      db_password: args.db_password,
      db_name: args.db_name,
      input_path: args.input_path,
    }
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  // Load environment variables from .env file (if present)
  dotenv().ok();

  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
    .target(env_logger::Target::Stdout)
    .init();

  let config = PipelineConfig::from(Args::parse());
  info!("Starting interface loader with {:?}", config);

  let pipeline = Pipeline::connect(config).await?;
  let summary = pipeline.run().await?;

  match &summary.insert {
    InsertOutcome::Inserted(count) => {
      info!("Loaded {} of {} interface(s)", count, summary.parsed)
    }
    InsertOutcome::RolledBack(cause) => warn!("No interfaces loaded: {}", cause),
  }

  Ok(())
}
