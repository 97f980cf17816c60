//! Tools for persisting interface records to a PostgreSQL database.
//!
//! This module owns everything that knows about the `interfaces` table: its DDL, the shape of
//! a row, and the transactional batch insert. Table creation and insertion each run in their
//! own transaction and report what happened through explicit outcome types rather than by
//! surfacing driver errors the caller would have to classify.
//!
//! ## Usage
//!
//! Call [`provision_table`] once per run, then [`insert_interfaces`] with the filtered records.
//!
//! ## Submodules
//!
//! - **postgres**: Contains the PostgreSQL statements and transaction handling.
//! - **types**: Defines `InterfaceRow` and the outcome enums.

mod postgres;
mod types;

pub use postgres::{insert_interfaces, provision_table, CREATE_TABLE_SQL, INSERT_BATCH_SIZE};
pub use types::{InsertOutcome, InterfaceRow, ProvisionOutcome};
