//! Interface Loader Library
//!
//! This library extracts router interface definitions from a UniConfig configuration export,
//! drops the interface groups that are not inventoried, and loads the rest into a PostgreSQL
//! `interfaces` table in a single transaction.

pub mod config;
pub mod export;
pub mod parse;
pub mod pipeline;
