//! # Parsing Vendor Configuration Exports into Interface Records
//!
//! This module turns a router configuration export (a nested JSON document produced by the
//! UniConfig topology for a Cisco IOS-XE device) into a flat, ordered list of
//! `InterfaceRecord` values. Each record keeps the group it was declared under, the handful of
//! fields that get their own database columns, and the full entry for the `config` column.
//!
//! ## Usage
//!
//! `load_document` reads and decodes the export, `parse_native_config` walks the interface
//! groups, and `filter_eligible` drops the groups listed in `EXCLUDED_GROUPS`.
//!
//! ## Submodules
//!
//! - **native_config**: Walks the `Cisco-IOS-XE-native:native` interface tree.
//! - **types**: Defines `InterfaceRecord` and the group exclusion policy.
//! - **error**: Defines `DocumentError` for exports that do not have the expected shape.

mod error;
mod native_config;
mod types;

pub use error::DocumentError;
pub use native_config::{
    filter_eligible, load_document, parse_native_config, CHANNEL_GROUP_KEY, INTERFACE_PATH,
};
pub use types::{is_eligible_group, InterfaceRecord, EXCLUDED_GROUPS};
