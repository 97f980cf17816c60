use crate::parse::InterfaceRecord;
use serde_json::Value;

/// Result of attempting to create the `interfaces` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// The table did not exist and has been created.
    Created,
    /// The table was already there; the creation attempt was rolled back.
    AlreadyExists,
}

/// Result of a batch insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Every row was committed; holds the number of rows written.
    Inserted(usize),
    /// The transaction was rolled back and nothing was written; holds the cause.
    RolledBack(String),
}

/// The columns written for one interface.
///
/// `connection`, `type` and `infra_type` are not populated by the loader and stay `NULL`.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceRow {
    pub name: String,
    pub description: Option<String>,
    pub max_frame_size: Option<i32>,
    pub config: Value,
    pub port_channel_id: Option<i32>,
}

impl TryFrom<&InterfaceRecord> for InterfaceRow {
    type Error = anyhow::Error;

    /// Fails when any extracted field did not fit its column.
    fn try_from(record: &InterfaceRecord) -> Result<Self, Self::Error> {
        if !record.type_errors().is_empty() {
            return Err(anyhow::anyhow!(
                "Type mismatch in interface {}: {}",
                record.derived_name(),
                record.type_errors().join("; ")
            ));
        }

        Ok(Self {
            name: record.derived_name().to_string(),
            description: record.description().map(str::to_string),
            max_frame_size: record.max_frame_size(),
            config: record.raw_config().clone(),
            port_channel_id: record.port_channel_id(),
        })
    }
}
