use super::error::DocumentError;
use super::types::InterfaceRecord;
use anyhow::{Context, Result as AnyhowResult};
use log::debug;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Keys leading from the document root to the object of interface groups.
pub const INTERFACE_PATH: [&str; 3] = [
    "frinx-uniconfig-topology:configuration",
    "Cisco-IOS-XE-native:native",
    "interface",
];

/// Key of the optional object describing port-channel membership.
pub const CHANNEL_GROUP_KEY: &str = "Cisco-IOS-XE-ethernet:channel-group";

/// Reads and decodes a configuration export from disk.
///
/// # Arguments
///
/// * `path` - Location of the JSON export.
///
/// # Returns
///
/// * `Ok(Value)` - The decoded document.
/// * `Err(anyhow::Error)` - The file could not be read or is not valid JSON.
pub fn load_document(path: &Path) -> AnyhowResult<Value> {
    let content = fs::read_to_string(path)
        .context(format!("Failed to read configuration export: {}", path.display()))?;
    let document: Value = serde_json::from_str(&content)
        .context(format!("Failed to decode configuration export: {}", path.display()))?;
    Ok(document)
}

/// Walks the interface groups of a configuration export into records.
///
/// Every entry of every group produces one `InterfaceRecord`, eligible or not. Records come
/// out in document order: groups in the order they appear, then entries within each group.
///
/// # Arguments
///
/// * `document` - The decoded configuration export.
///
/// # Returns
///
/// * `Ok(Vec<InterfaceRecord>)` - One record per interface entry.
/// * `Err(DocumentError)` - The interface tree is missing or has the wrong shape.
///
/// # Examples
///
/// ```rust
/// use interface_loader::parse::parse_native_config;
/// use serde_json::json;
///
/// let document = json!({
///   "frinx-uniconfig-topology:configuration": {
///     "Cisco-IOS-XE-native:native": {
///       "interface": {
///         "GigabitEthernet": [{"name": "0/1", "description": "uplink", "mtu": 1500}]
///       }
///     }
///   }
/// });
/// let records = parse_native_config(&document).unwrap();
/// assert_eq!(records[0].derived_name(), "GigabitEthernet0/1");
/// assert_eq!(records[0].max_frame_size(), Some(1500));
/// ```
pub fn parse_native_config(document: &Value) -> Result<Vec<InterfaceRecord>, DocumentError> {
    let groups = interface_groups(document)?;
    let mut records = Vec::new();

    for (group_name, entries) in groups {
        let entries = entries.as_array().ok_or_else(|| DocumentError::UnexpectedShape {
            path: format!("{}/{}", INTERFACE_PATH.join("/"), group_name),
            expected: "an array of interface entries",
        })?;
        debug!("Group {} declares {} interface(s)", group_name, entries.len());

        for (index, entry) in entries.iter().enumerate() {
            let fields = entry.as_object().ok_or_else(|| DocumentError::UnexpectedShape {
                path: format!("{}/{}/{}", INTERFACE_PATH.join("/"), group_name, index),
                expected: "an interface object",
            })?;
            records.push(parse_interface(group_name, fields, entry));
        }
    }

    Ok(records)
}

/// Keeps only the records whose group is not excluded, preserving order.
pub fn filter_eligible(records: Vec<InterfaceRecord>) -> Vec<InterfaceRecord> {
    records.into_iter().filter(InterfaceRecord::is_eligible).collect()
}

/// Follows `INTERFACE_PATH` down to the object of interface groups.
fn interface_groups(document: &Value) -> Result<&Map<String, Value>, DocumentError> {
    let mut current = document;
    for key in INTERFACE_PATH {
        current = current.get(key).ok_or_else(|| DocumentError::MissingKey {
            key: key.to_string(),
        })?;
    }
    current.as_object().ok_or_else(|| DocumentError::UnexpectedShape {
        path: INTERFACE_PATH.join("/"),
        expected: "an object of interface groups",
    })
}

/// Extracts the columns of a single interface entry.
///
/// A value that cannot be stored in its column is not dropped silently: it is recorded on
/// the record so the insert of the whole batch fails.
fn parse_interface(group_name: &str, fields: &Map<String, Value>, entry: &Value) -> InterfaceRecord {
    let mut type_errors = Vec::new();
    let interface_name = extract(fields.get("name"), "name", value_to_text, &mut type_errors);
    let description = extract(fields.get("description"), "description", value_to_text, &mut type_errors);
    let max_frame_size = extract(fields.get("mtu"), "mtu", value_to_i32, &mut type_errors);
    // channel-group is only present on interfaces bundled into a port-channel
    let port_channel_id = match fields.get(CHANNEL_GROUP_KEY) {
        None | Some(Value::Null) => None,
        Some(Value::Object(group)) => extract(
            group.get("number"),
            "channel-group number",
            value_to_i32,
            &mut type_errors,
        ),
        Some(other) => {
            type_errors.push(format!("{}: expected an object, found {}", CHANNEL_GROUP_KEY, other));
            None
        }
    };

    InterfaceRecord::new(
        group_name,
        interface_name,
        description,
        max_frame_size,
        entry.clone(),
        port_channel_id,
    )
    .with_type_errors(type_errors)
}

/// Converts an optional field, pushing a labelled message to `type_errors` on mismatch.
fn extract<T>(
    value: Option<&Value>,
    label: &str,
    convert: fn(&Value) -> Result<Option<T>, String>,
    type_errors: &mut Vec<String>,
) -> Option<T> {
    let value = value?;
    match convert(value) {
        Ok(converted) => converted,
        Err(reason) => {
            type_errors.push(format!("{}: {}", label, reason));
            None
        }
    }
}

/// Reads a `VARCHAR` column value. Interface names are numbers for some groups.
fn value_to_text(value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(format!("expected text, found {}", other)),
    }
}

/// Reads an `INTEGER` column value from a JSON number or numeric string.
fn value_to_i32(value: &Value) -> Result<Option<i32>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => number_to_i32(n)
            .map(Some)
            .ok_or_else(|| format!("{} does not fit an INTEGER column", n)),
        Value::String(s) => s
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| format!("\"{}\" is not an integer", s)),
        other => Err(format!("expected an integer, found {}", other)),
    }
}

fn number_to_i32(n: &serde_json::Number) -> Option<i32> {
    if let Some(i) = n.as_i64() {
        return i32::try_from(i).ok();
    }
    // INTEGER columns round numeric input
    n.as_f64()
        .map(f64::round)
        .filter(|f| *f >= i32::MIN as f64 && *f <= i32::MAX as f64)
        .map(|f| f as i32)
}
