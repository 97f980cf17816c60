use serde_json::Value;

/// Interface groups that are never persisted.
///
/// Bridge-domain interfaces and loopbacks are device-local constructs with no cabling to
/// inventory, so they are dropped before the export.
pub const EXCLUDED_GROUPS: [&str; 2] = ["BDI", "Loopback"];

/// Returns `true` when interfaces declared under `group_name` should be persisted.
pub fn is_eligible_group(group_name: &str) -> bool {
    !EXCLUDED_GROUPS.contains(&group_name)
}

/// One interface entry found in the configuration export.
///
/// Records are immutable once built; eligibility is decided from the group name at
/// construction and never recomputed. Fields whose document value does not fit their column
/// are left `None` and listed in `type_errors`; such a record cannot be shaped into a row.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceRecord {
    group_name: String,
    interface_name: Option<String>,
    derived_name: String,
    description: Option<String>,
    max_frame_size: Option<i32>,
    raw_config: Value,
    port_channel_id: Option<i32>,
    is_eligible: bool,
    type_errors: Vec<String>,
}

impl InterfaceRecord {
    /// Builds a record from the values extracted for one entry.
    ///
    /// # Arguments
    ///
    /// * `group_name` - The interface family the entry was declared under (e.g., "GigabitEthernet").
    /// * `interface_name` - The vendor identifier within the group (e.g., "0/1").
    /// * `description` - Free-form description, if configured.
    /// * `max_frame_size` - The configured MTU, if any.
    /// * `raw_config` - The complete entry as found in the document.
    /// * `port_channel_id` - The port-channel the interface is bundled into, if any.
    pub fn new(
        group_name: impl Into<String>,
        interface_name: Option<String>,
        description: Option<String>,
        max_frame_size: Option<i32>,
        raw_config: Value,
        port_channel_id: Option<i32>,
    ) -> Self {
        let group_name = group_name.into();
        let derived_name = match &interface_name {
            Some(name) => format!("{}{}", group_name, name),
            None => group_name.clone(),
        };
        let is_eligible = is_eligible_group(&group_name);

        Self {
            group_name,
            interface_name,
            derived_name,
            description,
            max_frame_size,
            raw_config,
            port_channel_id,
            is_eligible,
            type_errors: Vec::new(),
        }
    }

    /// Attaches the column type mismatches found while extracting the entry.
    pub fn with_type_errors(mut self, type_errors: Vec<String>) -> Self {
        self.type_errors = type_errors;
        self
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn interface_name(&self) -> Option<&str> {
        self.interface_name.as_deref()
    }

    /// Group name followed by interface name, e.g. "GigabitEthernet0/1".
    pub fn derived_name(&self) -> &str {
        &self.derived_name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn max_frame_size(&self) -> Option<i32> {
        self.max_frame_size
    }

    pub fn raw_config(&self) -> &Value {
        &self.raw_config
    }

    pub fn port_channel_id(&self) -> Option<i32> {
        self.port_channel_id
    }

    pub fn is_eligible(&self) -> bool {
        self.is_eligible
    }

    /// Fields whose value could not be stored in its column, e.g. `mtu: "jumbo" is not an integer`.
    pub fn type_errors(&self) -> &[String] {
        &self.type_errors
    }
}
