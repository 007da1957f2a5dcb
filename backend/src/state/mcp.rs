//! MCP connection model
//!
//! A connection is a named integration endpoint (GitHub, Docker, ...) with a
//! status and a typed key-value configuration.

use super::patch;
use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for an MCP connection
pub type ConnectionId = String;

/// Kind of integration behind a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionType {
    /// GitHub repositories and issues
    Github,
    /// Remote Docker daemon
    Docker,
    /// Web search provider
    Search,
    /// Local file system
    FileSystem,
}

impl ConnectionType {
    /// Every connection type, in picker order
    pub const ALL: [ConnectionType; 4] = [
        ConnectionType::Github,
        ConnectionType::Docker,
        ConnectionType::Search,
        ConnectionType::FileSystem,
    ];

    /// Wire name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionType::Github => "github",
            ConnectionType::Docker => "docker",
            ConnectionType::Search => "search",
            ConnectionType::FileSystem => "file-system",
        }
    }

    /// Label shown on connection cards
    pub fn display_name(&self) -> &'static str {
        match self {
            ConnectionType::Github => "GitHub",
            ConnectionType::Docker => "Docker Remote",
            ConnectionType::Search => "Web Search",
            ConnectionType::FileSystem => "File System",
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectionType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConnectionType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| StoreError::InvalidEnumValue {
                kind: "connection type",
                value: s.to_string(),
            })
    }
}

/// Connection status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// Reachable and in use
    Connected,
    /// Switched off by the user
    Disconnected,
    /// Failed
    Error,
}

impl ConnectionStatus {
    /// Every status
    pub const ALL: [ConnectionStatus; 3] = [
        ConnectionStatus::Connected,
        ConnectionStatus::Disconnected,
        ConnectionStatus::Error,
    ];

    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Error => "error",
        }
    }

    /// Status after pressing the connect/disconnect button
    pub fn toggled(&self) -> Self {
        match self {
            ConnectionStatus::Connected => ConnectionStatus::Disconnected,
            ConnectionStatus::Disconnected | ConnectionStatus::Error => ConnectionStatus::Connected,
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectionStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConnectionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StoreError::InvalidEnumValue {
                kind: "connection status",
                value: s.to_string(),
            })
    }
}

/// A single configuration value
///
/// Values are limited to these kinds; arrays and nulls are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Boolean flag
    Bool(bool),
    /// Whole number (ports, limits)
    Integer(i64),
    /// Fractional number
    Float(f64),
    /// Free text (hosts, providers, masked secrets)
    Text(String),
    /// Nested object
    Object(McpConfig),
}

/// Typed configuration map of a connection, ordered by key
pub type McpConfig = BTreeMap<String, ConfigValue>;

impl ConfigValue {
    /// Convert loosely typed JSON into a config value
    pub fn from_json(field: &str, value: &Value) -> Result<Self, StoreError> {
        match value {
            Value::Bool(flag) => Ok(ConfigValue::Bool(*flag)),
            Value::Number(number) => number
                .as_i64()
                .map(ConfigValue::Integer)
                .or_else(|| number.as_f64().map(ConfigValue::Float))
                .ok_or_else(|| StoreError::invalid_field(field, "number out of range")),
            Value::String(text) => Ok(ConfigValue::Text(text.clone())),
            Value::Object(_) => Ok(ConfigValue::Object(config_from_json(field, value)?)),
            Value::Null | Value::Array(_) => Err(StoreError::invalid_field(
                field,
                "config values must be text, numbers, booleans or objects",
            )),
        }
    }

    /// Whether the value is a masked secret such as `***`
    pub fn is_masked(&self) -> bool {
        matches!(self, ConfigValue::Text(text) if text.contains('*'))
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(flag) => write!(f, "{}", flag),
            ConfigValue::Integer(number) => write!(f, "{}", number),
            ConfigValue::Float(number) => write!(f, "{}", number),
            ConfigValue::Text(text) => f.write_str(text),
            ConfigValue::Object(map) => {
                let json = serde_json::to_string(map).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

/// Convert a JSON object into a typed config map
pub fn config_from_json(field: &str, value: &Value) -> Result<McpConfig, StoreError> {
    let object = value
        .as_object()
        .ok_or_else(|| StoreError::invalid_field(field, "expected a JSON object"))?;
    object
        .iter()
        .map(|(key, value)| {
            let path = format!("{}.{}", field, key);
            Ok((key.clone(), ConfigValue::from_json(&path, value)?))
        })
        .collect()
}

/// Turn a camelCase config key into a spaced label (`workingDir` -> `working Dir`)
pub fn humanize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(ch);
    }
    out.trim().to_string()
}

/// A named integration endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct McpConnection {
    /// Unique identifier for the connection
    pub id: ConnectionId,
    /// Display name
    pub name: String,
    /// Integration kind
    #[serde(rename = "type")]
    pub connection_type: ConnectionType,
    /// Current status
    pub status: ConnectionStatus,
    /// Connection settings
    pub config: McpConfig,
}

impl McpConnection {
    /// Create a disconnected connection with an empty configuration
    pub fn new(id: ConnectionId, name: String, connection_type: ConnectionType) -> Self {
        Self {
            id,
            name,
            connection_type,
            status: ConnectionStatus::Disconnected,
            config: McpConfig::new(),
        }
    }

    /// Set the status
    pub fn with_status(mut self, status: ConnectionStatus) -> Self {
        self.status = status;
        self
    }

    /// Add one configuration entry
    pub fn with_config(mut self, key: impl Into<String>, value: ConfigValue) -> Self {
        self.config.insert(key.into(), value);
        self
    }

    /// Generate a new unique ID for a connection
    pub fn generate_id() -> ConnectionId {
        Uuid::new_v4().to_string()
    }
}

/// Partial update for an MCP connection
///
/// `config` replaces the whole map when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct McpConnectionPatch {
    /// New display name
    pub name: Option<String>,
    /// New integration kind
    pub connection_type: Option<ConnectionType>,
    /// New status
    pub status: Option<ConnectionStatus>,
    /// Replacement configuration
    pub config: Option<McpConfig>,
}

impl McpConnectionPatch {
    /// Patch that only changes the status
    pub fn status(status: ConnectionStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Parse a patch from a JSON object using the connection's wire field names
    pub fn from_json(value: &Value) -> Result<Self, StoreError> {
        let mut out = McpConnectionPatch::default();
        for (field, value) in patch::as_object(value)? {
            match field.as_str() {
                "name" => out.name = Some(patch::string(field, value)?),
                "type" => out.connection_type = Some(patch::enumeration(field, value)?),
                "status" => out.status = Some(patch::enumeration(field, value)?),
                "config" => out.config = Some(config_from_json(field, value)?),
                "id" => {
                    return Err(StoreError::invalid_field(field, "connection id cannot be changed"))
                }
                _ => return Err(StoreError::invalid_field(field, "unknown connection field")),
            }
        }
        Ok(out)
    }

    /// Merge the present fields over the connection
    pub fn apply(&self, connection: &mut McpConnection) {
        if let Some(name) = &self.name {
            connection.name = name.clone();
        }
        if let Some(connection_type) = self.connection_type {
            connection.connection_type = connection_type;
        }
        if let Some(status) = self.status {
            connection.status = status;
        }
        if let Some(config) = &self.config {
            connection.config = config.clone();
        }
    }
}
