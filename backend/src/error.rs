//! Error types for store mutations
//!
//! Every fallible store operation returns a `StoreError`. Errors are local to
//! the call that produced them: a failed mutation never changes the state.

use thiserror::Error;

/// Store-level error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Agent with the given ID was not found
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    /// MCP connection with the given ID was not found
    #[error("MCP connection not found: {0}")]
    ConnectionNotFound(String),

    /// A value outside one of the closed enumerations (status, provider, type...)
    #[error("Invalid {kind} value: {value:?}")]
    InvalidEnumValue {
        /// Name of the enumeration, e.g. "llm provider"
        kind: &'static str,
        /// The rejected value as supplied
        value: String,
    },

    /// Attempted to point the active agent at an ID that does not exist
    #[error("Cannot activate unknown agent: {0}")]
    InvalidActiveReference(String),

    /// A patch field had the wrong shape or is not patchable
    #[error("Invalid field {field:?}: {reason}")]
    InvalidField {
        /// Field name as supplied
        field: String,
        /// Human readable explanation
        reason: String,
    },
}

impl StoreError {
    /// Shorthand for building an `InvalidField` error
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StoreError::AgentNotFound("9".to_string()).to_string(),
            "Agent not found: 9"
        );
        assert_eq!(
            StoreError::InvalidEnumValue {
                kind: "agent status",
                value: "sleeping".to_string(),
            }
            .to_string(),
            "Invalid agent status value: \"sleeping\""
        );
        assert_eq!(
            StoreError::invalid_field("id", "not patchable").to_string(),
            "Invalid field \"id\": not patchable"
        );
    }
}
