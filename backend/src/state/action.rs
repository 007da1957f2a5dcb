//! Store actions
//!
//! Every store mutation expressed as a value, so views and tests can dispatch
//! them uniformly and log or replay them.

use super::agent::{Agent, AgentId, AgentStatus};
use super::app_state::ActiveView;
use super::mcp::{ConnectionId, McpConnection};
use super::message::Message;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single store mutation
///
/// Patches travel as JSON so that dispatched actions go through the same
/// validation as `update_agent_from_json` / `update_mcp_connection_from_json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreAction {
    /// Append an agent
    AddAgent {
        /// Agent to append
        agent: Agent,
    },
    /// Patch an agent
    UpdateAgent {
        /// Target agent
        id: AgentId,
        /// Fields to merge, using the agent's wire names
        patch: Value,
    },
    /// Remove an agent
    RemoveAgent {
        /// Target agent
        id: AgentId,
    },
    /// Point the active agent somewhere (or nowhere)
    SetActiveAgent {
        /// New pointer value
        id: Option<AgentId>,
    },
    /// Change an agent's status
    SetAgentStatus {
        /// Target agent
        id: AgentId,
        /// New status
        status: AgentStatus,
    },
    /// Flip an agent's power toggle
    ToggleAgentPower {
        /// Target agent
        id: AgentId,
    },
    /// Append a transcript message
    AddMessage {
        /// Message to append
        message: Message,
    },
    /// Empty the transcript
    ClearMessages,
    /// Append a connection
    AddMcpConnection {
        /// Connection to append
        connection: McpConnection,
    },
    /// Patch a connection
    UpdateMcpConnection {
        /// Target connection
        id: ConnectionId,
        /// Fields to merge, using the connection's wire names
        patch: Value,
    },
    /// Remove a connection
    RemoveMcpConnection {
        /// Target connection
        id: ConnectionId,
    },
    /// Connect or disconnect a connection
    ToggleConnection {
        /// Target connection
        id: ConnectionId,
    },
    /// Flip sidebar visibility
    ToggleSidebar,
    /// Switch the visible view
    SetActiveView {
        /// View to show
        view: ActiveView,
    },
    /// Restore the seed state
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_serialization() {
        let action = StoreAction::SetActiveView {
            view: ActiveView::Mcp,
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json, json!({"type": "set_active_view", "view": "mcp"}));
    }

    #[test]
    fn test_action_deserialization() {
        let action: StoreAction = serde_json::from_value(json!({
            "type": "update_agent",
            "id": "2",
            "patch": {"llm": "llama-3"}
        }))
        .unwrap();
        assert_eq!(
            action,
            StoreAction::UpdateAgent {
                id: "2".to_string(),
                patch: json!({"llm": "llama-3"}),
            }
        );

        let clear: StoreAction = serde_json::from_value(json!({"type": "clear_messages"})).unwrap();
        assert_eq!(clear, StoreAction::ClearMessages);
    }
}
