// Application state store
// Holds agents, the chat transcript, MCP connections and view selection

use super::action::StoreAction;
use super::agent::{Agent, AgentId, AgentPatch, AgentStatus};
use super::mcp::{ConnectionStatus, McpConnection, McpConnectionPatch};
use super::message::Message;
use super::seed;
use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// The four top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    /// Conversation with the active agent
    #[default]
    Chat,
    /// Agent management
    Agents,
    /// Tool catalog
    Tools,
    /// MCP connections
    Mcp,
}

impl ActiveView {
    /// Every view, in sidebar order
    pub const ALL: [ActiveView; 4] = [
        ActiveView::Chat,
        ActiveView::Agents,
        ActiveView::Tools,
        ActiveView::Mcp,
    ];

    /// Wire name of the view
    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveView::Chat => "chat",
            ActiveView::Agents => "agents",
            ActiveView::Tools => "tools",
            ActiveView::Mcp => "mcp",
        }
    }

    /// Sidebar label
    pub fn label(&self) -> &'static str {
        match self {
            ActiveView::Chat => "Chat",
            ActiveView::Agents => "Agents",
            ActiveView::Tools => "Tools",
            ActiveView::Mcp => "MCP",
        }
    }
}

impl fmt::Display for ActiveView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UI-specific state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    /// Whether the navigation sidebar is open
    pub sidebar_open: bool,
    /// Currently visible view
    pub active_view: ActiveView,
}

/// Main application state
///
/// The single source of truth for every view. Reads borrow the current
/// contents; every mutation goes through a method (or [`AppState::dispatch`])
/// and either succeeds completely or leaves the state untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    agents: Vec<Agent>,
    messages: Vec<Message>,
    mcp_connections: Vec<McpConnection>,
    active_agent_id: Option<AgentId>,
    #[serde(flatten)]
    ui_state: UiState,
    #[serde(skip)]
    revision: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            agents: seed::seed_agents(),
            messages: Vec::new(),
            mcp_connections: seed::seed_connections(),
            active_agent_id: Some(seed::SEED_ACTIVE_AGENT.to_string()),
            ui_state: UiState::default(),
            revision: 0,
        }
    }
}

impl AppState {
    /// Create a store populated with the seed agents and connections
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with no agents, messages or connections
    pub fn empty() -> Self {
        Self {
            agents: Vec::new(),
            messages: Vec::new(),
            mcp_connections: Vec::new(),
            active_agent_id: None,
            ui_state: UiState::default(),
            revision: 0,
        }
    }

    // ---- reads ----

    /// Agents in insertion order
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Transcript in insertion order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// MCP connections in insertion order
    pub fn mcp_connections(&self) -> &[McpConnection] {
        &self.mcp_connections
    }

    /// Raw active-agent pointer
    pub fn active_agent_id(&self) -> Option<&str> {
        self.active_agent_id.as_deref()
    }

    /// Currently visible view
    pub fn active_view(&self) -> ActiveView {
        self.ui_state.active_view
    }

    /// Whether the navigation sidebar is open
    pub fn sidebar_open(&self) -> bool {
        self.ui_state.sidebar_open
    }

    /// Number of successful mutations since construction
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Get an agent by ID (first match)
    pub fn agent(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.id == id)
    }

    /// Get a connection by ID (first match)
    pub fn connection(&self, id: &str) -> Option<&McpConnection> {
        self.mcp_connections.iter().find(|conn| conn.id == id)
    }

    /// Resolve the active-agent pointer
    pub fn active_agent(&self) -> Option<&Agent> {
        self.active_agent_id.as_deref().and_then(|id| self.agent(id))
    }

    /// Get the number of agents
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Number of connections whose status is connected
    pub fn connected_count(&self) -> usize {
        self.mcp_connections
            .iter()
            .filter(|conn| conn.status == ConnectionStatus::Connected)
            .count()
    }

    /// Serialize a full snapshot of the state
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    // ---- agents ----

    /// Append an agent (IDs are not checked for uniqueness)
    pub fn add_agent(&mut self, agent: Agent) {
        debug!(agent_id = %agent.id, name = %agent.name, "Adding agent");
        self.agents.push(agent);
        self.bump();
    }

    /// Merge `patch` over every agent with the given ID
    pub fn update_agent(&mut self, id: &str, patch: &AgentPatch) -> Result<(), StoreError> {
        let mut matched = false;
        for agent in self.agents.iter_mut().filter(|agent| agent.id == id) {
            patch.apply(agent);
            matched = true;
        }
        if !matched {
            return Err(StoreError::AgentNotFound(id.to_string()));
        }
        debug!(agent_id = %id, ?patch, "Updated agent");
        self.bump();
        Ok(())
    }

    /// Parse a JSON patch and apply it; nothing changes if parsing fails
    pub fn update_agent_from_json(&mut self, id: &str, patch: &Value) -> Result<(), StoreError> {
        let patch = AgentPatch::from_json(patch)?;
        self.update_agent(id, &patch)
    }

    /// Remove every agent with the given ID
    ///
    /// Clears the active-agent pointer if it named this agent.
    /// Returns the first removed agent.
    pub fn remove_agent(&mut self, id: &str) -> Result<Agent, StoreError> {
        let index = self
            .agents
            .iter()
            .position(|agent| agent.id == id)
            .ok_or_else(|| StoreError::AgentNotFound(id.to_string()))?;
        let removed = self.agents.remove(index);
        self.agents.retain(|agent| agent.id != id);

        if self.active_agent_id.as_deref() == Some(id) {
            self.active_agent_id = None;
        }
        debug!(agent_id = %id, "Removed agent");
        self.bump();
        Ok(removed)
    }

    /// Point the active agent at an existing agent, or clear it with `None`
    pub fn set_active_agent(&mut self, id: Option<&str>) -> Result<(), StoreError> {
        if let Some(id) = id {
            if self.agent(id).is_none() {
                return Err(StoreError::InvalidActiveReference(id.to_string()));
            }
        }
        self.active_agent_id = id.map(str::to_string);
        debug!(active_agent_id = ?self.active_agent_id, "Set active agent");
        self.bump();
        Ok(())
    }

    /// Change an agent's status
    pub fn set_agent_status(&mut self, id: &str, status: AgentStatus) -> Result<(), StoreError> {
        self.update_agent(id, &AgentPatch::status(status))
    }

    /// Flip an agent's power toggle (`is_active`)
    pub fn toggle_agent_power(&mut self, id: &str) -> Result<(), StoreError> {
        let current = self
            .agent(id)
            .map(|agent| agent.is_active)
            .ok_or_else(|| StoreError::AgentNotFound(id.to_string()))?;
        let patch = AgentPatch {
            is_active: Some(!current),
            ..Default::default()
        };
        self.update_agent(id, &patch)
    }

    // ---- messages ----

    /// Append a message to the transcript
    pub fn add_message(&mut self, message: Message) {
        debug!(
            message_id = %message.id,
            agent_id = %message.agent_id,
            message_type = %message.message_type,
            "Adding message"
        );
        self.messages.push(message);
        self.bump();
    }

    /// Empty the transcript
    pub fn clear_messages(&mut self) {
        debug!(count = self.messages.len(), "Clearing messages");
        self.messages.clear();
        self.bump();
    }

    // ---- MCP connections ----

    /// Append a connection (IDs are not checked for uniqueness)
    pub fn add_mcp_connection(&mut self, connection: McpConnection) {
        debug!(connection_id = %connection.id, name = %connection.name, "Adding MCP connection");
        self.mcp_connections.push(connection);
        self.bump();
    }

    /// Merge `patch` over every connection with the given ID
    pub fn update_mcp_connection(
        &mut self,
        id: &str,
        patch: &McpConnectionPatch,
    ) -> Result<(), StoreError> {
        let mut matched = false;
        for connection in self.mcp_connections.iter_mut().filter(|conn| conn.id == id) {
            patch.apply(connection);
            matched = true;
        }
        if !matched {
            return Err(StoreError::ConnectionNotFound(id.to_string()));
        }
        debug!(connection_id = %id, ?patch, "Updated MCP connection");
        self.bump();
        Ok(())
    }

    /// Parse a JSON patch and apply it; nothing changes if parsing fails
    pub fn update_mcp_connection_from_json(
        &mut self,
        id: &str,
        patch: &Value,
    ) -> Result<(), StoreError> {
        let patch = McpConnectionPatch::from_json(patch)?;
        self.update_mcp_connection(id, &patch)
    }

    /// Remove every connection with the given ID, returning the first
    pub fn remove_mcp_connection(&mut self, id: &str) -> Result<McpConnection, StoreError> {
        let index = self
            .mcp_connections
            .iter()
            .position(|conn| conn.id == id)
            .ok_or_else(|| StoreError::ConnectionNotFound(id.to_string()))?;
        let removed = self.mcp_connections.remove(index);
        self.mcp_connections.retain(|conn| conn.id != id);
        debug!(connection_id = %id, "Removed MCP connection");
        self.bump();
        Ok(removed)
    }

    /// Connect a disconnected (or failed) connection, disconnect a connected one
    pub fn toggle_connection(&mut self, id: &str) -> Result<ConnectionStatus, StoreError> {
        let next = self
            .connection(id)
            .map(|conn| conn.status.toggled())
            .ok_or_else(|| StoreError::ConnectionNotFound(id.to_string()))?;
        self.update_mcp_connection(id, &McpConnectionPatch::status(next))?;
        Ok(next)
    }

    // ---- view selection ----

    /// Flip sidebar visibility
    pub fn toggle_sidebar(&mut self) {
        self.ui_state.sidebar_open = !self.ui_state.sidebar_open;
        self.bump();
    }

    /// Switch the visible view
    pub fn set_active_view(&mut self, view: ActiveView) {
        debug!(%view, "Switching view");
        self.ui_state.active_view = view;
        self.bump();
    }

    /// Restore the seed state; the revision counter keeps counting
    pub fn reset(&mut self) {
        let revision = self.revision;
        *self = Self {
            revision,
            ..Self::default()
        };
        debug!("State reset to seed data");
        self.bump();
    }

    // ---- dispatch ----

    /// Apply a store action
    pub fn dispatch(&mut self, action: StoreAction) -> Result<(), StoreError> {
        match action {
            StoreAction::AddAgent { agent } => self.add_agent(agent),
            StoreAction::UpdateAgent { id, patch } => self.update_agent_from_json(&id, &patch)?,
            StoreAction::RemoveAgent { id } => {
                self.remove_agent(&id)?;
            }
            StoreAction::SetActiveAgent { id } => self.set_active_agent(id.as_deref())?,
            StoreAction::SetAgentStatus { id, status } => self.set_agent_status(&id, status)?,
            StoreAction::ToggleAgentPower { id } => self.toggle_agent_power(&id)?,
            StoreAction::AddMessage { message } => self.add_message(message),
            StoreAction::ClearMessages => self.clear_messages(),
            StoreAction::AddMcpConnection { connection } => self.add_mcp_connection(connection),
            StoreAction::UpdateMcpConnection { id, patch } => {
                self.update_mcp_connection_from_json(&id, &patch)?
            }
            StoreAction::RemoveMcpConnection { id } => {
                self.remove_mcp_connection(&id)?;
            }
            StoreAction::ToggleConnection { id } => {
                self.toggle_connection(&id)?;
            }
            StoreAction::ToggleSidebar => self.toggle_sidebar(),
            StoreAction::SetActiveView { view } => self.set_active_view(view),
            StoreAction::Reset => self.reset(),
        }
        Ok(())
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}
