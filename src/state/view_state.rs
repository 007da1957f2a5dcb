// View-local state
// Input buffers, creation forms and the error banner

use code_studio_backend::state::mcp::config_from_json;
use code_studio_backend::state::{Agent, ConnectionType, LlmProvider, McpConnection};
use std::collections::BTreeSet;
use std::fmt::Display;
use tracing::warn;

/// State owned by the views rather than the store
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Text in the chat input line
    pub chat_input: String,
    /// New-agent form
    pub agent_draft: AgentDraft,
    /// Whether the new-agent form is expanded
    pub show_agent_form: bool,
    /// New-connection form
    pub connection_draft: ConnectionDraft,
    /// Whether the new-connection form is expanded
    pub show_connection_form: bool,
    /// Last error shown at the top of the content area
    pub banner: Option<String>,
}

impl ViewState {
    /// Create an empty view state
    pub fn new() -> Self {
        Self::default()
    }

    /// Log an error and show it in the banner
    pub fn report(&mut self, err: impl Display) {
        let message = err.to_string();
        warn!(error = %message, "Action failed");
        self.banner = Some(message);
    }

    /// Hide the banner
    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }
}

/// Fields of the new-agent form
#[derive(Debug, Clone)]
pub struct AgentDraft {
    /// Display name
    pub name: String,
    /// Provider picked in the combo box
    pub llm: LlmProvider,
    /// Hex color
    pub color: String,
    /// Ticked tool IDs
    pub tools: BTreeSet<String>,
}

impl Default for AgentDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            llm: LlmProvider::ClaudeSonnet,
            color: "#f59e0b".to_string(),
            tools: BTreeSet::new(),
        }
    }
}

impl AgentDraft {
    /// Validate the form
    /// Returns Ok(()) if valid, Err with message if invalid
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Agent name cannot be empty".to_string());
        }
        if crate::ui::components::parse_hex_color(&self.color).is_none() {
            return Err(format!("Invalid color {:?}, expected #rrggbb", self.color));
        }
        Ok(())
    }

    /// Build an agent with a fresh ID from the form
    pub fn build(&self) -> Result<Agent, String> {
        self.validate()?;
        Ok(
            Agent::new(Agent::generate_id(), self.name.trim().to_string(), self.llm)
                .with_color(self.color.trim())
                .with_tools(self.tools.iter().cloned()),
        )
    }
}

/// Fields of the new-connection form
#[derive(Debug, Clone)]
pub struct ConnectionDraft {
    /// Display name
    pub name: String,
    /// Integration kind
    pub connection_type: ConnectionType,
    /// Configuration as a JSON object
    pub config_json: String,
}

impl Default for ConnectionDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            connection_type: ConnectionType::FileSystem,
            config_json: "{}".to_string(),
        }
    }
}

impl ConnectionDraft {
    /// Build a disconnected connection with a fresh ID from the form
    pub fn build(&self) -> Result<McpConnection, String> {
        if self.name.trim().is_empty() {
            return Err("Connection name cannot be empty".to_string());
        }
        let raw: serde_json::Value = serde_json::from_str(&self.config_json)
            .map_err(|e| format!("Configuration is not valid JSON: {}", e))?;
        let config = config_from_json("config", &raw).map_err(|e| e.to_string())?;

        let mut connection = McpConnection::new(
            McpConnection::generate_id(),
            self.name.trim().to_string(),
            self.connection_type,
        );
        connection.config = config;
        Ok(connection)
    }
}
