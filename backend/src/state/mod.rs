// State management module
// Handles the application store, its entities and the seed data

pub mod action;
pub mod agent;
pub mod app_state;
pub mod mcp;
pub mod message;
mod patch;
pub mod seed;
pub mod tools;

pub use action::StoreAction;
pub use agent::{Agent, AgentId, AgentPatch, AgentStatus, LlmProvider};
pub use app_state::{ActiveView, AppState, UiState};
pub use mcp::{
    ConfigValue, ConnectionId, ConnectionStatus, ConnectionType, McpConfig, McpConnection,
    McpConnectionPatch,
};
pub use message::{Message, MessageType, USER_AGENT_ID};
pub use tools::ToolDescriptor;
