// Seed data
// The fixed collections every new store (and every reset) starts from

use super::agent::{Agent, LlmProvider};
use super::mcp::{ConfigValue, ConnectionStatus, ConnectionType, McpConnection};

/// ID of the agent that is active in a freshly seeded store
pub const SEED_ACTIVE_AGENT: &str = "1";

/// The three default agents
pub fn seed_agents() -> Vec<Agent> {
    let mut architect = Agent::new(
        "1".to_string(),
        "Code Architect".to_string(),
        LlmProvider::ClaudeSonnet,
    )
    .with_color("#8b5cf6")
    .with_tools(["file-search", "text-search", "github-mcp", "docker-exec"]);
    architect.is_active = true;

    let devops = Agent::new("2".to_string(), "DevOps Agent".to_string(), LlmProvider::Gpt4)
        .with_color("#3b82f6")
        .with_tools(["docker-exec", "bash-run", "file-system"]);

    let research = Agent::new(
        "3".to_string(),
        "Research Assistant".to_string(),
        LlmProvider::GeminiPro,
    )
    .with_color("#10b981")
    .with_tools(["search", "github-mcp"]);

    vec![architect, devops, research]
}

/// The three default MCP connections
pub fn seed_connections() -> Vec<McpConnection> {
    vec![
        McpConnection::new("1".to_string(), "GitHub".to_string(), ConnectionType::Github)
            .with_status(ConnectionStatus::Connected)
            .with_config("token", ConfigValue::Text("***".to_string())),
        McpConnection::new("2".to_string(), "Remote VPS".to_string(), ConnectionType::Docker)
            .with_status(ConnectionStatus::Connected)
            .with_config("host", ConfigValue::Text("192.168.1.100".to_string()))
            .with_config("port", ConfigValue::Integer(2375)),
        McpConnection::new("3".to_string(), "Web Search".to_string(), ConnectionType::Search)
            .with_status(ConnectionStatus::Connected)
            .with_config("provider", ConfigValue::Text("serper".to_string())),
    ]
}
