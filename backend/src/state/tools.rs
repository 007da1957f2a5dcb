//! Built-in tool catalog
//!
//! Read-only descriptions of the tools agents can list in their `tools`
//! field. Nothing is executed; the catalog only backs the tools view.

use super::mcp::{ConfigValue, McpConfig};

/// Description of a built-in tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    /// Identifier referenced from `Agent::tools`
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Card color as a `#rrggbb` hex string
    pub color: &'static str,
    /// Whether the tool is offered to agents
    pub enabled: bool,
    /// Display-only settings
    pub config: McpConfig,
}

fn text(value: &str) -> ConfigValue {
    ConfigValue::Text(value.to_string())
}

fn config<const N: usize>(entries: [(&str, ConfigValue); N]) -> McpConfig {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// The six built-in tools, in display order
pub fn builtin_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            id: "search",
            name: "Web Search",
            description: "Search the web for information and documentation",
            color: "#3b82f6",
            enabled: true,
            config: config([("provider", text("Serper API")), ("rateLimit", text("100/day"))]),
        },
        ToolDescriptor {
            id: "file-search",
            name: "File Search",
            description: "Search files in your project by name or pattern",
            color: "#10b981",
            enabled: true,
            config: config([
                ("extensions", text(".ts, .tsx, .js, .jsx, .py")),
                ("maxDepth", ConfigValue::Integer(10)),
            ]),
        },
        ToolDescriptor {
            id: "text-search",
            name: "Text Search",
            description: "Search for text content within files",
            color: "#8b5cf6",
            enabled: true,
            config: config([
                ("caseSensitive", ConfigValue::Bool(false)),
                ("regex", ConfigValue::Bool(true)),
            ]),
        },
        ToolDescriptor {
            id: "bash-run",
            name: "Bash Command",
            description: "Execute bash commands on the server",
            color: "#f59e0b",
            enabled: true,
            config: config([("timeout", text("30s")), ("workingDir", text("/workspace"))]),
        },
        ToolDescriptor {
            id: "docker-exec",
            name: "Docker Execute",
            description: "Run commands in Docker containers on remote VPS",
            color: "#06b6d4",
            enabled: true,
            config: config([
                ("host", text("192.168.1.100")),
                ("port", ConfigValue::Integer(2375)),
            ]),
        },
        ToolDescriptor {
            id: "github-mcp",
            name: "GitHub MCP",
            description: "Interact with GitHub repositories and issues",
            color: "#6366f1",
            enabled: true,
            config: config([("auth", text("OAuth")), ("scope", text("repo, issues"))]),
        },
    ]
}

/// Look up a built-in tool by ID
pub fn tool(id: &str) -> Option<ToolDescriptor> {
    builtin_tools().into_iter().find(|tool| tool.id == id)
}
