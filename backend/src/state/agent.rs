//! Agent model
//!
//! Defines the agent record, its closed enumerations (LLM provider and
//! status) and the partial update applied by `AppState::update_agent`.

use super::patch;
use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for an agent
pub type AgentId = String;

/// Language-model provider an agent is configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LlmProvider {
    /// Anthropic Claude 3.5 Sonnet
    #[serde(rename = "claude-3.5-sonnet")]
    ClaudeSonnet,
    /// OpenAI GPT-4
    #[serde(rename = "gpt-4")]
    Gpt4,
    /// Google Gemini Pro
    #[serde(rename = "gemini-pro")]
    GeminiPro,
    /// Meta Llama 3
    #[serde(rename = "llama-3")]
    Llama3,
    /// Mistral Large
    #[serde(rename = "mistral-large")]
    MistralLarge,
}

impl LlmProvider {
    /// Every provider, in the order offered by the provider picker
    pub const ALL: [LlmProvider; 5] = [
        LlmProvider::ClaudeSonnet,
        LlmProvider::Gpt4,
        LlmProvider::GeminiPro,
        LlmProvider::Llama3,
        LlmProvider::MistralLarge,
    ];

    /// Wire name of the provider
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::ClaudeSonnet => "claude-3.5-sonnet",
            LlmProvider::Gpt4 => "gpt-4",
            LlmProvider::GeminiPro => "gemini-pro",
            LlmProvider::Llama3 => "llama-3",
            LlmProvider::MistralLarge => "mistral-large",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LlmProvider {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LlmProvider::ALL
            .into_iter()
            .find(|provider| provider.as_str() == s)
            .ok_or_else(|| StoreError::InvalidEnumValue {
                kind: "llm provider",
                value: s.to_string(),
            })
    }
}

/// Agent status enumeration
/// Represents what the agent is doing in the current chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// Waiting for input
    #[default]
    Idle,
    /// Composing a reply
    Thinking,
    /// Running a tool
    Executing,
}

impl AgentStatus {
    /// Every status
    pub const ALL: [AgentStatus; 3] = [
        AgentStatus::Idle,
        AgentStatus::Thinking,
        AgentStatus::Executing,
    ];

    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Idle => "idle",
            AgentStatus::Thinking => "thinking",
            AgentStatus::Executing => "executing",
        }
    }

    /// Whether the agent is busy with a turn
    pub fn is_busy(&self) -> bool {
        !matches!(self, AgentStatus::Idle)
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StoreError::InvalidEnumValue {
                kind: "agent status",
                value: s.to_string(),
            })
    }
}

/// A configured chat participant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Unique identifier for the agent
    pub id: AgentId,
    /// Display name of the agent
    pub name: String,
    /// Selected language-model provider
    pub llm: LlmProvider,
    /// Power toggle shown on the agent card.
    /// Independent of the store's active-agent pointer.
    pub is_active: bool,
    /// Display color as a `#rrggbb` hex string
    pub color: String,
    /// Enabled tool identifiers (not checked against the tool catalog)
    pub tools: Vec<String>,
    /// Current status of the agent
    pub status: AgentStatus,
}

impl Agent {
    /// Create an idle, powered-off agent with no tools
    pub fn new(id: AgentId, name: String, llm: LlmProvider) -> Self {
        Self {
            id,
            name,
            llm,
            is_active: false,
            color: "#64748b".to_string(),
            tools: Vec::new(),
            status: AgentStatus::Idle,
        }
    }

    /// Set the display color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the enabled tools
    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools = tools.into_iter().map(Into::into).collect();
        self
    }

    /// Generate a new unique ID for an agent
    /// Uses UUID v4 for uniqueness
    pub fn generate_id() -> AgentId {
        Uuid::new_v4().to_string()
    }
}

/// Partial update for an agent
///
/// Present fields overwrite the agent's fields; absent fields are left alone.
/// The ID is not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentPatch {
    /// New display name
    pub name: Option<String>,
    /// New LLM provider
    pub llm: Option<LlmProvider>,
    /// New power toggle value
    pub is_active: Option<bool>,
    /// New display color
    pub color: Option<String>,
    /// Replacement tool list
    pub tools: Option<Vec<String>>,
    /// New status
    pub status: Option<AgentStatus>,
}

impl AgentPatch {
    /// Patch that only changes the status
    pub fn status(status: AgentStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Parse a patch from a JSON object using the agent's wire field names
    ///
    /// Fails on unknown or non-patchable fields, wrongly typed values, and
    /// enum values outside the closed sets.
    pub fn from_json(value: &Value) -> Result<Self, StoreError> {
        let mut out = AgentPatch::default();
        for (field, value) in patch::as_object(value)? {
            match field.as_str() {
                "name" => out.name = Some(patch::string(field, value)?),
                "llm" => out.llm = Some(patch::enumeration(field, value)?),
                "isActive" => out.is_active = Some(patch::boolean(field, value)?),
                "color" => out.color = Some(patch::string(field, value)?),
                "tools" => out.tools = Some(patch::string_list(field, value)?),
                "status" => out.status = Some(patch::enumeration(field, value)?),
                "id" => return Err(StoreError::invalid_field(field, "agent id cannot be changed")),
                _ => return Err(StoreError::invalid_field(field, "unknown agent field")),
            }
        }
        Ok(out)
    }

    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == AgentPatch::default()
    }

    /// Merge the present fields over the agent
    pub fn apply(&self, agent: &mut Agent) {
        if let Some(name) = &self.name {
            agent.name = name.clone();
        }
        if let Some(llm) = self.llm {
            agent.llm = llm;
        }
        if let Some(is_active) = self.is_active {
            agent.is_active = is_active;
        }
        if let Some(color) = &self.color {
            agent.color = color.clone();
        }
        if let Some(tools) = &self.tools {
            agent.tools = tools.clone();
        }
        if let Some(status) = self.status {
            agent.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Agent {
        Agent::new("a".to_string(), "Sample".to_string(), LlmProvider::Gpt4)
            .with_color("#123456")
            .with_tools(["bash-run"])
    }

    #[test]
    fn test_provider_round_trips_through_wire_names() {
        for provider in LlmProvider::ALL {
            assert_eq!(provider.as_str().parse::<LlmProvider>().unwrap(), provider);
            assert_eq!(
                serde_json::to_value(provider).unwrap(),
                json!(provider.as_str())
            );
        }
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let err = "gpt-5".parse::<LlmProvider>().unwrap_err();
        assert_eq!(
            err,
            StoreError::InvalidEnumValue {
                kind: "llm provider",
                value: "gpt-5".to_string()
            }
        );
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("executing".parse::<AgentStatus>().unwrap(), AgentStatus::Executing);
        assert!("Idle".parse::<AgentStatus>().is_err());
        for status in AgentStatus::ALL {
            assert_eq!(status.as_str().parse::<AgentStatus>().unwrap(), status);
            assert_eq!(serde_json::to_value(status).unwrap(), json!(status.as_str()));
        }
        assert!(!AgentStatus::Idle.is_busy());
        assert!(AgentStatus::Thinking.is_busy());
    }

    #[test]
    fn test_agent_serializes_with_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["isActive"], json!(false));
        assert_eq!(value["llm"], json!("gpt-4"));
        assert_eq!(value["status"], json!("idle"));
    }

    #[test]
    fn test_agent_generate_id() {
        let id1 = Agent::generate_id();
        let id2 = Agent::generate_id();
        assert_ne!(id1, id2);
        assert!(!id1.is_empty());
    }

    #[test]
    fn test_patch_merges_only_present_fields() {
        let mut agent = sample();
        AgentPatch::status(AgentStatus::Thinking).apply(&mut agent);

        let mut expected = sample();
        expected.status = AgentStatus::Thinking;
        assert_eq!(agent, expected);
    }

    #[test]
    fn test_patch_from_json() {
        let patch = AgentPatch::from_json(&json!({
            "llm": "llama-3",
            "tools": ["search"],
            "isActive": true
        }))
        .unwrap();
        assert_eq!(patch.llm, Some(LlmProvider::Llama3));
        assert_eq!(patch.tools, Some(vec!["search".to_string()]));
        assert_eq!(patch.is_active, Some(true));
        assert!(patch.name.is_none());
    }

    #[test]
    fn test_patch_from_json_rejects_bad_input() {
        assert!(matches!(
            AgentPatch::from_json(&json!({"status": "sleeping"})),
            Err(StoreError::InvalidEnumValue { kind: "agent status", .. })
        ));
        assert!(matches!(
            AgentPatch::from_json(&json!({"id": "2"})),
            Err(StoreError::InvalidField { .. })
        ));
        assert!(matches!(
            AgentPatch::from_json(&json!({"nickname": "x"})),
            Err(StoreError::InvalidField { .. })
        ));
        assert!(AgentPatch::from_json(&json!({})).unwrap().is_empty());
    }
}
