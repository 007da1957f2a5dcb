//! Scripted agent responses
//!
//! A response script is the ordered list of messages an agent "produces" in
//! one turn, each released after a delay measured from the previous step.

use crate::config::SimulationConfig;
use crate::state::{AgentStatus, Message, MessageType};
use std::time::Duration;

/// One step of a scripted turn
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptStep {
    /// Wait before this step, counted from the previous step
    pub delay: Duration,
    /// Kind of message produced
    pub message_type: MessageType,
    /// Message content
    pub content: String,
    /// Tool name for tool-call steps
    pub tool_name: Option<String>,
    /// Code language annotation
    pub language: Option<String>,
    /// Agent status once this step has been applied
    pub status_after: AgentStatus,
}

impl ScriptStep {
    /// Build the message this step appends for `agent_id`
    pub fn to_message(&self, agent_id: &str) -> Message {
        let mut message = Message::new(agent_id, self.message_type, self.content.clone());
        message.tool_name = self.tool_name.clone();
        message.language = self.language.clone();
        message
    }
}

/// Ordered steps of a simulated turn
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseScript {
    steps: Vec<ScriptStep>,
}

const REPLY: &str =
    "I'll help you with that. Let me analyze the request and execute the necessary tools...";
const TOOL_CALL: &str = "Searching files for matching patterns...";
const RESULT: &str = "```javascript
// Found 3 matching files
const results = [
  \"src/components/Header.tsx\",
  \"src/components/Sidebar.tsx\",
  \"src/lib/utils.ts\"
]
```";

impl ResponseScript {
    /// Create a script from explicit steps
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self { steps }
    }

    /// The standard reply / file-search / result script with configured delays
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(vec![
            ScriptStep {
                delay: config.reply_delay(),
                message_type: MessageType::Message,
                content: REPLY.to_string(),
                tool_name: None,
                language: None,
                status_after: AgentStatus::Executing,
            },
            ScriptStep {
                delay: config.tool_call_delay(),
                message_type: MessageType::ToolCall,
                content: TOOL_CALL.to_string(),
                tool_name: Some("file-search".to_string()),
                language: None,
                status_after: AgentStatus::Executing,
            },
            ScriptStep {
                delay: config.result_delay(),
                message_type: MessageType::Result,
                content: RESULT.to_string(),
                tool_name: None,
                language: Some("javascript".to_string()),
                status_after: AgentStatus::Idle,
            },
        ])
    }

    /// Steps in playback order
    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    /// Whether the script produces nothing
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Time from submission to the last step
    pub fn total_delay(&self) -> Duration {
        self.steps.iter().map(|step| step.delay).sum()
    }
}

impl Default for ResponseScript {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_script_shape() {
        let script = ResponseScript::default();
        let types: Vec<_> = script.steps().iter().map(|s| s.message_type).collect();
        assert_eq!(
            types,
            [MessageType::Message, MessageType::ToolCall, MessageType::Result]
        );
        assert_eq!(script.total_delay(), Duration::from_millis(3300));
        assert_eq!(script.steps()[2].status_after, AgentStatus::Idle);
    }

    #[test]
    fn test_step_to_message() {
        let script = ResponseScript::default();
        let tool_call = script.steps()[1].to_message("2");
        assert_eq!(tool_call.agent_id, "2");
        assert_eq!(tool_call.tool_name.as_deref(), Some("file-search"));

        let result = script.steps()[2].to_message("2");
        assert_eq!(result.language.as_deref(), Some("javascript"));
        assert!(result.code_block().unwrap().starts_with("// Found 3 matching files"));
    }

    #[test]
    fn test_delays_follow_config() {
        let config = SimulationConfig {
            reply_delay_ms: 1,
            tool_call_delay_ms: 2,
            result_delay_ms: 3,
            ..Default::default()
        };
        let script = ResponseScript::from_config(&config);
        assert_eq!(script.total_delay(), Duration::from_millis(6));
    }
}
