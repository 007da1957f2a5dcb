//! Chat transcript messages

use super::agent::AgentId;
use crate::error::StoreError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Reserved agent identifier for messages typed by the human user
pub const USER_AGENT_ID: &str = "user";

/// Kind of transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    /// Plain chat text
    #[default]
    Message,
    /// A code snippet
    Code,
    /// Announcement that a tool is being invoked
    ToolCall,
    /// Output produced by a tool
    Result,
}

impl MessageType {
    /// Every message type
    pub const ALL: [MessageType; 4] = [
        MessageType::Message,
        MessageType::Code,
        MessageType::ToolCall,
        MessageType::Result,
    ];

    /// Wire name of the message type
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Message => "message",
            MessageType::Code => "code",
            MessageType::ToolCall => "tool-call",
            MessageType::Result => "result",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageType::ALL
            .into_iter()
            .find(|message_type| message_type.as_str() == s)
            .ok_or_else(|| StoreError::InvalidEnumValue {
                kind: "message type",
                value: s.to_string(),
            })
    }
}

/// A single transcript entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier for the message
    pub id: String,
    /// Originating agent, or [`USER_AGENT_ID`]
    pub agent_id: AgentId,
    /// Text content; may embed a fenced code block
    pub content: String,
    /// Creation time in milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Kind of entry
    #[serde(rename = "type")]
    pub message_type: MessageType,
    /// Tool being called, for tool-call entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    /// Code language annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Message {
    /// Create a new message stamped with the current time and a fresh ID
    pub fn new(
        agent_id: impl Into<AgentId>,
        message_type: MessageType,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            agent_id: agent_id.into(),
            content: content.into(),
            timestamp: Utc::now().timestamp_millis(),
            message_type,
            tool_name: None,
            language: None,
        }
    }

    /// Create a plain message typed by the human user
    pub fn from_user(content: impl Into<String>) -> Self {
        Self::new(USER_AGENT_ID, MessageType::Message, content)
    }

    /// Attach a tool name
    pub fn with_tool(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }

    /// Attach a code language annotation
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Whether the human user wrote this message
    pub fn is_from_user(&self) -> bool {
        self.agent_id == USER_AGENT_ID
    }

    /// Body of the first fenced code block in the content, if any
    pub fn code_block(&self) -> Option<&str> {
        let start = self.content.find("```")?;
        let after_fence = &self.content[start + 3..];
        let body_start = after_fence.find('\n')? + 1;
        let body = &after_fence[body_start..];
        let end = body.find("```").unwrap_or(body.len());
        Some(body[..end].trim_end_matches('\n'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message() {
        let message = Message::from_user("hello");
        assert!(message.is_from_user());
        assert_eq!(message.message_type, MessageType::Message);
        assert!(message.timestamp > 0);
        assert!(!message.id.is_empty());
    }

    #[test]
    fn test_message_type_wire_names() {
        assert_eq!(serde_json::to_value(MessageType::ToolCall).unwrap(), json!("tool-call"));
        assert_eq!("result".parse::<MessageType>().unwrap(), MessageType::Result);
        assert!("tool_call".parse::<MessageType>().is_err());
        for message_type in MessageType::ALL {
            assert_eq!(message_type.as_str().parse::<MessageType>().unwrap(), message_type);
        }
    }

    #[test]
    fn test_optional_annotations_skipped_when_absent() {
        let value = serde_json::to_value(Message::new("1", MessageType::Message, "hi")).unwrap();
        assert_eq!(value["type"], json!("message"));
        assert_eq!(value["agentId"], json!("1"));
        assert!(value.get("toolName").is_none());
        assert!(value.get("language").is_none());
    }

    #[test]
    fn test_code_block_extraction() {
        let message = Message::new("1", MessageType::Result, "```js\nlet a = 1;\n```")
            .with_language("js");
        assert_eq!(message.code_block(), Some("let a = 1;"));
        assert_eq!(Message::from_user("no code").code_block(), None);
    }
}
