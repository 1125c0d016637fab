//! Conversation message types

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
            MessageRole::System => write!(f, "system"),
        }
    }
}

/// Token accounting reported by the backend
///
/// Some backends only report a total; the split fields default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Record of one tool invocation, for conversation memory
///
/// The orchestrator does not populate these; host applications may
/// attach them when persisting conversations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolAction {
    /// Tool name
    pub tool: String,
    /// Arguments the tool was called with
    pub args: Value,
    /// Value the handler returned
    pub result: Value,
}

/// A message in the conversation store
///
/// The store itself is owned by the host application (controlled mode);
/// see [`ConversationHandle`](crate::chat::ConversationHandle).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique, generator-assigned identifier
    pub id: String,
    /// Who authored the message
    pub role: MessageRole,
    /// Display text; assistant content may contain markdown
    pub content: String,
    /// Creation time, milliseconds since the Unix epoch
    pub timestamp: u64,
    /// Token accounting, present on assistant messages when the backend reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    /// Tool invocations associated with this message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_actions: Option<Vec<ToolAction>>,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::Assistant, content)
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::System, content)
    }

    fn with_role(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: next_message_id(role),
            role,
            content: content.into(),
            timestamp: now_millis(),
            usage: None,
            tool_actions: None,
        }
    }

    /// Attach token usage
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Attach tool action records
    pub fn with_tool_actions(mut self, actions: Vec<ToolAction>) -> Self {
        self.tool_actions = Some(actions);
        self
    }
}

/// Milliseconds since the Unix epoch
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Generate a unique message id: timestamp, process-wide sequence, role
fn next_message_id(role: MessageRole) -> String {
    static SEQ: AtomicU64 = AtomicU64::new(0);
    format!("{}-{}-{}", now_millis(), SEQ.fetch_add(1, Ordering::Relaxed), role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let user = Message::user("Hello");
        assert_eq!(user.role, MessageRole::User);
        assert_eq!(user.content, "Hello");
        assert!(user.id.ends_with("-user"));
        assert!(user.timestamp > 0);

        let asst = Message::assistant("Hi there!");
        assert_eq!(asst.role, MessageRole::Assistant);
        assert!(asst.id.ends_with("-assistant"));
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::user("one");
        let b = Message::user("two");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::user("Hello");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"role\":\"user\""));
        assert!(json.contains("\"content\":\"Hello\""));
        // optional fields stay off the wire until set
        assert!(!json.contains("usage"));
        assert!(!json.contains("toolActions"));
    }

    #[test]
    fn test_usage_accepts_total_only() {
        let usage: TokenUsage = serde_json::from_str(r#"{"totalTokens": 42}"#).unwrap();
        assert_eq!(usage.total_tokens, 42);
        assert_eq!(usage.prompt_tokens, 0);
        assert_eq!(usage.completion_tokens, 0);

        let full: TokenUsage =
            serde_json::from_str(r#"{"promptTokens": 10, "completionTokens": 5, "totalTokens": 15}"#)
                .unwrap();
        assert_eq!(full.prompt_tokens, 10);
        assert_eq!(full.completion_tokens, 5);
    }
}
