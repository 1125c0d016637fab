//! Widget configuration

use crate::backend::AuthToken;

/// Endpoint used when neither the config nor the environment names one
pub const DEFAULT_ENDPOINT: &str = "https://api.inappai.com/api";

/// Default cap on tool-execution rounds per message
pub const DEFAULT_MAX_TOOL_ROUNDS: u32 = 10;

/// Environment variable that overrides the default endpoint
const ENDPOINT_ENV: &str = "INAPPAI_ENDPOINT";

/// Configuration for connecting a chat widget to a hosted agent
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Agent identifier, the path segment before `/chat` and `/health`
    pub agent_id: String,
    /// Backend base URL; resolution order is this value, then the
    /// `INAPPAI_ENDPOINT` environment variable, then [`DEFAULT_ENDPOINT`]
    pub endpoint: Option<String>,
    /// Bearer token for per-user rate limiting
    pub auth_token: AuthToken,
    /// Conversation correlation key; generated per orchestrator when absent
    pub conversation_id: Option<String>,
    /// Cap on tool-execution rounds per message
    pub max_tool_rounds: u32,
}

impl ChatConfig {
    /// Create a config for one agent
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            endpoint: None,
            auth_token: AuthToken::None,
            conversation_id: None,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }

    /// Set the backend endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the auth token
    pub fn with_auth_token(mut self, auth_token: AuthToken) -> Self {
        self.auth_token = auth_token;
        self
    }

    /// Set the conversation id
    pub fn with_conversation_id(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }

    /// Set the tool-round cap
    pub fn with_max_tool_rounds(mut self, max_tool_rounds: u32) -> Self {
        self.max_tool_rounds = max_tool_rounds;
        self
    }

    /// Resolve the endpoint: explicit value, environment, default
    pub fn resolve_endpoint(&self) -> String {
        self.endpoint
            .clone()
            .or_else(|| std::env::var(ENDPOINT_ENV).ok().filter(|v| !v.is_empty()))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChatConfig::new("support-agent");
        assert_eq!(config.agent_id, "support-agent");
        assert_eq!(config.max_tool_rounds, DEFAULT_MAX_TOOL_ROUNDS);
        assert!(config.conversation_id.is_none());
    }

    #[test]
    fn test_explicit_endpoint_wins() {
        let config = ChatConfig::new("agent").with_endpoint("http://localhost:3001/api");
        assert_eq!(config.resolve_endpoint(), "http://localhost:3001/api");
    }

    #[test]
    fn test_builder_chain() {
        let config = ChatConfig::new("agent")
            .with_conversation_id("conv-42")
            .with_max_tool_rounds(3);
        assert_eq!(config.conversation_id.as_deref(), Some("conv-42"));
        assert_eq!(config.max_tool_rounds, 3);
    }
}
