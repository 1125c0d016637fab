//! Wire types for the agent backend chat contract

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{TokenUsage, ToolDefinition};

/// Body of `POST {endpoint}/{agent_id}/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The message text for this round (user input or tool results)
    pub message: String,
    /// Correlation key for backend-side conversation state
    pub conversation_id: String,
    /// Application context snapshot, when the host supplies one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    /// Tool schemas the model may call; omitted entirely when empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
    /// Backend response caching flag, always sent
    pub disable_cache: bool,
}

/// Parsed body of a chat response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatResponse {
    /// Assistant text, absent when the model only requested tools
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Token accounting for this round
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    /// Tool invocations the model requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl ChatResponse {
    /// Build a text-only response
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Build a response requesting tool calls
    pub fn with_tool_calls(calls: Vec<ToolCall>) -> Self {
        Self {
            tool_calls: Some(calls),
            ..Default::default()
        }
    }

    /// Attach usage
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Whether the response carries at least one tool call
    pub fn has_tool_calls(&self) -> bool {
        self.tool_calls.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// One tool invocation requested by the backend
///
/// Backends emit two shapes: the function-calling form
/// `{function: {name, arguments}}` with `arguments` as a JSON string,
/// and the flat form `{name, parameters}` with an argument object.
/// Both are accepted; the function form takes precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolCall {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<FunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

/// Function form of a tool call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// Argument object encoded as a JSON string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
}

impl ToolCall {
    /// Build a function-form call with JSON-string arguments
    pub fn function(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            function: Some(FunctionCall {
                name: name.into(),
                arguments: Some(arguments.into()),
            }),
            ..Default::default()
        }
    }

    /// Build a flat-form call with an argument object
    pub fn named(name: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: Some(name.into()),
            parameters: Some(parameters),
            ..Default::default()
        }
    }

    /// The requested tool name, whichever form carried it
    pub fn tool_name(&self) -> Option<&str> {
        self.function
            .as_ref()
            .map(|f| f.name.as_str())
            .or(self.name.as_deref())
    }

    /// Decode the argument object
    ///
    /// Function-form string arguments are parsed as JSON; a parse
    /// failure propagates. The flat form's object is used as-is; a call
    /// with no arguments at all decodes to `null`.
    pub fn arguments(&self) -> Result<Value, serde_json::Error> {
        if let Some(function) = &self.function {
            if let Some(arguments) = &function.arguments {
                return serde_json::from_str(arguments);
            }
        }
        Ok(self.parameters.clone().unwrap_or(Value::Null))
    }
}
