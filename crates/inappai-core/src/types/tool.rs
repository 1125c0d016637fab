//! Tool definition and handler types

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of a tool handler invocation
///
/// `Err` is the failure channel: the orchestrator converts it into a
/// `{success: false, error}` result for the backend instead of aborting
/// the turn.
pub type HandlerResult = Result<Value, String>;

/// Executable side of a tool: argument object in, JSON-serializable result out
pub type ToolHandler = Arc<dyn Fn(Value) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// A host-application capability the backend AI may request to invoke
///
/// `name`, `description`, and `parameters` are forwarded to the backend
/// as the tool's schema; the handler never leaves the process.
#[derive(Clone)]
pub struct Tool {
    /// Unique name within the tool's registration scope
    pub name: String,
    /// Natural-language description guiding the model's decision to call it
    pub description: String,
    /// JSON-Schema-like object describing the argument object; forwarded
    /// verbatim, never validated locally against actual call arguments
    pub parameters: Value,
    /// Handler executed when the backend requests this tool
    pub handler: Option<ToolHandler>,
}

impl Tool {
    /// Create a new tool definition
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Value::Null,
            handler: None,
        }
    }

    /// Set the parameter schema
    pub fn with_parameters(mut self, schema: Value) -> Self {
        self.parameters = schema;
        self
    }

    /// Set an async handler
    pub fn with_handler<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = HandlerResult> + Send + 'static,
    {
        self.handler = Some(Arc::new(move |args| Box::pin(handler(args))));
        self
    }

    /// Set a synchronous handler
    pub fn with_sync_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(Value) -> HandlerResult + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(move |args| {
            let result = handler(args);
            Box::pin(async move { result })
        }));
        self
    }

    /// Schema-only form sent to the backend
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition::from(self)
    }
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

/// Tool schema in the backend's function-calling format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Always `"function"`
    #[serde(rename = "type")]
    pub kind: String,
    /// The function schema
    pub function: FunctionSpec,
}

/// Name, description, and parameter schema of a callable function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Value::is_null", default)]
    pub parameters: Value,
}

impl From<&Tool> for ToolDefinition {
    fn from(tool: &Tool) -> Self {
        Self {
            kind: "function".to_string(),
            function: FunctionSpec {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.parameters.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_builder() {
        let tool = Tool::new("get_weather", "Get the current weather")
            .with_parameters(json!({
                "type": "object",
                "properties": {
                    "location": { "type": "string" }
                },
                "required": ["location"]
            }))
            .with_sync_handler(|_args| Ok(json!({ "success": true })));

        assert_eq!(tool.name, "get_weather");
        assert!(!tool.parameters.is_null());
        assert!(tool.handler.is_some());
    }

    #[tokio::test]
    async fn test_async_handler() {
        let tool = Tool::new("lookup", "Look something up").with_handler(|args| async move {
            Ok(json!({ "echo": args }))
        });

        let handler = tool.handler.clone().unwrap();
        let result = handler(json!({ "q": "rust" })).await.unwrap();
        assert_eq!(result["echo"]["q"], "rust");
    }

    #[test]
    fn test_definition_excludes_handler() {
        let tool = Tool::new("addTodo", "Add a todo")
            .with_parameters(json!({ "type": "object" }))
            .with_sync_handler(|_| Ok(json!({ "success": true })));

        let json = serde_json::to_string(&tool.definition()).unwrap();
        assert!(json.contains("\"type\":\"function\""));
        assert!(json.contains("\"name\":\"addTodo\""));
        assert!(!json.contains("handler"));
    }

    #[test]
    fn test_definition_omits_null_parameters() {
        let tool = Tool::new("bare", "No schema");
        let json = serde_json::to_string(&tool.definition()).unwrap();
        assert!(!json.contains("parameters"));
    }
}
