//! InAppAI Core
//!
//! Runtime-agnostic chat orchestration for embeddable in-app AI
//! assistants. The host application owns the conversation state and
//! contributes tools (callable capabilities with side effects on app
//! state); this crate drives the backend round-trips and the iterative
//! client-side tool execution the backend's responses request.
//!
//! ## Tool orchestration
//!
//! The registry merges tools contributed by independent UI regions;
//! the orchestrator executes turns against a hosted agent:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use inappai_core::{ChatConfig, ChatOrchestrator, ConversationHandle, Tool, ToolRegistry};
//! use serde_json::json;
//!
//! let registry = Arc::new(ToolRegistry::new());
//! registry.register("todos", vec![
//!     Tool::new("addTodo", "Add a todo item")
//!         .with_parameters(json!({
//!             "type": "object",
//!             "properties": { "task": { "type": "string" } },
//!             "required": ["task"]
//!         }))
//!         .with_handler(|args| async move {
//!             // mutate host state here
//!             Ok(json!({ "success": true }))
//!         }),
//! ])?;
//!
//! let conversation = ConversationHandle::new();
//! let chat = ChatOrchestrator::connect(ChatConfig::new("support-agent"), conversation.clone())
//!     .with_tools(registry.clone());
//!
//! chat.send_message("add milk to my list").await;
//! // conversation now holds the user message and the final assistant reply
//! ```

pub mod backend;
pub mod chat;
pub mod logging;
pub mod tools;
pub mod types;

// Re-export commonly used types
pub use types::{
    ContextSource, FunctionSpec, HandlerResult, Message, MessageRole, TokenUsage, Tool,
    ToolAction, ToolDefinition, ToolHandler,
};

pub use tools::{ToolManager, ToolRegistry, ToolSource, ValidationError};

pub use backend::{
    AuthToken, BackendError, BackendResult, ChatBackend, ChatRequest, ChatResponse, ErrorKind,
    FunctionCall, HttpBackend, MockBackend, ToolCall,
};

pub use chat::{
    ChatConfig, ChatOrchestrator, ConversationHandle, ErrorState, MessagesListener,
    DEFAULT_ENDPOINT, DEFAULT_MAX_TOOL_ROUNDS,
};

pub use logging::{ConsoleLogger, Logger, NoOpLogger, SharedLogger};
