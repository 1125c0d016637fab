//! Core types for the chat widget
//!
//! Data entities shared across the tool containers, the backend
//! contract, and the orchestrator.

mod context;
mod message;
mod tool;

pub use context::ContextSource;
pub use message::{Message, MessageRole, TokenUsage, ToolAction};
pub use tool::{FunctionSpec, HandlerResult, Tool, ToolDefinition, ToolHandler};

pub(crate) use message::now_millis;
