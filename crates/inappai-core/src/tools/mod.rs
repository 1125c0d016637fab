//! Tool management
//!
//! Two containers feed the orchestrator its tool set:
//! - [`ToolRegistry`]: namespaced, for applications where independent
//!   UI regions each contribute tools to one merged pool
//! - [`ToolManager`]: single-scope, for one region managing an ad hoc
//!   list
//!
//! Registration invariants that would corrupt dispatch (empty name,
//! missing handler, malformed namespace) fail fast with
//! [`ValidationError`]; everything else (duplicates, missing optional
//! fields) is warn-and-continue, because host applications re-register
//! idempotently.

mod manager;
mod registry;

pub use manager::ToolManager;
pub use registry::ToolRegistry;

use thiserror::Error;

use crate::types::Tool;

/// Errors raised synchronously at tool registration time
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Namespace was empty
    #[error("namespace must be a non-empty string")]
    EmptyNamespace,

    /// Namespace contained characters outside `[A-Za-z0-9_-]`
    #[error("invalid namespace {namespace:?}: use only alphanumeric characters, hyphens, and underscores")]
    InvalidNamespace { namespace: String },

    /// Tool had an empty name
    #[error("tool must have a name")]
    MissingName,

    /// Tool had no handler
    #[error("tool {name:?} must have a handler")]
    MissingHandler { name: String },
}

/// Source of the active tool set for a chat turn
///
/// The orchestrator reads through this seam at send time, so live
/// containers always contribute their latest registrations.
pub trait ToolSource: Send + Sync {
    /// Snapshot of the currently available tools
    fn tools(&self) -> Vec<Tool>;
}

impl ToolSource for Vec<Tool> {
    fn tools(&self) -> Vec<Tool> {
        self.clone()
    }
}
