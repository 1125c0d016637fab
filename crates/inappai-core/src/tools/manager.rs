//! Single-scope tool manager
//!
//! The per-region alternative to the namespaced registry: one UI region
//! maintaining its own ad hoc tool list with duplicate-name guards.
//! Registration is idempotent (the existing tool wins) so regions can
//! re-register on every refresh without churn.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::logging::{Logger, NoOpLogger};
use crate::types::Tool;

use super::{ToolSource, ValidationError};

/// Ad hoc tool set for a single UI region
pub struct ToolManager {
    tools: RwLock<Vec<Tool>>,
    /// Name-tracking state, kept separate so cleanup semantics are explicit
    names: RwLock<HashSet<String>>,
    /// Whether teardown forgets all registered names (default: true)
    auto_cleanup: bool,
    logger: Arc<dyn Logger>,
}

impl ToolManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::with_logger(Arc::new(NoOpLogger::new()))
    }

    /// Create an empty manager with a logger
    pub fn with_logger(logger: Arc<dyn Logger>) -> Self {
        Self {
            tools: RwLock::new(Vec::new()),
            names: RwLock::new(HashSet::new()),
            auto_cleanup: true,
            logger,
        }
    }

    /// Create a manager pre-populated with tools
    ///
    /// Duplicates by name keep the first occurrence; each later one is
    /// warned about and dropped.
    pub fn with_initial_tools(initial: Vec<Tool>) -> Self {
        let manager = Self::new();
        {
            let mut names = manager.names.write();
            let mut tools = manager.tools.write();
            for tool in initial {
                if names.contains(&tool.name) {
                    manager.logger.warn(&format!(
                        "[ToolManager] Duplicate tool name in initial tools: {:?}. \
                         Only the first occurrence will be used.",
                        tool.name
                    ));
                    continue;
                }
                names.insert(tool.name.clone());
                tools.push(tool);
            }
        }
        manager
    }

    /// Set whether teardown forgets registered names (default: true)
    pub fn auto_cleanup(mut self, enabled: bool) -> Self {
        self.auto_cleanup = enabled;
        self
    }

    /// Register a tool
    ///
    /// Re-registering an existing name warns and keeps the existing
    /// tool. Missing `description`/`parameters` warn but proceed.
    pub fn register_tool(&self, tool: Tool) -> Result<(), ValidationError> {
        if tool.name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        if self.names.read().contains(&tool.name) {
            self.logger.warn(&format!(
                "[ToolManager] Tool {:?} is already registered. \
                 Use unregister_tool() first if you want to replace it.",
                tool.name
            ));
            return Ok(());
        }

        if tool.description.is_empty() {
            self.logger.warn(&format!(
                "[ToolManager] Tool {:?} is missing a description",
                tool.name
            ));
        }

        if tool.parameters.is_null() {
            self.logger.warn(&format!(
                "[ToolManager] Tool {:?} is missing a parameters schema",
                tool.name
            ));
        }

        if tool.handler.is_none() {
            return Err(ValidationError::MissingHandler {
                name: tool.name.clone(),
            });
        }

        self.names.write().insert(tool.name.clone());
        self.tools.write().push(tool);
        Ok(())
    }

    /// Unregister a tool by name
    ///
    /// Warns and no-ops if no such tool is registered.
    pub fn unregister_tool(&self, name: &str) {
        if !self.names.write().remove(name) {
            self.logger
                .warn(&format!("[ToolManager] Tool {:?} is not registered", name));
            return;
        }
        self.tools.write().retain(|t| t.name != name);
    }

    /// Remove all tools and reset name tracking
    pub fn clear_tools(&self) {
        self.names.write().clear();
        self.tools.write().clear();
    }

    /// Whether a tool with this name is currently registered
    pub fn has_tool(&self, name: &str) -> bool {
        self.names.read().contains(name)
    }

    /// Snapshot of the registered tools, in registration order
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.read().clone()
    }
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolSource for ToolManager {
    fn tools(&self) -> Vec<Tool> {
        self.tools.read().clone()
    }
}

impl Drop for ToolManager {
    fn drop(&mut self) {
        if self.auto_cleanup {
            self.names.write().clear();
            self.tools.write().clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tool(name: &str) -> Tool {
        Tool::new(name, "A test tool")
            .with_parameters(json!({ "type": "object", "properties": {} }))
            .with_sync_handler(|_| Ok(json!({ "success": true })))
    }

    #[test]
    fn test_register_and_has_tool() {
        let manager = ToolManager::new();
        manager.register_tool(tool("addTodo")).unwrap();

        assert!(manager.has_tool("addTodo"));
        assert!(!manager.has_tool("removeTodo"));
        assert_eq!(manager.tools().len(), 1);
    }

    #[test]
    fn test_register_requires_name() {
        let manager = ToolManager::new();
        assert!(matches!(
            manager.register_tool(tool("")),
            Err(ValidationError::MissingName)
        ));
    }

    #[test]
    fn test_register_requires_handler() {
        let manager = ToolManager::new();
        let no_handler = Tool::new("broken", "Has no handler");
        assert!(matches!(
            manager.register_tool(no_handler),
            Err(ValidationError::MissingHandler { .. })
        ));
        assert!(!manager.has_tool("broken"));
    }

    #[test]
    fn test_duplicate_registration_keeps_existing() {
        let manager = ToolManager::new();
        manager
            .register_tool(tool("addTodo").with_parameters(json!({ "v": 1 })))
            .unwrap();
        // second registration is a warned no-op, not a replacement
        manager
            .register_tool(tool("addTodo").with_parameters(json!({ "v": 2 })))
            .unwrap();

        let tools = manager.tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].parameters, json!({ "v": 1 }));
    }

    #[test]
    fn test_missing_optional_fields_still_register() {
        let manager = ToolManager::new();
        let sparse = Tool::new("sparse", "").with_sync_handler(|_| Ok(json!(null)));
        manager.register_tool(sparse).unwrap();
        assert!(manager.has_tool("sparse"));
    }

    #[test]
    fn test_unregister() {
        let manager = ToolManager::new();
        manager.register_tool(tool("addTodo")).unwrap();
        manager.unregister_tool("addTodo");

        assert!(!manager.has_tool("addTodo"));
        assert!(manager.tools().is_empty());

        // unknown name warns without panicking
        manager.unregister_tool("never-registered");
    }

    #[test]
    fn test_clear_tools() {
        let manager = ToolManager::new();
        manager.register_tool(tool("one")).unwrap();
        manager.register_tool(tool("two")).unwrap();
        manager.clear_tools();

        assert!(manager.tools().is_empty());
        // name tracking reset: re-registration is accepted
        manager.register_tool(tool("one")).unwrap();
        assert!(manager.has_tool("one"));
    }

    #[test]
    fn test_initial_tools_dedup_keeps_first() {
        let manager = ToolManager::with_initial_tools(vec![
            tool("a").with_parameters(json!({ "v": 1 })),
            tool("b"),
            tool("a").with_parameters(json!({ "v": 2 })),
        ]);

        let tools = manager.tools();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].name, "a");
        assert_eq!(tools[0].parameters, json!({ "v": 1 }));
        assert_eq!(tools[1].name, "b");
    }
}
