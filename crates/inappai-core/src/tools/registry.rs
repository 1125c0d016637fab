//! Namespaced tool registry
//!
//! Lets multiple independent UI regions contribute tools to one merged
//! pool without colliding on mount/unmount order. Namespaces are kept
//! in registration order; re-registering a namespace replaces its tool
//! list in place. On name collisions across namespaces the first
//! registration wins.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::logging::{Logger, NoOpLogger};
use crate::types::Tool;

use super::{ToolSource, ValidationError};

struct NamespaceEntry {
    name: String,
    tools: Vec<Tool>,
}

/// Namespaced collection of tools with conflict detection
///
/// Each instance is self-contained; two registries never observe each
/// other's registrations. Share one instance (behind an `Arc`) to pool
/// tools across regions.
pub struct ToolRegistry {
    /// Namespaces in registration order
    namespaces: RwLock<Vec<NamespaceEntry>>,
    /// Logger for warning-level issues
    logger: Arc<dyn Logger>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::with_logger(Arc::new(NoOpLogger::new()))
    }

    /// Create an empty registry with a logger
    pub fn with_logger(logger: Arc<dyn Logger>) -> Self {
        Self {
            namespaces: RwLock::new(Vec::new()),
            logger,
        }
    }

    /// Register tools under a namespace
    ///
    /// Replaces (does not merge with) any tools previously registered
    /// under that namespace, keeping the namespace's position in
    /// registration order. Duplicate tool names within the list are
    /// warned about but stored as given.
    pub fn register(&self, namespace: &str, tools: Vec<Tool>) -> Result<(), ValidationError> {
        if namespace.is_empty() {
            return Err(ValidationError::EmptyNamespace);
        }
        if !is_valid_namespace(namespace) {
            return Err(ValidationError::InvalidNamespace {
                namespace: namespace.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for tool in &tools {
            if !seen.insert(tool.name.as_str()) {
                self.logger.warn(&format!(
                    "[ToolRegistry] Duplicate tool name in namespace {:?}: {:?}",
                    namespace, tool.name
                ));
            }
        }

        let mut namespaces = self.namespaces.write();
        if let Some(entry) = namespaces.iter_mut().find(|e| e.name == namespace) {
            entry.tools = tools;
        } else {
            namespaces.push(NamespaceEntry {
                name: namespace.to_string(),
                tools,
            });
        }
        Ok(())
    }

    /// Unregister a namespace and all its tools
    ///
    /// Warns and no-ops if the namespace was never registered.
    pub fn unregister(&self, namespace: &str) {
        let mut namespaces = self.namespaces.write();
        match namespaces.iter().position(|e| e.name == namespace) {
            Some(index) => {
                namespaces.remove(index);
            }
            None => {
                self.logger.warn(&format!(
                    "[ToolRegistry] Namespace {:?} is not registered",
                    namespace
                ));
            }
        }
    }

    /// Get the tools registered under one namespace
    pub fn get_tools(&self, namespace: &str) -> Vec<Tool> {
        self.namespaces
            .read()
            .iter()
            .find(|e| e.name == namespace)
            .map(|e| e.tools.clone())
            .unwrap_or_default()
    }

    /// Get all registered tools across namespaces, in registration order
    ///
    /// On a name collision only the first-seen tool is kept; later
    /// duplicates are dropped with a warning.
    pub fn get_all_tools(&self) -> Vec<Tool> {
        let namespaces = self.namespaces.read();
        let mut seen = HashSet::new();
        let mut all = Vec::new();

        for entry in namespaces.iter() {
            for tool in &entry.tools {
                if !seen.insert(tool.name.clone()) {
                    self.logger.warn(&format!(
                        "[ToolRegistry] Tool name conflict: {:?} exists in multiple namespaces. \
                         Only the first occurrence will be used.",
                        tool.name
                    ));
                    continue;
                }
                all.push(tool.clone());
            }
        }

        all
    }

    /// Namespace keys in registration order
    pub fn get_namespaces(&self) -> Vec<String> {
        self.namespaces.read().iter().map(|e| e.name.clone()).collect()
    }

    /// Remove every namespace
    pub fn clear(&self) {
        self.namespaces.write().clear();
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolSource for ToolRegistry {
    fn tools(&self) -> Vec<Tool> {
        self.get_all_tools()
    }
}

fn is_valid_namespace(namespace: &str) -> bool {
    namespace
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tool(name: &str) -> Tool {
        tool_described(name, "A test tool")
    }

    fn tool_described(name: &str, description: &str) -> Tool {
        Tool::new(name, description)
            .with_parameters(json!({ "type": "object", "properties": {} }))
            .with_sync_handler(|_| Ok(json!({ "success": true })))
    }

    #[test]
    fn test_register_and_get_all() {
        let registry = ToolRegistry::new();
        registry.register("todos", vec![tool("addTodo")]).unwrap();

        let all = registry.get_all_tools();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "addTodo");
    }

    #[test]
    fn test_cross_namespace_conflict_keeps_first() {
        let registry = ToolRegistry::new();
        registry
            .register("ns1", vec![tool_described("duplicate", "First")])
            .unwrap();
        registry
            .register("ns2", vec![tool_described("duplicate", "Second")])
            .unwrap();

        let all = registry.get_all_tools();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].description, "First");
    }

    #[test]
    fn test_namespace_validation() {
        let registry = ToolRegistry::new();

        assert!(matches!(
            registry.register("", vec![tool("a")]),
            Err(ValidationError::EmptyNamespace)
        ));
        assert!(matches!(
            registry.register("bad namespace!", vec![tool("a")]),
            Err(ValidationError::InvalidNamespace { .. })
        ));
        assert!(registry.register("valid-name_1", vec![tool("a")]).is_ok());
    }

    #[test]
    fn test_register_replaces_namespace() {
        let registry = ToolRegistry::new();
        registry
            .register("page", vec![tool("one"), tool("two")])
            .unwrap();
        registry.register("page", vec![tool("three")]).unwrap();

        let tools = registry.get_tools("page");
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "three");
    }

    #[test]
    fn test_replace_keeps_namespace_position() {
        let registry = ToolRegistry::new();
        registry.register("first", vec![tool("a")]).unwrap();
        registry.register("second", vec![tool("b")]).unwrap();
        registry.register("first", vec![tool("c")]).unwrap();

        assert_eq!(registry.get_namespaces(), vec!["first", "second"]);
        let all = registry.get_all_tools();
        assert_eq!(all[0].name, "c");
        assert_eq!(all[1].name, "b");
    }

    #[test]
    fn test_unregister() {
        let registry = ToolRegistry::new();
        registry.register("todos", vec![tool("addTodo")]).unwrap();
        registry.unregister("todos");

        assert!(registry.get_all_tools().is_empty());
        assert!(registry.get_namespaces().is_empty());

        // unknown namespace warns without panicking
        registry.unregister("never-registered");
    }

    #[test]
    fn test_get_tools_unknown_namespace_is_empty() {
        let registry = ToolRegistry::new();
        assert!(registry.get_tools("nope").is_empty());
    }

    #[test]
    fn test_intra_namespace_duplicates_stored_but_deduped_on_merge() {
        let registry = ToolRegistry::new();
        registry
            .register("ns", vec![tool_described("dup", "First"), tool_described("dup", "Second")])
            .unwrap();

        // stored as given
        assert_eq!(registry.get_tools("ns").len(), 2);
        // merged view keeps the first
        let all = registry.get_all_tools();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].description, "First");
    }

    #[test]
    fn test_clear() {
        let registry = ToolRegistry::new();
        registry.register("a", vec![tool("one")]).unwrap();
        registry.register("b", vec![tool("two")]).unwrap();
        registry.clear();

        assert!(registry.get_namespaces().is_empty());
        assert!(registry.get_all_tools().is_empty());
    }

    #[test]
    fn test_instances_are_independent() {
        let first = ToolRegistry::new();
        let second = ToolRegistry::new();

        first.register("todos", vec![tool("addTodo")]).unwrap();

        assert_eq!(first.get_all_tools().len(), 1);
        assert!(second.get_all_tools().is_empty());
        assert!(second.get_namespaces().is_empty());
    }

    #[test]
    fn test_namespace_order_preserved() {
        let registry = ToolRegistry::new();
        registry.register("alpha", vec![tool("a")]).unwrap();
        registry.register("beta", vec![tool("b")]).unwrap();
        registry.register("gamma", vec![tool("c")]).unwrap();

        assert_eq!(registry.get_namespaces(), vec!["alpha", "beta", "gamma"]);
        let names: Vec<_> = registry.get_all_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
