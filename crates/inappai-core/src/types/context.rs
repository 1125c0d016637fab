//! Application context supplied with backend requests

use std::sync::Arc;

use serde_json::Value;

/// Supplier of the context snapshot attached to each backend request
///
/// The dynamic form is re-invoked immediately before every request in a
/// turn (initial and each tool-round follow-up), so the backend always
/// sees the host application's current state rather than a snapshot
/// captured when the turn began.
#[derive(Clone, Default)]
pub enum ContextSource {
    /// No context is sent
    #[default]
    None,
    /// A fixed context object
    Static(Value),
    /// A zero-argument supplier called fresh per request
    Dynamic(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl ContextSource {
    /// Create a dynamic context source from a supplier function
    pub fn dynamic<F>(supplier: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        ContextSource::Dynamic(Arc::new(supplier))
    }

    /// Compute the context to send right now
    pub fn snapshot(&self) -> Option<Value> {
        match self {
            ContextSource::None => None,
            ContextSource::Static(value) => Some(value.clone()),
            ContextSource::Dynamic(supplier) => Some(supplier()),
        }
    }
}

impl From<Value> for ContextSource {
    fn from(value: Value) -> Self {
        ContextSource::Static(value)
    }
}

impl std::fmt::Debug for ContextSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextSource::None => write!(f, "ContextSource::None"),
            ContextSource::Static(value) => f.debug_tuple("ContextSource::Static").field(value).finish(),
            ContextSource::Dynamic(_) => write!(f, "ContextSource::Dynamic(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_none_snapshot() {
        assert_eq!(ContextSource::None.snapshot(), None);
    }

    #[test]
    fn test_static_snapshot() {
        let ctx = ContextSource::from(json!({ "page": "/todos" }));
        assert_eq!(ctx.snapshot(), Some(json!({ "page": "/todos" })));
    }

    #[test]
    fn test_dynamic_snapshot_is_fresh() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();
        let ctx = ContextSource::dynamic(move || json!({ "calls": c.fetch_add(1, Ordering::SeqCst) }));

        assert_eq!(ctx.snapshot(), Some(json!({ "calls": 0 })));
        assert_eq!(ctx.snapshot(), Some(json!({ "calls": 1 })));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
