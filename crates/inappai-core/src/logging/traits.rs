//! Logger trait definition

use std::sync::Arc;

/// Logger abstraction for host-agnostic logging
///
/// The widget core runs inside arbitrary host applications, so it never
/// assumes stdout is visible. Implementations:
/// - `NoOpLogger`: Silent logger, the default for embedded use
/// - `ConsoleLogger`: Logs to stdout/stderr
/// - Host adapter: forwards to whatever sink the embedding app provides
pub trait Logger: Send + Sync {
    /// Log a debug message
    fn debug(&self, message: &str);

    /// Log an info message
    fn info(&self, message: &str);

    /// Log a warning message
    fn warn(&self, message: &str);

    /// Log an error message
    fn error(&self, message: &str);
}

/// Type alias for an Arc-wrapped logger
pub type SharedLogger = Arc<dyn Logger>;
