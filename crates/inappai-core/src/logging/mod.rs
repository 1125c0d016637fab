//! Logging abstractions for host-agnostic logging

mod traits;
mod noop;
mod console;
pub mod file_logger;

pub use traits::{Logger, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;

pub use file_logger::{log, debug, info, warn, error, log_file_path, clear_log, LogLevel};
