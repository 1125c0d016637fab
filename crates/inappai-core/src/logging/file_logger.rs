//! File-based debug logger for troubleshooting
//!
//! Writes to a file in the temp directory so widget diagnostics survive
//! even when the host application swallows stdout/stderr.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::SystemTime;

use once_cell::sync::Lazy;

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO "),
            LogLevel::Warn => write!(f, "WARN "),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Global file logger configuration and state
struct FileLoggerState {
    file: Option<File>,
    min_level: LogLevel,
    enabled: bool,
}

impl FileLoggerState {
    fn new() -> Self {
        let log_path = Self::default_log_path();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .ok();

        // Debug logging is opt-out via environment variable
        let enabled = std::env::var("INAPPAI_DEBUG")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(true);
        let min_level = std::env::var("INAPPAI_LOG_LEVEL")
            .map(|v| match v.to_lowercase().as_str() {
                "debug" => LogLevel::Debug,
                "info" => LogLevel::Info,
                "warn" => LogLevel::Warn,
                "error" => LogLevel::Error,
                _ => LogLevel::Debug,
            })
            .unwrap_or(LogLevel::Debug);

        Self {
            file,
            min_level,
            enabled,
        }
    }

    fn default_log_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push("inappai-debug.log");
        path
    }

    fn write(&mut self, level: LogLevel, module: &str, message: &str) {
        if !self.enabled || level < self.min_level {
            return;
        }

        if let Some(ref mut file) = self.file {
            let timestamp = SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .map(|d| {
                    let secs = d.as_secs();
                    let millis = d.subsec_millis();
                    let hours = (secs % 86400) / 3600;
                    let mins = (secs % 3600) / 60;
                    let secs = secs % 60;
                    format!("{:02}:{:02}:{:02}.{:03}", hours, mins, secs, millis)
                })
                .unwrap_or_else(|_| "??:??:??.???".to_string());

            let _ = writeln!(file, "[{}] [{}] [{}] {}", timestamp, level, module, message);
            let _ = file.flush();
        }
    }
}

/// Global logger instance
static LOGGER: Lazy<Mutex<FileLoggerState>> = Lazy::new(|| Mutex::new(FileLoggerState::new()));

/// Log a message at the specified level
pub fn log(level: LogLevel, module: &str, message: &str) {
    if let Ok(mut logger) = LOGGER.lock() {
        logger.write(level, module, message);
    }
}

/// Log a debug message
pub fn debug(module: &str, message: &str) {
    log(LogLevel::Debug, module, message);
}

/// Log an info message
pub fn info(module: &str, message: &str) {
    log(LogLevel::Info, module, message);
}

/// Log a warning message
pub fn warn(module: &str, message: &str) {
    log(LogLevel::Warn, module, message);
}

/// Log an error message
pub fn error(module: &str, message: &str) {
    log(LogLevel::Error, module, message);
}

/// Get the path to the log file
pub fn log_file_path() -> PathBuf {
    FileLoggerState::default_log_path()
}

/// Clear the log file
pub fn clear_log() {
    let path = log_file_path();
    if let Ok(file) = File::create(&path) {
        drop(file);
    }
    // Re-initialize the logger with a fresh file handle
    if let Ok(mut logger) = LOGGER.lock() {
        logger.file = OpenOptions::new().create(true).append(true).open(&path).ok();
    }
}
