//! Console logger implementation

use std::env;

use super::traits::{LogLevel, Logger};

/// Environment variable that sets the console logger's minimum level
pub const LOG_LEVEL_ENV: &str = "KUBE_GATE_LOG_LEVEL";

/// A logger that writes to the console
///
/// `INFO` goes to stdout, everything else to stderr. Records below the
/// minimum level are dropped.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
    min_level: LogLevel,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    /// `[kube-gate]` prefix, `INFO` and above
    pub fn new() -> Self {
        Self {
            prefix: "[kube-gate]".to_string(),
            min_level: LogLevel::Info,
        }
    }

    /// Take the minimum level from `KUBE_GATE_LOG_LEVEL`, falling back to `INFO`
    pub fn from_env() -> Self {
        let min_level = env::var(LOG_LEVEL_ENV)
            .ok()
            .and_then(|v| LogLevel::parse(&v))
            .unwrap_or(LogLevel::Info);
        Self::new().with_min_level(min_level)
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        match level {
            LogLevel::Info => println!("{} {}: {}", self.prefix, level, message),
            _ => eprintln!("{} {}: {}", self.prefix, level, message),
        }
    }
}
