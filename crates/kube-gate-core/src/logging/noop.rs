//! No-op logger

use super::traits::{LogLevel, Logger};

/// Discards everything; used by `Bootstrap` unless the host supplies a logger
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl NoOpLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NoOpLogger {
    fn log(&self, _level: LogLevel, _message: &str) {}
}
