//! In-memory flag source

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::FlagSource;

/// In-memory flag source for tests and programmatic overrides
///
/// Hosts use this as the highest-priority layer for values given on the
/// command line.
///
/// # Example
///
/// ```
/// use kube_gate_core::flags::{FlagSource, MemoryFlagSource};
///
/// let flags = MemoryFlagSource::new()
///     .with("spring.cloud.kubernetes.config.enabled", "false");
/// assert!(flags.has("spring.cloud.kubernetes.config.enabled"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryFlagSource {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryFlagSource {
    /// Create a new empty memory source
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }

    /// Create a memory source with initial values
    pub fn with_values(initial: HashMap<String, String>) -> Self {
        Self {
            values: RwLock::new(initial),
        }
    }

    /// Builder-style insert
    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a value
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.write().insert(key.into(), value.into());
    }

    /// Remove a value, returning the old one
    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.write().remove(key)
    }

    /// Clear all values
    pub fn clear(&self) {
        self.values.write().clear();
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FlagSource for MemoryFlagSource {
    fn name(&self) -> &str {
        "memory"
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }
}
