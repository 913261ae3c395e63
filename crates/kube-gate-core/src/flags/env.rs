//! Environment variable flag source

use std::collections::HashMap;
use std::env;

use super::traits::{relaxed_env_name, FlagSource};

/// Flag source backed by environment variables
///
/// The environment is captured once at construction, so a later change to the
/// process environment does not alter an in-flight bootstrap.
///
/// # Key Mapping
///
/// A dotted key is looked up verbatim first, then in its relaxed form:
/// - `spring.cloud.kubernetes.enabled` → `SPRING_CLOUD_KUBERNETES_ENABLED`
/// - `spring.cloud.kubernetes.config.enabled` → `SPRING_CLOUD_KUBERNETES_CONFIG_ENABLED`
///
/// # Example
///
/// ```
/// use kube_gate_core::flags::{EnvFlagSource, FlagKey, FlagSource};
///
/// let flags = EnvFlagSource::with_vars([("SPRING_CLOUD_KUBERNETES_ENABLED", "false")]);
/// assert_eq!(flags.get(&FlagKey::ROOT).unwrap(), Some(false));
/// ```
#[derive(Debug)]
pub struct EnvFlagSource {
    vars: HashMap<String, String>,
}

impl EnvFlagSource {
    /// Snapshot the current process environment
    pub fn new() -> Self {
        Self {
            vars: env::vars().collect(),
        }
    }

    /// Build from an explicit set of variables
    pub fn with_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl FlagSource for EnvFlagSource {
    fn name(&self) -> &str {
        "env"
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        if let Some(value) = self.vars.get(key) {
            return Some(value.clone());
        }
        self.vars.get(&relaxed_env_name(key)).cloned()
    }
}
