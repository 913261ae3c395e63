//! Gate decision value

use serde::{Deserialize, Serialize};

/// Which property-source locators to activate
///
/// Computed once per bootstrap and handed to the wiring step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateDecision {
    /// Register the ConfigMap-backed locator
    pub activate_config_source: bool,
    /// Register the Secret-backed locator
    pub activate_secret_source: bool,
}

impl GateDecision {
    pub const fn new(activate_config_source: bool, activate_secret_source: bool) -> Self {
        Self {
            activate_config_source,
            activate_secret_source,
        }
    }

    /// Both locators active
    pub const fn all_enabled() -> Self {
        Self::new(true, true)
    }

    /// Neither locator active
    pub const fn disabled() -> Self {
        Self::new(false, false)
    }

    /// True if at least one locator is active
    pub fn any(&self) -> bool {
        self.activate_config_source || self.activate_secret_source
    }
}

impl Default for GateDecision {
    fn default() -> Self {
        Self::all_enabled()
    }
}

impl std::fmt::Display for GateDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "configmap={}, secrets={}",
            on_off(self.activate_config_source),
            on_off(self.activate_secret_source)
        )
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
