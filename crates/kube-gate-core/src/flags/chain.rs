//! Layered flag source with first-match precedence

use std::path::Path;
use std::sync::Arc;

use super::env::EnvFlagSource;
use super::file::FileFlagSource;
use super::traits::{parse_flag, FlagInfo, FlagKey, FlagResult, FlagSource};

/// A flag source that chains multiple sources together
///
/// Layers are tried in order and the first one holding a non-blank value
/// for a key wins. A blank value counts as unset and falls through to the
/// next layer. A layer that holds a malformed value still wins, so the error
/// surfaces instead of a lower layer quietly taking over.
///
/// # Example
///
/// ```
/// use kube_gate_core::flags::{ChainFlagSource, EnvFlagSource, FlagKey, FlagSource, MemoryFlagSource};
/// use std::sync::Arc;
///
/// let overrides = Arc::new(MemoryFlagSource::new().with(FlagKey::ROOT.as_str(), "true"));
/// let env = Arc::new(EnvFlagSource::with_vars([("SPRING_CLOUD_KUBERNETES_ENABLED", "false")]));
///
/// let layers: Vec<Arc<dyn FlagSource>> = vec![overrides, env];
/// let chain = ChainFlagSource::new(layers);
/// assert_eq!(chain.get(&FlagKey::ROOT).unwrap(), Some(true));
/// ```
pub struct ChainFlagSource {
    layers: Vec<Arc<dyn FlagSource>>,
}

impl ChainFlagSource {
    /// Create a chain from layers in priority order (highest first)
    pub fn new(layers: Vec<Arc<dyn FlagSource>>) -> Self {
        Self { layers }
    }

    /// Environment, then workspace file, then user file
    pub fn standard(workspace_root: Option<&Path>) -> FlagResult<Self> {
        let mut layers: Vec<Arc<dyn FlagSource>> = vec![Arc::new(EnvFlagSource::new())];
        if let Some(root) = workspace_root {
            layers.push(Arc::new(FileFlagSource::workspace(root)?));
        }
        layers.push(Arc::new(FileFlagSource::user()?));
        Ok(Self::new(layers))
    }

    /// Add a layer above all existing ones
    pub fn push_front(&mut self, layer: Arc<dyn FlagSource>) {
        self.layers.insert(0, layer);
    }

    /// Add a layer below all existing ones
    pub fn push_back(&mut self, layer: Arc<dyn FlagSource>) {
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &[Arc<dyn FlagSource>] {
        &self.layers
    }

    /// Find which layer supplies a key
    pub fn find_source(&self, key: &str) -> Option<&Arc<dyn FlagSource>> {
        self.layers.iter().find(|layer| non_blank(layer.as_ref(), key).is_some())
    }
}

fn non_blank(layer: &dyn FlagSource, key: &str) -> Option<String> {
    layer.get_raw(key).filter(|v| !v.trim().is_empty())
}

impl FlagSource for ChainFlagSource {
    fn name(&self) -> &str {
        "chain"
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| non_blank(layer.as_ref(), key))
    }

    fn get(&self, key: &FlagKey) -> FlagResult<Option<bool>> {
        for layer in &self.layers {
            if let Some(raw) = non_blank(layer.as_ref(), key.as_str()) {
                // Report the layer that holds the value, not the chain
                return parse_flag(key.as_str(), &raw, layer.name());
            }
        }
        Ok(None)
    }

    fn get_info(&self, key: &str) -> FlagInfo {
        match self.find_source(key) {
            Some(layer) => FlagInfo::new(true, layer.name()),
            None => FlagInfo::not_set(),
        }
    }
}

impl std::fmt::Debug for ChainFlagSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.layers.iter().map(|l| l.name()).collect();
        f.debug_struct("ChainFlagSource")
            .field("layers", &names)
            .finish()
    }
}
