//! Property-source locator abstraction

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::flags::FlagSource;
use crate::platform::PlatformResult;

/// Registry name of the ConfigMap-backed locator
pub const CONFIG_MAP_LOCATOR: &str = "configMapPropertySourceLocator";
/// Registry name of the Secret-backed locator
pub const SECRETS_LOCATOR: &str = "secretsPropertySourceLocator";

const APPLICATION_NAME_KEY: &str = "spring.application.name";
const CLIENT_NAMESPACE_KEY: &str = "spring.cloud.kubernetes.client.namespace";
const DEFAULT_NAME: &str = "application";
const DEFAULT_NAMESPACE: &str = "default";

/// Key/value entries contributed to the configuration chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySource {
    /// Source name, e.g. `configmap.orders.default`
    pub name: String,
    pub properties: BTreeMap<String, String>,
}

impl PropertySource {
    pub fn new(name: impl Into<String>, properties: BTreeMap<String, String>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Kind of platform object a locator reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    ConfigMap,
    Secrets,
}

impl SourceKind {
    /// Property prefix for this kind's settings
    pub fn property_prefix(&self) -> &'static str {
        match self {
            SourceKind::ConfigMap => "spring.cloud.kubernetes.config",
            SourceKind::Secrets => "spring.cloud.kubernetes.secrets",
        }
    }

    /// Prefix of the property-source names this kind produces
    pub fn source_prefix(&self) -> &'static str {
        match self {
            SourceKind::ConfigMap => "configmap",
            SourceKind::Secrets => "secrets",
        }
    }

    pub fn locator_name(&self) -> &'static str {
        match self {
            SourceKind::ConfigMap => CONFIG_MAP_LOCATOR,
            SourceKind::Secrets => SECRETS_LOCATOR,
        }
    }
}

/// Which object a locator reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorSettings {
    pub name: String,
    pub namespace: String,
}

impl LocatorSettings {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    /// Read settings for `kind` from the same source the gates came from
    ///
    /// The object name falls back to `spring.application.name`, then
    /// `application`. The namespace falls back to the client namespace, then
    /// `default`.
    pub fn from_flags(kind: SourceKind, flags: &dyn FlagSource) -> Self {
        let prefix = kind.property_prefix();
        let name = flags
            .get_string(&format!("{prefix}.name"))
            .or_else(|| flags.get_string(APPLICATION_NAME_KEY))
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        let namespace = flags
            .get_string(&format!("{prefix}.namespace"))
            .or_else(|| flags.get_string(CLIENT_NAMESPACE_KEY))
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        Self { name, namespace }
    }

    /// Property-source name for `kind`, e.g. `secrets.orders.prod`
    pub fn source_name(&self, kind: SourceKind) -> String {
        format!("{}.{}.{}", kind.source_prefix(), self.name, self.namespace)
    }
}

/// Adapter that contributes entries from an external system
#[async_trait]
pub trait PropertySourceLocator: Send + Sync {
    /// Registry name of this locator
    fn name(&self) -> &str;

    fn kind(&self) -> SourceKind;

    fn settings(&self) -> &LocatorSettings;

    /// Fetch the property source
    ///
    /// A missing object yields an empty source rather than an error.
    async fn locate(&self) -> PlatformResult<PropertySource>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::MemoryFlagSource;

    #[test]
    fn test_settings_defaults() {
        let settings = LocatorSettings::from_flags(SourceKind::ConfigMap, &MemoryFlagSource::new());
        assert_eq!(settings, LocatorSettings::new("application", "default"));
        assert_eq!(settings.source_name(SourceKind::ConfigMap), "configmap.application.default");
    }

    #[test]
    fn test_settings_fallback_chain() {
        let flags = MemoryFlagSource::new()
            .with("spring.application.name", "orders")
            .with("spring.cloud.kubernetes.client.namespace", "shop")
            .with("spring.cloud.kubernetes.secrets.name", "orders-creds");

        let config = LocatorSettings::from_flags(SourceKind::ConfigMap, &flags);
        assert_eq!(config, LocatorSettings::new("orders", "shop"));

        let secrets = LocatorSettings::from_flags(SourceKind::Secrets, &flags);
        assert_eq!(secrets, LocatorSettings::new("orders-creds", "shop"));
        assert_eq!(secrets.source_name(SourceKind::Secrets), "secrets.orders-creds.shop");
    }

    #[test]
    fn test_settings_ignore_blank_values() {
        let flags = MemoryFlagSource::new()
            .with("spring.cloud.kubernetes.config.namespace", "  ")
            .with("spring.application.name", "orders");
        let settings = LocatorSettings::from_flags(SourceKind::ConfigMap, &flags);
        assert_eq!(settings.namespace, "default");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(SourceKind::ConfigMap.locator_name(), "configMapPropertySourceLocator");
        assert_eq!(SourceKind::Secrets.locator_name(), "secretsPropertySourceLocator");
    }
}
