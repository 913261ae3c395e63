//! ConfigMap-backed property-source locator

use std::sync::Arc;

use async_trait::async_trait;

use crate::platform::{PlatformClient, PlatformResult};

use super::traits::{LocatorSettings, PropertySource, PropertySourceLocator, SourceKind, CONFIG_MAP_LOCATOR};

/// Contributes the entries of one ConfigMap
pub struct ConfigMapPropertySourceLocator {
    client: Arc<dyn PlatformClient>,
    settings: LocatorSettings,
}

impl ConfigMapPropertySourceLocator {
    pub fn new(client: Arc<dyn PlatformClient>, settings: LocatorSettings) -> Self {
        Self { client, settings }
    }
}

impl std::fmt::Debug for ConfigMapPropertySourceLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigMapPropertySourceLocator")
            .field("settings", &self.settings)
            .finish()
    }
}

#[async_trait]
impl PropertySourceLocator for ConfigMapPropertySourceLocator {
    fn name(&self) -> &str {
        CONFIG_MAP_LOCATOR
    }

    fn kind(&self) -> SourceKind {
        SourceKind::ConfigMap
    }

    fn settings(&self) -> &LocatorSettings {
        &self.settings
    }

    async fn locate(&self) -> PlatformResult<PropertySource> {
        let data = self
            .client
            .config_map(&self.settings.namespace, &self.settings.name)
            .await?;
        Ok(PropertySource::new(
            self.settings.source_name(SourceKind::ConfigMap),
            data.unwrap_or_default(),
        ))
    }
}
