//! Secret-backed property-source locator

use std::sync::Arc;

use async_trait::async_trait;

use crate::platform::{PlatformClient, PlatformResult};

use super::traits::{LocatorSettings, PropertySource, PropertySourceLocator, SourceKind, SECRETS_LOCATOR};

/// Contributes the entries of one Secret
pub struct SecretsPropertySourceLocator {
    client: Arc<dyn PlatformClient>,
    settings: LocatorSettings,
}

impl SecretsPropertySourceLocator {
    pub fn new(client: Arc<dyn PlatformClient>, settings: LocatorSettings) -> Self {
        Self { client, settings }
    }
}

// Never print secret contents, only which object is read
impl std::fmt::Debug for SecretsPropertySourceLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretsPropertySourceLocator")
            .field("settings", &self.settings)
            .finish()
    }
}

#[async_trait]
impl PropertySourceLocator for SecretsPropertySourceLocator {
    fn name(&self) -> &str {
        SECRETS_LOCATOR
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Secrets
    }

    fn settings(&self) -> &LocatorSettings {
        &self.settings
    }

    async fn locate(&self) -> PlatformResult<PropertySource> {
        let data = self
            .client
            .secret(&self.settings.namespace, &self.settings.name)
            .await?;
        Ok(PropertySource::new(
            self.settings.source_name(SourceKind::Secrets),
            data.unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MockPlatformClient;

    #[tokio::test]
    async fn test_locate_secret() {
        let client = Arc::new(
            MockPlatformClient::new()
                .with_secret("shop", "orders", [("db.password", "hunter2")])
                .with_config_map("shop", "orders", [("server.port", "8080")]),
        );
        let locator = SecretsPropertySourceLocator::new(client, LocatorSettings::new("orders", "shop"));

        let source = locator.locate().await.unwrap();
        assert_eq!(source.name, "secrets.orders.shop");
        assert_eq!(source.get("db.password"), Some("hunter2"));
        assert_eq!(source.get("server.port"), None);
    }

    #[test]
    fn test_debug_hides_client() {
        let locator = SecretsPropertySourceLocator::new(
            Arc::new(MockPlatformClient::new()),
            LocatorSettings::new("orders", "shop"),
        );
        let rendered = format!("{locator:?}");
        assert!(rendered.contains("orders"));
        assert_eq!(locator.name(), "secretsPropertySourceLocator");
        assert_eq!(locator.kind(), SourceKind::Secrets);
    }
}
