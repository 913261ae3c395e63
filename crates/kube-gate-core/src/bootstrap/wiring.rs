//! Explicit bootstrap wiring
//!
//! Resolves the gates, creates the platform client only when some gate is
//! open, and registers exactly the locators whose gate is open. Locators for
//! closed gates are never constructed.

use std::sync::Arc;

use crate::flags::FlagSource;
use crate::gate::{GateDecision, GateResolver};
use crate::locator::{
    ConfigMapPropertySourceLocator, LocatorSettings, SecretsPropertySourceLocator, SourceKind,
};
use crate::logging::{Logger, NoOpLogger, SharedLogger};
use crate::platform::{PlatformClient, PlatformResult};
use crate::{log_debug, log_info};

use super::chain::LocatorChain;
use super::error::BootstrapResult;

/// Bootstrap routine for the property-source locators
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use kube_gate_core::bootstrap::Bootstrap;
/// use kube_gate_core::flags::{FlagKey, MemoryFlagSource};
/// use kube_gate_core::platform::{MockPlatformClient, PlatformClient};
///
/// let flags = Arc::new(MemoryFlagSource::new().with(FlagKey::SECRETS.as_str(), "false"));
/// let chain = Bootstrap::new(flags)
///     .run(|| Ok(Arc::new(MockPlatformClient::new()) as Arc<dyn PlatformClient>))
///     .unwrap();
///
/// assert_eq!(chain.names(), vec!["configMapPropertySourceLocator"]);
/// ```
pub struct Bootstrap {
    flags: Arc<dyn FlagSource>,
    logger: SharedLogger,
}

impl Bootstrap {
    pub fn new(flags: Arc<dyn FlagSource>) -> Self {
        Self {
            flags,
            logger: Arc::new(NoOpLogger::new()),
        }
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Resolve the gates against this bootstrap's flags
    pub fn resolve(&self) -> BootstrapResult<GateDecision> {
        let decision = GateResolver::resolve(self.flags.as_ref())?;
        log_info!(self.logger, "Platform config gates resolved: {}", decision);
        Ok(decision)
    }

    /// Resolve the gates and build the locator chain
    ///
    /// `client_factory` is called at most once, and not at all when both
    /// gates are closed.
    pub fn run<F>(&self, client_factory: F) -> BootstrapResult<LocatorChain>
    where
        F: FnOnce() -> PlatformResult<Arc<dyn PlatformClient>>,
    {
        let decision = self.resolve()?;
        self.run_with_decision(decision, client_factory)
    }

    /// Build the locator chain for an already computed decision
    pub fn run_with_decision<F>(&self, decision: GateDecision, client_factory: F) -> BootstrapResult<LocatorChain>
    where
        F: FnOnce() -> PlatformResult<Arc<dyn PlatformClient>>,
    {
        let mut chain = LocatorChain::new();
        if !decision.any() {
            log_info!(self.logger, "Platform config sources disabled, no client created");
            return Ok(chain);
        }

        let client = client_factory()?;

        if decision.activate_config_source {
            let settings = LocatorSettings::from_flags(SourceKind::ConfigMap, self.flags.as_ref());
            log_debug!(
                self.logger,
                "Registering {} for {}",
                SourceKind::ConfigMap.locator_name(),
                settings.source_name(SourceKind::ConfigMap)
            );
            chain.register(Arc::new(ConfigMapPropertySourceLocator::new(client.clone(), settings)));
        } else {
            log_debug!(self.logger, "Skipping {}: gate closed", SourceKind::ConfigMap.locator_name());
        }

        if decision.activate_secret_source {
            let settings = LocatorSettings::from_flags(SourceKind::Secrets, self.flags.as_ref());
            log_debug!(
                self.logger,
                "Registering {} for {}",
                SourceKind::Secrets.locator_name(),
                settings.source_name(SourceKind::Secrets)
            );
            chain.register(Arc::new(SecretsPropertySourceLocator::new(client, settings)));
        } else {
            log_debug!(self.logger, "Skipping {}: gate closed", SourceKind::Secrets.locator_name());
        }

        Ok(chain)
    }
}

impl std::fmt::Debug for Bootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bootstrap")
            .field("flags", &self.flags.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::bootstrap::BootstrapError;
    use crate::flags::{ChainFlagSource, EnvFlagSource, FlagError, FlagKey, FlagSource, MemoryFlagSource};
    use crate::locator::{CONFIG_MAP_LOCATOR, SECRETS_LOCATOR};
    use crate::logging::MemoryLogger;
    use crate::platform::{MockPlatformClient, PlatformError};

    fn mock_client() -> PlatformResult<Arc<dyn PlatformClient>> {
        Ok(Arc::new(MockPlatformClient::new()))
    }

    fn bootstrap(pairs: &[(&str, &str)]) -> Bootstrap {
        let flags = MemoryFlagSource::new();
        for (k, v) in pairs {
            flags.set(*k, *v);
        }
        Bootstrap::new(Arc::new(flags))
    }

    #[test]
    fn test_platform_disabled_registers_nothing() {
        let calls = Cell::new(0);
        let chain = bootstrap(&[("spring.cloud.kubernetes.enabled", "false")])
            .run(|| {
                calls.set(calls.get() + 1);
                mock_client()
            })
            .unwrap();

        assert!(!chain.contains(CONFIG_MAP_LOCATOR));
        assert!(!chain.contains(SECRETS_LOCATOR));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_config_and_secrets_disabled_registers_nothing() {
        let calls = Cell::new(0);
        let chain = bootstrap(&[
            ("spring.cloud.kubernetes.config.enabled", "false"),
            ("spring.cloud.kubernetes.secrets.enabled", "false"),
        ])
        .run(|| {
            calls.set(calls.get() + 1);
            mock_client()
        })
        .unwrap();

        assert!(chain.is_empty());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_platform_enabled_registers_both() {
        let chain = bootstrap(&[("spring.cloud.kubernetes.enabled", "true")])
            .run(mock_client)
            .unwrap();

        assert!(chain.contains(CONFIG_MAP_LOCATOR));
        assert!(chain.contains(SECRETS_LOCATOR));
        assert_eq!(chain.names(), vec![CONFIG_MAP_LOCATOR, SECRETS_LOCATOR]);
    }

    #[test]
    fn test_only_secrets_registered() {
        let calls = Cell::new(0);
        let chain = bootstrap(&[
            ("spring.cloud.kubernetes.enabled", "true"),
            ("spring.cloud.kubernetes.config.enabled", "false"),
        ])
        .run(|| {
            calls.set(calls.get() + 1);
            mock_client()
        })
        .unwrap();

        assert_eq!(chain.names(), vec![SECRETS_LOCATOR]);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_invalid_flag_aborts_before_client() {
        let calls = Cell::new(0);
        let result = bootstrap(&[("spring.cloud.kubernetes.config.enabled", "perhaps")]).run(|| {
            calls.set(calls.get() + 1);
            mock_client()
        });

        match result {
            Err(BootstrapError::Flag(FlagError::InvalidValue { key, .. })) => {
                assert_eq!(key, FlagKey::CONFIG.as_str());
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_client_failure_aborts() {
        let result = bootstrap(&[]).run(|| Err(PlatformError::Unavailable("no cluster".to_string())));
        let err = result.unwrap_err();
        assert!(matches!(err, BootstrapError::Client(PlatformError::Unavailable(_))));
        assert!(err.to_string().contains("no cluster"));
    }

    #[test]
    fn test_run_with_decision_skips_resolution() {
        // Flags say disabled, the explicit decision wins
        let chain = bootstrap(&[("spring.cloud.kubernetes.enabled", "false")])
            .run_with_decision(GateDecision::new(true, false), mock_client)
            .unwrap();
        assert_eq!(chain.names(), vec![CONFIG_MAP_LOCATOR]);
    }

    #[test]
    fn test_settings_flow_into_locators() {
        let chain = bootstrap(&[
            ("spring.application.name", "orders"),
            ("spring.cloud.kubernetes.secrets.namespace", "vault"),
        ])
        .run(mock_client)
        .unwrap();

        let config = chain.get(CONFIG_MAP_LOCATOR).unwrap();
        assert_eq!(config.settings(), &LocatorSettings::new("orders", "default"));
        let secrets = chain.get(SECRETS_LOCATOR).unwrap();
        assert_eq!(secrets.settings(), &LocatorSettings::new("orders", "vault"));
    }

    #[test]
    fn test_layered_flags() {
        let overrides = Arc::new(MemoryFlagSource::new().with("spring.cloud.kubernetes.enabled", "true"));
        let env = Arc::new(EnvFlagSource::with_vars([
            ("SPRING_CLOUD_KUBERNETES_ENABLED", "false"),
            ("SPRING_CLOUD_KUBERNETES_SECRETS_ENABLED", "false"),
        ]));
        let layers: Vec<Arc<dyn FlagSource>> = vec![overrides, env];
        let flags = Arc::new(ChainFlagSource::new(layers));

        let chain = Bootstrap::new(flags).run(mock_client).unwrap();
        assert_eq!(chain.names(), vec![CONFIG_MAP_LOCATOR]);
    }

    #[test]
    fn test_logs_decision() {
        let logger = Arc::new(MemoryLogger::new());
        bootstrap(&[("spring.cloud.kubernetes.secrets.enabled", "false")])
            .with_logger(logger.clone())
            .run(mock_client)
            .unwrap();

        assert!(logger.contains("configmap=on, secrets=off"));
        assert!(logger.contains("Skipping secretsPropertySourceLocator"));
    }

    #[tokio::test]
    async fn test_end_to_end_locate() {
        let client: Arc<dyn PlatformClient> = Arc::new(
            MockPlatformClient::new()
                .with_config_map("default", "orders", [("server.port", "8080")])
                .with_secret("default", "orders", [("db.password", "hunter2")]),
        );
        let chain = bootstrap(&[("spring.application.name", "orders")])
            .run(move || Ok(client))
            .unwrap();

        let sources = chain.locate_all().await.unwrap();
        let names: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["configmap.orders.default", "secrets.orders.default"]);
        assert_eq!(sources[1].get("db.password"), Some("hunter2"));
    }
}
