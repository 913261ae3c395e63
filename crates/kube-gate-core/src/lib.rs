//! kube-gate core
//!
//! Decides at bootstrap which platform property-source locators an
//! application registers: one backed by ConfigMaps, one backed by Secrets.
//!
//! Three flags drive the decision, each enabled unless set otherwise:
//! - `spring.cloud.kubernetes.enabled` switches the whole integration off
//! - `spring.cloud.kubernetes.config.enabled` gates the ConfigMap locator
//! - `spring.cloud.kubernetes.secrets.enabled` gates the Secret locator
//!
//! ```rust,ignore
//! use kube_gate_core::{Bootstrap, ChainFlagSource};
//!
//! let flags = Arc::new(ChainFlagSource::standard(Some(workspace))?);
//! let chain = Bootstrap::new(flags)
//!     .with_logger(Arc::new(ConsoleLogger::new()))
//!     .run(|| connect_to_cluster())?;
//!
//! let sources = chain.locate_all().await?;
//! ```

pub mod flags;
pub mod gate;
pub mod platform;
pub mod locator;
pub mod bootstrap;
pub mod logging;

// Re-export commonly used types
pub use flags::{
    FlagSource, FlagKey, FlagInfo, FlagError, FlagResult,
    MemoryFlagSource, EnvFlagSource, FileFlagSource, ChainFlagSource,
};

pub use gate::{GateDecision, GateResolver};

pub use platform::{PlatformClient, PlatformError, PlatformResult, MockPlatformClient};

pub use locator::{
    PropertySource, PropertySourceLocator, LocatorSettings, SourceKind,
    ConfigMapPropertySourceLocator, SecretsPropertySourceLocator,
    CONFIG_MAP_LOCATOR, SECRETS_LOCATOR,
};

pub use bootstrap::{Bootstrap, BootstrapError, BootstrapResult, LocatorChain};

pub use logging::{Logger, LogLevel, NoOpLogger, ConsoleLogger, MemoryLogger};
