//! Property-source locators for ConfigMaps and Secrets

mod traits;
mod config_map;
mod secrets;

pub use traits::{
    LocatorSettings, PropertySource, PropertySourceLocator, SourceKind,
    CONFIG_MAP_LOCATOR, SECRETS_LOCATOR,
};
pub use config_map::ConfigMapPropertySourceLocator;
pub use secrets::SecretsPropertySourceLocator;
