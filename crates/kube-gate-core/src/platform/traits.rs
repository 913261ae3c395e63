//! Orchestration-platform client abstraction

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

/// Key/value data held by a ConfigMap or Secret
pub type ObjectData = BTreeMap<String, String>;

/// Errors that can occur while talking to the platform API
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The API server could not be reached
    #[error("Platform API unavailable: {0}")]
    Unavailable(String),

    /// The service account may not read the object
    #[error("Access to {kind} {namespace}/{name} forbidden")]
    Forbidden {
        kind: String,
        namespace: String,
        name: String,
    },

    #[error("Platform error: {0}")]
    Other(String),
}

impl PlatformError {
    pub fn forbidden(kind: impl Into<String>, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Forbidden {
            kind: kind.into(),
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

pub type PlatformResult<T> = Result<T, PlatformError>;

/// Client for the orchestration platform's API
///
/// Implementations talk to a live cluster; tests use `MockPlatformClient`.
/// Secret values are returned already decoded.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Read a ConfigMap's data, `None` if it does not exist
    async fn config_map(&self, namespace: &str, name: &str) -> PlatformResult<Option<ObjectData>>;

    /// Read a Secret's data, `None` if it does not exist
    async fn secret(&self, namespace: &str, name: &str) -> PlatformResult<Option<ObjectData>>;
}
