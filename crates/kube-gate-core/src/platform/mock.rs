//! Mock platform client for testing
//!
//! Serves ConfigMaps and Secrets from memory, without a cluster.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::traits::{ObjectData, PlatformClient, PlatformError, PlatformResult};

type ObjectKey = (String, String);

/// In-memory platform client
#[derive(Debug, Default)]
pub struct MockPlatformClient {
    config_maps: RwLock<HashMap<ObjectKey, ObjectData>>,
    secrets: RwLock<HashMap<ObjectKey, ObjectData>>,
    unavailable: bool,
    requests: AtomicUsize,
}

impl MockPlatformClient {
    /// Create an empty mock client
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client whose every call fails with `Unavailable`
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Add a ConfigMap
    pub fn with_config_map<K, V>(self, namespace: &str, name: &str, data: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.config_maps
            .write()
            .insert(object_key(namespace, name), collect(data));
        self
    }

    /// Add a Secret (values already decoded)
    pub fn with_secret<K, V>(self, namespace: &str, name: &str, data: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.secrets
            .write()
            .insert(object_key(namespace, name), collect(data));
        self
    }

    /// Number of API calls served so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn lookup(&self, objects: &RwLock<HashMap<ObjectKey, ObjectData>>, namespace: &str, name: &str) -> PlatformResult<Option<ObjectData>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(PlatformError::Unavailable("mock client is offline".to_string()));
        }
        Ok(objects.read().get(&object_key(namespace, name)).cloned())
    }
}

fn object_key(namespace: &str, name: &str) -> ObjectKey {
    (namespace.to_string(), name.to_string())
}

fn collect<K, V>(data: impl IntoIterator<Item = (K, V)>) -> ObjectData
where
    K: Into<String>,
    V: Into<String>,
{
    data.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

#[async_trait]
impl PlatformClient for MockPlatformClient {
    async fn config_map(&self, namespace: &str, name: &str) -> PlatformResult<Option<ObjectData>> {
        self.lookup(&self.config_maps, namespace, name)
    }

    async fn secret(&self, namespace: &str, name: &str) -> PlatformResult<Option<ObjectData>> {
        self.lookup(&self.secrets, namespace, name)
    }
}
