//! Ordered registry of active locators

use std::sync::Arc;

use futures::future::try_join_all;

use crate::locator::{PropertySource, PropertySourceLocator};
use crate::platform::PlatformResult;

/// The locators registered for this application, in registration order
#[derive(Default)]
pub struct LocatorChain {
    locators: Vec<Arc<dyn PropertySourceLocator>>,
}

impl LocatorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a locator, replacing any locator with the same name
    pub fn register(&mut self, locator: Arc<dyn PropertySourceLocator>) {
        match self.locators.iter().position(|l| l.name() == locator.name()) {
            Some(pos) => self.locators[pos] = locator,
            None => self.locators.push(locator),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn PropertySourceLocator>> {
        self.locators.iter().find(|l| l.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.locators.iter().map(|l| l.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn PropertySourceLocator>> {
        self.locators.iter()
    }

    pub fn len(&self) -> usize {
        self.locators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }

    /// Locate every registered source
    ///
    /// Results keep registration order. The first failure aborts the whole
    /// call.
    pub async fn locate_all(&self) -> PlatformResult<Vec<PropertySource>> {
        try_join_all(self.locators.iter().map(|l| l.locate())).await
    }
}

impl std::fmt::Debug for LocatorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocatorChain")
            .field("locators", &self.names())
            .finish()
    }
}
