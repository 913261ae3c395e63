//! Orchestration-platform client boundary
//!
//! The real client lives outside this crate. Locators only see the
//! `PlatformClient` trait, and tests substitute `MockPlatformClient`.

mod traits;
mod mock;

pub use traits::{ObjectData, PlatformClient, PlatformError, PlatformResult};
pub use mock::MockPlatformClient;
