//! Bootstrap wiring for the property-source locators
//!
//! The host passes its flag source in and receives the locator chain back;
//! nothing is kept in global state.

mod chain;
mod error;
mod wiring;

pub use chain::LocatorChain;
pub use error::{BootstrapError, BootstrapResult};
pub use wiring::Bootstrap;
