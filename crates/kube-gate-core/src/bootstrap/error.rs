//! Bootstrap error types

use thiserror::Error;

use crate::flags::FlagError;
use crate::platform::PlatformError;

/// Errors that abort application bootstrap
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// A flag could not be read or coerced
    #[error("Invalid bootstrap configuration: {0}")]
    Flag(#[from] FlagError),

    /// The platform client could not be created
    #[error("Failed to create platform client: {0}")]
    Client(#[from] PlatformError),
}

pub type BootstrapResult<T> = Result<T, BootstrapError>;
