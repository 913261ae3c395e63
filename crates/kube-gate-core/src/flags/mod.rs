//! Flag lookup abstractions
//!
//! Supports multiple flag sources:
//! - `MemoryFlagSource`: In-memory overrides and tests
//! - `EnvFlagSource`: Process environment snapshot
//! - `FileFlagSource`: YAML/JSON property files (user/workspace level)
//! - `ChainFlagSource`: Layered lookup, first match wins

mod traits;
mod memory;
mod env;
mod file;
mod chain;

pub use traits::{
    parse_flag, relaxed_env_name, FlagError, FlagInfo, FlagKey, FlagResult, FlagSource,
};
pub use memory::MemoryFlagSource;
pub use env::EnvFlagSource;
pub use file::{parse_properties, FileFlagSource, FileFormat, FileLevel};
pub use chain::ChainFlagSource;
