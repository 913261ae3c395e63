//! Bootstrap gate resolution

mod decision;
mod resolver;

pub use decision::GateDecision;
pub use resolver::{GateResolver, DEFAULT_ENABLED};
