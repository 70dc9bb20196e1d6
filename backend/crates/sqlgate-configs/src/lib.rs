//! sqlgate-configs
//!
//! Gateway configuration types and loader for SQLGate.

pub mod config;
pub mod file_helpers;

pub use config::*;
pub use config::defaults;
