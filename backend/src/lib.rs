//! SQLGate composition root
//!
//! Wires configuration, logging, the resource center, and the statement
//! interceptor together. Embedders supply the execution engine.

pub mod lifecycle;
pub mod logging;

pub use lifecycle::{bootstrap, load_config, Gateway};
