//! Extended statement parsers
//!
//! Each statement the gateway handles itself (instead of passing it through to
//! the engine's SQL path) has a parser here. Parsers only look at text; the
//! operations that act on the parsed statements live in `sqlgate-core`.

pub mod parsing;

pub mod add_custom_jar;
pub mod execute_jar;
pub mod show_fragments;

/// Result type used by the statement parsers.
/// Returns String errors so callers can map them into their own error type.
pub type DdlResult<T> = Result<T, String>;

pub use add_custom_jar::AddCustomJarStatement;
pub use execute_jar::JarSubmitParam;
pub use show_fragments::ShowFragmentsStatement;
