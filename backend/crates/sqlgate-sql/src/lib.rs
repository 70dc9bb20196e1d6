//! sqlgate-sql - statement text layer
//!
//! Everything here works on plain statement text and has no knowledge of the
//! execution engine:
//!
//! - [`preprocess`]: comment stripping before dispatch
//! - [`variables`]: the session variable table behind `${name}` substitution
//! - [`args`]: quote-aware splitting of program argument strings
//! - [`ddl`]: parsers for the extended statements (`EXECUTE JAR`, `ADD CUSTOMJAR`,
//!   `SHOW FRAGMENTS`)
//! - [`security`]: redaction of secrets before statements reach the logs

pub mod args;
pub mod ddl;
pub mod preprocess;
pub mod security;
pub mod variables;

pub use args::extract_args;
pub use ddl::{AddCustomJarStatement, DdlResult, JarSubmitParam, ShowFragmentsStatement};
pub use preprocess::remove_comments;
pub use security::redact_sensitive_sql;
pub use variables::{VariableError, VariableManager};
