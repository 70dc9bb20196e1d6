// Error types module
use sqlgate_filestore::FilestoreError;
use sqlgate_sql::{redact_sensitive_sql, VariableError};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for statement handling
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Malformed extended statement or missing mandatory option
    #[error("Invalid statement: {0}")]
    Validation(String),

    #[error(transparent)]
    Variable(#[from] VariableError),

    /// Resolution, packaging or pipeline extraction failed for a jar submission
    #[error("Failed to submit '{statement}': {message}")]
    Submission { statement: String, message: String },

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Storage error: {0}")]
    Storage(#[from] FilestoreError),

    #[error("Artifact resolution failed: {0}")]
    Resolve(#[from] ResolveError),
}

impl GatewayError {
    /// Wrap a submission failure. The statement is redacted before it is kept.
    pub fn submission(statement: &str, message: impl std::fmt::Display) -> Self {
        GatewayError::Submission {
            statement: redact_sensitive_sql(statement),
            message: message.to_string(),
        }
    }
}

/// Errors reported by the execution engine collaborator
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Engine unavailable: {0}")]
    Unavailable(String),

    #[error("Program error: {0}")]
    Program(String),

    #[error("Job graph compilation failed: {0}")]
    Compilation(String),

    #[error("{0}")]
    Other(String),
}

/// Errors raised while turning an artifact URI into a local file
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Unsupported artifact scheme in '{0}'")]
    UnsupportedScheme(String),

    #[error("Artifact not found: {0}")]
    NotFound(String),

    #[error("Path traversal rejected in '{0}'")]
    PathTraversal(String),

    #[error("Resource center is disabled, cannot resolve '{0}'")]
    ResourcesDisabled(String),

    #[error("Failed to fetch '{uri}' from the resource center: {source}")]
    Storage {
        uri: String,
        #[source]
        source: FilestoreError,
    },

    #[error("Failed to cache artifact at {}: {source}", path.display())]
    Cache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GatewayError>;
