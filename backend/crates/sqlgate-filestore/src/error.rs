use thiserror::Error;

/// Errors raised by object store access and the resource catalog
#[derive(Debug, Error)]
pub enum FilestoreError {
    #[error("Object store error: {0}")]
    ObjectStore(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage configuration error: {0}")]
    Config(String),

    #[error("Path traversal rejected: {0}")]
    PathTraversal(String),

    #[error("File '{0}' is not valid UTF-8")]
    InvalidUtf8(String),

    /// The copy step of a rename succeeded but removing the source failed.
    /// Both keys now exist.
    #[error("Rename of '{from}' to '{to}' left the source in place: {message}")]
    PartialRename {
        from: String,
        to: String,
        message: String,
    },

    #[error("{0}")]
    Other(String),
}

impl FilestoreError {
    /// Map an `object_store` error, keeping not-found distinct.
    pub(crate) fn from_object_store(key: &str, err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { .. } => FilestoreError::NotFound(key.to_string()),
            other => FilestoreError::ObjectStore(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, FilestoreError>;
