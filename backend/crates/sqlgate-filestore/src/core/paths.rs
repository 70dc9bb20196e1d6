//! Key normalization shared by the store operations and the catalog
//!
//! Stored keys never start with `/`. Callers pass paths in either form.

use crate::error::{FilestoreError, Result};
use object_store::path::Path as ObjectPath;

/// Drop leading `/` so a caller-visible path can be used as a store key.
pub fn strip_leading_slash(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// Join path fragments with single `/`, ignoring empty segments.
///
/// Rejects `..` segments.
pub fn join_key(parts: &[&str]) -> Result<String> {
    let mut segments = Vec::new();
    for part in parts {
        for segment in part.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return Err(FilestoreError::PathTraversal(parts.join("/"))),
                other => segments.push(other),
            }
        }
    }
    Ok(segments.join("/"))
}

/// Convert a caller path into an `object_store` key.
pub fn object_key(path: &str) -> Result<ObjectPath> {
    let key = join_key(&[strip_leading_slash(path)])?;
    ObjectPath::parse(&key)
        .map_err(|e| FilestoreError::Other(format!("Invalid object key '{}': {}", key, e)))
}

/// Normalize a listing prefix: no leading `/`, and a trailing `/` unless empty.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = strip_leading_slash(prefix);
    if trimmed.is_empty() || trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}
