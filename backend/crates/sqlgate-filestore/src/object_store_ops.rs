//! Key-level object store operations
//!
//! Every operation takes a caller path, strips any leading `/` and runs against
//! an `Arc<dyn ObjectStore>`. Each async operation has a `_sync` wrapper for
//! callers outside a runtime.

use crate::core::paths::object_key;
use crate::core::runtime::run_blocking;
use crate::error::{FilestoreError, Result};
use bytes::Bytes;
use futures_util::StreamExt;
use object_store::{ObjectMeta, ObjectStore};
use serde::Serialize;
use std::sync::Arc;

/// One object from a drained listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectEntry {
    /// Store key, without a leading `/`
    pub key: String,
    pub size: u64,
}

impl ObjectEntry {
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size,
        }
    }
}

/// Version of a stored object as reported by the store
///
/// Two stamps differ whenever the object was rewritten. Local and in-memory
/// stores derive `e_tag` from file identity or a write counter, S3 from the
/// content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectStamp {
    pub size: u64,
    pub e_tag: Option<String>,
    /// Milliseconds since the Unix epoch
    pub last_modified_ms: i64,
}

impl ObjectStamp {
    fn from_meta(meta: &ObjectMeta) -> Self {
        Self {
            size: meta.size as u64,
            e_tag: meta.e_tag.clone(),
            last_modified_ms: meta.last_modified.timestamp_millis(),
        }
    }

    /// Filesystem-safe token identifying this version.
    pub fn fingerprint(&self) -> String {
        let tag: String = self
            .e_tag
            .as_deref()
            .unwrap_or_default()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        format!("{}-{}-{}", self.size, self.last_modified_ms, tag)
    }
}

/// Read an object's bytes.
pub async fn read_object(store: Arc<dyn ObjectStore>, path: &str) -> Result<Bytes> {
    let key = object_key(path)?;

    let result = store
        .get(&key)
        .await
        .map_err(|e| FilestoreError::from_object_store(key.as_ref(), e))?;

    result
        .bytes()
        .await
        .map_err(|e| FilestoreError::from_object_store(key.as_ref(), e))
}

/// Synchronous wrapper for read_object.
pub fn read_object_sync(store: Arc<dyn ObjectStore>, path: &str) -> Result<Bytes> {
    run_blocking(|| read_object(store, path))
}

/// Read an object's bytes together with the stamp of the version read.
pub async fn read_object_stamped(
    store: Arc<dyn ObjectStore>,
    path: &str,
) -> Result<(Bytes, ObjectStamp)> {
    let key = object_key(path)?;

    let result = store
        .get(&key)
        .await
        .map_err(|e| FilestoreError::from_object_store(key.as_ref(), e))?;
    let stamp = ObjectStamp::from_meta(&result.meta);

    let data = result
        .bytes()
        .await
        .map_err(|e| FilestoreError::from_object_store(key.as_ref(), e))?;
    Ok((data, stamp))
}

/// Synchronous wrapper for read_object_stamped.
pub fn read_object_stamped_sync(
    store: Arc<dyn ObjectStore>,
    path: &str,
) -> Result<(Bytes, ObjectStamp)> {
    run_blocking(|| read_object_stamped(store, path))
}

/// Current stamp of the object at `path`; [`FilestoreError::NotFound`] when
/// there is none.
pub async fn head_object(store: Arc<dyn ObjectStore>, path: &str) -> Result<ObjectStamp> {
    let key = object_key(path)?;

    store
        .head(&key)
        .await
        .map(|meta| ObjectStamp::from_meta(&meta))
        .map_err(|e| FilestoreError::from_object_store(key.as_ref(), e))
}

/// Synchronous wrapper for head_object.
pub fn head_object_sync(store: Arc<dyn ObjectStore>, path: &str) -> Result<ObjectStamp> {
    run_blocking(|| head_object(store, path))
}

/// Write bytes to a key, replacing any existing object.
pub async fn write_object(store: Arc<dyn ObjectStore>, path: &str, data: Bytes) -> Result<()> {
    let key = object_key(path)?;

    store
        .put(&key, data.into())
        .await
        .map_err(|e| FilestoreError::from_object_store(key.as_ref(), e))?;

    Ok(())
}

/// Synchronous wrapper for write_object.
pub fn write_object_sync(store: Arc<dyn ObjectStore>, path: &str, data: Bytes) -> Result<()> {
    run_blocking(|| write_object(store, path, data))
}

/// Delete a single key.
pub async fn delete_object(store: Arc<dyn ObjectStore>, path: &str) -> Result<()> {
    let key = object_key(path)?;

    store
        .delete(&key)
        .await
        .map_err(|e| FilestoreError::from_object_store(key.as_ref(), e))?;

    Ok(())
}

/// Synchronous wrapper for delete_object.
pub fn delete_object_sync(store: Arc<dyn ObjectStore>, path: &str) -> Result<()> {
    run_blocking(|| delete_object(store, path))
}

/// Rename by copying to `to` and deleting `from`.
///
/// Not atomic. When the delete fails after a successful copy both keys exist
/// and [`FilestoreError::PartialRename`] is returned.
pub async fn rename_object(store: Arc<dyn ObjectStore>, from: &str, to: &str) -> Result<()> {
    let from_key = object_key(from)?;
    let to_key = object_key(to)?;

    store
        .copy(&from_key, &to_key)
        .await
        .map_err(|e| FilestoreError::from_object_store(from_key.as_ref(), e))?;

    if let Err(e) = store.delete(&from_key).await {
        log::warn!(
            "Rename copied '{}' to '{}' but failed to delete the source: {}",
            from_key,
            to_key,
            e
        );
        return Err(FilestoreError::PartialRename {
            from: from_key.to_string(),
            to: to_key.to_string(),
            message: e.to_string(),
        });
    }

    Ok(())
}

/// Synchronous wrapper for rename_object.
pub fn rename_object_sync(store: Arc<dyn ObjectStore>, from: &str, to: &str) -> Result<()> {
    run_blocking(|| rename_object(store, from, to))
}

/// List every object under `prefix`, draining all pages.
///
/// Returned keys are relative to the store root.
pub async fn list_objects(store: Arc<dyn ObjectStore>, prefix: &str) -> Result<Vec<ObjectEntry>> {
    let key = object_key(prefix)?;
    let prefix_path = if key.as_ref().is_empty() {
        None
    } else {
        Some(key)
    };

    let mut stream = store.list(prefix_path.as_ref());
    let mut entries = Vec::new();

    while let Some(result) = stream.next().await {
        let meta = result.map_err(|e| FilestoreError::ObjectStore(e.to_string()))?;
        // Listings return normalized paths: a directory marker written as
        // `dir/` comes back as a zero-size `dir` object, so empty folders
        // never surface as directories in the tree.
        entries.push(ObjectEntry::new(meta.location.to_string(), meta.size as u64));
    }

    Ok(entries)
}

/// Synchronous wrapper for list_objects.
pub fn list_objects_sync(store: Arc<dyn ObjectStore>, prefix: &str) -> Result<Vec<ObjectEntry>> {
    run_blocking(|| list_objects(store, prefix))
}

/// Whether an object exists at `path`.
pub async fn object_exists(store: Arc<dyn ObjectStore>, path: &str) -> Result<bool> {
    let key = object_key(path)?;

    match store.head(&key).await {
        Ok(_) => Ok(true),
        Err(object_store::Error::NotFound { .. }) => Ok(false),
        Err(e) => Err(FilestoreError::ObjectStore(e.to_string())),
    }
}

/// Synchronous wrapper for object_exists.
pub fn object_exists_sync(store: Arc<dyn ObjectStore>, path: &str) -> Result<bool> {
    run_blocking(|| object_exists(store, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;
    use object_store::local::LocalFileSystem;

    fn memory_store() -> Arc<dyn ObjectStore> {
        Arc::new(InMemory::new())
    }

    #[tokio::test]
    async fn test_write_and_read_strip_leading_slash() {
        let store = memory_store();
        write_object(Arc::clone(&store), "/jobs/a.jar", Bytes::from("jar"))
            .await
            .unwrap();

        let data = read_object(Arc::clone(&store), "jobs/a.jar").await.unwrap();
        assert_eq!(data, Bytes::from("jar"));

        let listed = list_objects(store, "").await.unwrap();
        assert_eq!(listed, vec![ObjectEntry::new("jobs/a.jar", 3)]);
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let err = read_object(memory_store(), "/missing.txt").await.unwrap_err();
        assert!(matches!(err, FilestoreError::NotFound(key) if key == "missing.txt"));
    }

    #[tokio::test]
    async fn test_rename_leaves_only_new_key() {
        let store = memory_store();
        write_object(Arc::clone(&store), "a/old.txt", Bytes::from("x"))
            .await
            .unwrap();

        rename_object(Arc::clone(&store), "/a/old.txt", "/a/new.txt").await.unwrap();

        assert!(!object_exists(Arc::clone(&store), "a/old.txt").await.unwrap());
        assert!(object_exists(Arc::clone(&store), "a/new.txt").await.unwrap());
        let keys: Vec<String> = list_objects(store, "a").await.unwrap().into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["a/new.txt"]);
    }

    #[tokio::test]
    async fn test_rename_missing_source_fails_before_copy() {
        let store = memory_store();
        let err = rename_object(Arc::clone(&store), "nope", "dest").await.unwrap_err();
        assert!(matches!(err, FilestoreError::NotFound(_)));
        assert!(list_objects(store, "").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_scoped_to_prefix() {
        let store = memory_store();
        for key in ["base/a.txt", "base/dir/b.txt", "other/c.txt"] {
            write_object(Arc::clone(&store), key, Bytes::from("data"))
                .await
                .unwrap();
        }

        let mut keys: Vec<String> = list_objects(store, "/base")
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.key)
            .collect();
        keys.sort();
        assert_eq!(keys, vec!["base/a.txt", "base/dir/b.txt"]);
    }

    #[tokio::test]
    async fn test_delete_object() {
        let store = memory_store();
        write_object(Arc::clone(&store), "x.txt", Bytes::from("1")).await.unwrap();
        delete_object(Arc::clone(&store), "/x.txt").await.unwrap();
        assert!(!object_exists(store, "x.txt").await.unwrap());
    }

    #[test]
    fn test_sync_wrappers_on_local_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn ObjectStore> =
            Arc::new(LocalFileSystem::new_with_prefix(dir.path()).unwrap());

        write_object_sync(Arc::clone(&store), "/ns/file1.txt", Bytes::from("hello")).unwrap();
        write_object_sync(Arc::clone(&store), "ns/sub/file2.txt", Bytes::from("hi")).unwrap();

        assert_eq!(
            read_object_sync(Arc::clone(&store), "ns/file1.txt").unwrap(),
            Bytes::from("hello")
        );

        rename_object_sync(Arc::clone(&store), "ns/file1.txt", "ns/renamed.txt").unwrap();
        assert!(!object_exists_sync(Arc::clone(&store), "ns/file1.txt").unwrap());

        let mut listed = list_objects_sync(Arc::clone(&store), "ns").unwrap();
        listed.sort_by(|a, b| a.key.cmp(&b.key));
        assert_eq!(
            listed,
            vec![
                ObjectEntry::new("ns/renamed.txt", 5),
                ObjectEntry::new("ns/sub/file2.txt", 2),
            ]
        );

        delete_object_sync(Arc::clone(&store), "ns/renamed.txt").unwrap();
        assert_eq!(list_objects_sync(store, "ns").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stamp_changes_on_rewrite() {
        let store = memory_store();
        write_object(Arc::clone(&store), "jobs/a.jar", Bytes::from("v1")).await.unwrap();

        let first = head_object(Arc::clone(&store), "/jobs/a.jar").await.unwrap();
        assert_eq!(first.size, 2);
        assert_eq!(first, head_object(Arc::clone(&store), "jobs/a.jar").await.unwrap());

        write_object(Arc::clone(&store), "jobs/a.jar", Bytes::from("v2")).await.unwrap();
        let (data, second) = read_object_stamped(Arc::clone(&store), "jobs/a.jar").await.unwrap();
        assert_eq!(data, Bytes::from("v2"));
        assert_ne!(first, second);
        assert_ne!(first.fingerprint(), second.fingerprint());
        assert_eq!(second, head_object(store, "jobs/a.jar").await.unwrap());
    }

    #[tokio::test]
    async fn test_head_missing_is_not_found() {
        let err = head_object(memory_store(), "gone.jar").await.unwrap_err();
        assert!(matches!(err, FilestoreError::NotFound(key) if key == "gone.jar"));
    }

    #[test]
    fn test_fingerprint_is_path_safe() {
        let stamp = ObjectStamp {
            size: 3,
            e_tag: Some("\"a/b\"".to_string()),
            last_modified_ms: 17,
        };
        assert_eq!(stamp.fingerprint(), "3-17-_a_b_");
    }

    #[test]
    fn test_path_traversal_rejected() {
        let err = read_object_sync(memory_store(), "../secret").unwrap_err();
        assert!(matches!(err, FilestoreError::PathTraversal(_)));
    }
}
