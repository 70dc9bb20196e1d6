//! Resource catalog
//!
//! Resource-center view over the object store. Caller paths such as
//! `/jobs/app.jar` are placed below the configured base path before they touch
//! the store, so the catalog never reads or writes outside its prefix.

use crate::core::factory::build_object_store;
use crate::core::paths::join_key;
use crate::core::runtime::run_blocking;
use crate::error::{FilestoreError, Result};
use crate::object_store_ops::{
    delete_object, head_object, list_objects, object_exists, read_object, read_object_stamped,
    rename_object, write_object, ObjectEntry, ObjectStamp,
};
use crate::tree::{build_resource_tree, ResourceNode};
use bytes::Bytes;
use object_store::ObjectStore;
use sqlgate_configs::ResourceSettings;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ResourceCatalog {
    store: Arc<dyn ObjectStore>,
    /// Normalized base key (no leading or trailing `/`)
    base_path: String,
}

impl ResourceCatalog {
    pub fn new(store: Arc<dyn ObjectStore>, base_path: &str) -> Result<Self> {
        Ok(Self {
            store,
            base_path: join_key(&[base_path])?,
        })
    }

    /// Build the store described by `settings` and wrap it.
    pub fn from_settings(settings: &ResourceSettings) -> Result<Self> {
        let store = build_object_store(settings)?;
        Self::new(store, &settings.base_path)
    }

    pub fn store(&self) -> Arc<dyn ObjectStore> {
        Arc::clone(&self.store)
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Store key for a caller path.
    pub fn key_for(&self, path: &str) -> Result<String> {
        let key = join_key(&[&self.base_path, path])?;
        if key == self.base_path {
            return Err(FilestoreError::Other(format!(
                "Path '{}' does not name a resource",
                path
            )));
        }
        Ok(key)
    }

    pub async fn put_file(&self, path: &str, data: Bytes) -> Result<()> {
        let key = self.key_for(path)?;
        log::debug!("Uploading resource {} ({} bytes)", key, data.len());
        write_object(self.store(), &key, data).await
    }

    /// Upload the contents of a local file.
    pub async fn put_local_file(&self, path: &str, local_file: &Path) -> Result<()> {
        let data = tokio::fs::read(local_file).await?;
        self.put_file(path, Bytes::from(data)).await
    }

    pub async fn read_file(&self, path: &str) -> Result<Bytes> {
        let key = self.key_for(path)?;
        read_object(self.store(), &key).await
    }

    /// Read a resource along with the stamp of the version read.
    pub async fn read_file_stamped(&self, path: &str) -> Result<(Bytes, ObjectStamp)> {
        let key = self.key_for(path)?;
        read_object_stamped(self.store(), &key).await
    }

    /// Current version of a resource; `NotFound` when it was removed.
    pub async fn stat(&self, path: &str) -> Result<ObjectStamp> {
        let key = self.key_for(path)?;
        head_object(self.store(), &key).await
    }

    /// Read a resource as UTF-8 text.
    pub async fn file_content(&self, path: &str) -> Result<String> {
        let data = self.read_file(path).await?;
        String::from_utf8(data.to_vec()).map_err(|_| FilestoreError::InvalidUtf8(path.to_string()))
    }

    pub async fn exists(&self, path: &str) -> Result<bool> {
        let key = self.key_for(path)?;
        object_exists(self.store(), &key).await
    }

    pub async fn remove(&self, path: &str) -> Result<()> {
        let key = self.key_for(path)?;
        log::debug!("Removing resource {}", key);
        delete_object(self.store(), &key).await
    }

    /// Move a resource. See [`rename_object`] for the failure modes.
    pub async fn rename(&self, path: &str, new_path: &str) -> Result<()> {
        let from = self.key_for(path)?;
        let to = self.key_for(new_path)?;
        log::debug!("Renaming resource {} -> {}", from, to);
        rename_object(self.store(), &from, &to).await
    }

    /// Every object under the base path.
    pub async fn list(&self) -> Result<Vec<ObjectEntry>> {
        list_objects(self.store(), &self.base_path).await
    }

    /// Directory tree of all resources, rooted at `root_id`.
    pub async fn full_directory_structure(&self, root_id: i64) -> Result<Vec<ResourceNode>> {
        let entries = self.list().await?;
        Ok(build_resource_tree(&self.base_path, &entries, root_id))
    }

    pub fn put_file_sync(&self, path: &str, data: Bytes) -> Result<()> {
        run_blocking(|| self.put_file(path, data))
    }

    pub fn read_file_sync(&self, path: &str) -> Result<Bytes> {
        run_blocking(|| self.read_file(path))
    }

    pub fn read_file_stamped_sync(&self, path: &str) -> Result<(Bytes, ObjectStamp)> {
        run_blocking(|| self.read_file_stamped(path))
    }

    pub fn stat_sync(&self, path: &str) -> Result<ObjectStamp> {
        run_blocking(|| self.stat(path))
    }

    pub fn remove_sync(&self, path: &str) -> Result<()> {
        run_blocking(|| self.remove(path))
    }

    pub fn rename_sync(&self, path: &str, new_path: &str) -> Result<()> {
        run_blocking(|| self.rename(path, new_path))
    }

    pub fn full_directory_structure_sync(&self, root_id: i64) -> Result<Vec<ResourceNode>> {
        run_blocking(|| self.full_directory_structure(root_id))
    }
}
