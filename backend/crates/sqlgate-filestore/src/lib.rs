//! # sqlgate-filestore
//!
//! Object store access for the resource center.
//!
//! - [`object_store_ops`]: key-level read, write, delete, rename and drained listing
//! - [`catalog`]: base-path scoped resource operations used by the gateway
//! - [`tree`]: folds a flat listing into directory and file nodes
//! - [`core`]: store factory, key normalization and the sync bridge
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use sqlgate_filestore::ResourceCatalog;
//!
//! let catalog = ResourceCatalog::from_settings(&config.resources)?;
//! catalog.put_file("/jobs/app.jar", bytes).await?;
//! let tree = catalog.full_directory_structure(0).await?;
//! ```

pub mod catalog;
pub mod core;
pub mod error;
pub mod object_store_ops;
pub mod tree;

pub use catalog::ResourceCatalog;
pub use core::{build_object_store, object_key, run_blocking, strip_leading_slash};
pub use error::{FilestoreError, Result};
pub use object_store_ops::{
    delete_object, delete_object_sync, head_object, head_object_sync, list_objects,
    list_objects_sync, object_exists, object_exists_sync, read_object, read_object_stamped,
    read_object_stamped_sync, read_object_sync, rename_object, rename_object_sync, write_object,
    write_object_sync, ObjectEntry, ObjectStamp,
};
pub use tree::{build_resource_tree, ParentId, ResourceId, ResourceNode};
