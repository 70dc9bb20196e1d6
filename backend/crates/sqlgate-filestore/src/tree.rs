//! Directory tree view over a flat object listing
//!
//! Object stores only know keys. The resource browser wants folders, so the
//! listing under the resource base prefix is folded into directory and file
//! nodes. A node's identifier is its full path, which keeps identifiers stable
//! across listings and makes two distinct paths impossible to confuse.

use crate::core::paths::{normalize_prefix, strip_leading_slash};
use crate::object_store_ops::ObjectEntry;
use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a tree node: its full path, e.g. `/jobs/etl/app.jar`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(full_path: impl Into<String>) -> Self {
        Self(full_path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parent of a node: the caller's root, or another node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParentId {
    Root(i64),
    Node(ResourceId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceNode {
    pub id: ResourceId,
    pub parent_id: ParentId,
    /// Path relative to the base prefix, with a leading `/`
    pub full_name: String,
    /// Last path segment
    pub file_name: String,
    pub is_directory: bool,
    /// Object size in bytes; 0 for directories
    pub size: u64,
}

/// Fold `entries` listed under `base_path` into tree nodes below `root_id`.
///
/// Keys outside the prefix, and the prefix marker itself, are skipped. Each
/// shared ancestor appears once. A key ending in `/` is a directory marker.
/// If one key makes a path a file and another makes it a directory, the
/// directory wins. Nodes come back ordered by full path.
pub fn build_resource_tree(
    base_path: &str,
    entries: &[ObjectEntry],
    root_id: i64,
) -> Vec<ResourceNode> {
    let prefix = normalize_prefix(base_path);
    let mut nodes: BTreeMap<String, ResourceNode> = BTreeMap::new();

    for entry in entries {
        let Some(relative) = strip_leading_slash(&entry.key).strip_prefix(prefix.as_str()) else {
            log::trace!("Skipping key outside '{}': {}", prefix, entry.key);
            continue;
        };

        let marks_directory = relative.ends_with('/');
        let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
        let last = segments.len().saturating_sub(1);

        let mut parent_id = ParentId::Root(root_id);
        let mut full_name = String::new();

        for (index, segment) in segments.iter().enumerate() {
            full_name.push('/');
            full_name.push_str(segment);

            let is_directory = index < last || marks_directory;

            match nodes.entry(full_name.clone()) {
                Entry::Occupied(mut occupied) => {
                    let node = occupied.get_mut();
                    if is_directory && !node.is_directory {
                        node.is_directory = true;
                        node.size = 0;
                    }
                },
                Entry::Vacant(vacant) => {
                    vacant.insert(ResourceNode {
                        id: ResourceId::new(full_name.clone()),
                        parent_id: parent_id.clone(),
                        full_name: full_name.clone(),
                        file_name: segment.to_string(),
                        is_directory,
                        size: if is_directory { 0 } else { entry.size },
                    });
                },
            }

            parent_id = ParentId::Node(ResourceId::new(full_name.clone()));
        }
    }

    nodes.into_values().collect()
}
