//! Resource-center artifact cache tests
//!
//! Tests cover:
//! - Reusing the cached copy while the object is unchanged
//! - Picking up a re-uploaded object
//! - Failing once the object is removed

use bytes::Bytes;
use object_store::memory::InMemory;
use sqlgate_core::{ArtifactResolver, DefaultArtifactResolver, ResolveError};
use sqlgate_filestore::ResourceCatalog;
use std::path::Path;
use std::sync::Arc;

const URI: &str = "rs:/jobs/app.jar";

fn resolver_with(catalog: &ResourceCatalog, cache_dir: &Path) -> DefaultArtifactResolver {
    DefaultArtifactResolver::new(Some(catalog.clone()), cache_dir)
}

fn memory_catalog() -> ResourceCatalog {
    ResourceCatalog::new(Arc::new(InMemory::new()), "/sqlgate").unwrap()
}

#[test]
fn test_unchanged_resource_reuses_cached_copy() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = memory_catalog();
    catalog.put_file_sync("/jobs/app.jar", Bytes::from("v1")).unwrap();
    let resolver = resolver_with(&catalog, dir.path());

    let first = resolver.resolve(URI).unwrap();
    let second = resolver.resolve(URI).unwrap();

    assert_eq!(first, second);
    assert!(first.ends_with("jobs/app.jar"));
    assert_eq!(std::fs::read(&first).unwrap(), b"v1");
}

#[test]
fn test_reuploaded_resource_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = memory_catalog();
    catalog.put_file_sync("/jobs/app.jar", Bytes::from("v1")).unwrap();
    let resolver = resolver_with(&catalog, dir.path());

    let old = resolver.resolve(URI).unwrap();
    catalog
        .put_file_sync("/jobs/app.jar", Bytes::from("v2-new"))
        .unwrap();
    let new = resolver.resolve(URI).unwrap();

    assert_ne!(old, new);
    assert_eq!(std::fs::read(&new).unwrap(), b"v2-new");
    // A job that already loaded the old version keeps its file
    assert_eq!(std::fs::read(&old).unwrap(), b"v1");
}

#[test]
fn test_removed_resource_fails_to_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = memory_catalog();
    catalog.put_file_sync("/jobs/app.jar", Bytes::from("v1")).unwrap();
    let resolver = resolver_with(&catalog, dir.path());
    resolver.resolve(URI).unwrap();

    catalog.remove_sync("/jobs/app.jar").unwrap();

    match resolver.resolve(URI) {
        Err(ResolveError::NotFound(uri)) => assert_eq!(uri, URI),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_cache_directory_holds_only_the_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = memory_catalog();
    catalog
        .put_file_sync("/jobs/app.jar", Bytes::from("jar-bytes"))
        .unwrap();

    let cached = resolver_with(&catalog, dir.path()).resolve(URI).unwrap();

    let names: Vec<String> = std::fs::read_dir(cached.parent().unwrap())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["app.jar"]);
}
