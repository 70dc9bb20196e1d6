//! Artifact resolution
//!
//! Statements reference jars by URI. Before a jar can be packaged it has to be
//! a local file:
//!
//! - `rs:/jobs/app.jar` (or `rs:///jobs/app.jar`) names a resource-center file.
//!   Every resolve checks the object's current version. Each version is
//!   downloaded once into `<cache_dir>/rs/<fingerprint>/jobs/app.jar`, so a
//!   re-upload gets a fresh copy and a removed object stops resolving.
//! - `file:/opt/app.jar`, `file:///opt/app.jar` and bare paths must already exist.

use crate::error::ResolveError;
use sqlgate_filestore::{FilestoreError, ResourceCatalog};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const RESOURCE_SCHEME: &str = "rs:";
const FILE_SCHEME: &str = "file:";
const RESOURCE_CACHE_DIR: &str = "rs";

/// Turns an artifact URI into a local file
pub trait ArtifactResolver: Send + Sync {
    fn resolve(&self, uri: &str) -> Result<PathBuf, ResolveError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ArtifactLocation {
    /// Resource-center path without a leading `/`
    Resource(String),
    Local(PathBuf),
}

fn parse_location(uri: &str) -> Result<ArtifactLocation, ResolveError> {
    let uri = uri.trim();

    let location = if let Some(rest) = uri.strip_prefix(RESOURCE_SCHEME) {
        ArtifactLocation::Resource(rest.trim_start_matches('/').to_string())
    } else if let Some(rest) = uri.strip_prefix(FILE_SCHEME) {
        ArtifactLocation::Local(PathBuf::from(format!("/{}", rest.trim_start_matches('/'))))
    } else if has_scheme(uri) {
        return Err(ResolveError::UnsupportedScheme(uri.to_string()));
    } else {
        ArtifactLocation::Local(PathBuf::from(uri))
    };

    let path = match &location {
        ArtifactLocation::Resource(path) => path.as_str(),
        ArtifactLocation::Local(path) => path.to_str().unwrap_or_default(),
    };
    if path.split('/').any(|segment| segment == "..") {
        return Err(ResolveError::PathTraversal(uri.to_string()));
    }

    Ok(location)
}

/// `scheme:` with at least two letters, so `C:\jobs` is still a path
fn has_scheme(uri: &str) -> bool {
    match uri.split_once(':') {
        Some((scheme, _)) => {
            scheme.len() > 1
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        },
        None => false,
    }
}

/// Resolver backed by the resource catalog and a local download cache
#[derive(Debug, Clone)]
pub struct DefaultArtifactResolver {
    catalog: Option<ResourceCatalog>,
    cache_dir: PathBuf,
}

impl DefaultArtifactResolver {
    /// `catalog` is `None` when the resource center is disabled; `rs:` URIs
    /// then fail to resolve.
    pub fn new(catalog: Option<ResourceCatalog>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog,
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn version_path(&self, fingerprint: &str, path: &str) -> PathBuf {
        self.cache_dir
            .join(RESOURCE_CACHE_DIR)
            .join(fingerprint)
            .join(path)
    }

    fn resolve_resource(&self, uri: &str, path: &str) -> Result<PathBuf, ResolveError> {
        let catalog = self
            .catalog
            .as_ref()
            .ok_or_else(|| ResolveError::ResourcesDisabled(uri.to_string()))?;
        let storage_error = |source: FilestoreError| match source {
            FilestoreError::NotFound(_) => ResolveError::NotFound(uri.to_string()),
            source => ResolveError::Storage {
                uri: uri.to_string(),
                source,
            },
        };

        let stamp = catalog.stat_sync(path).map_err(storage_error)?;
        let cached = self.version_path(&stamp.fingerprint(), path);
        if cached.is_file() {
            log::debug!("Using cached artifact {}", cached.display());
            return Ok(cached);
        }

        // The object may change between stat and read; cache what was read
        let (data, read_stamp) = catalog.read_file_stamped_sync(path).map_err(storage_error)?;
        let cached = self.version_path(&read_stamp.fingerprint(), path);
        persist_atomically(&cached, &data)?;

        log::info!("Downloaded {} to {} ({} bytes)", uri, cached.display(), data.len());
        Ok(cached)
    }
}

/// Write `data` to a temp file next to `target`, then rename it into place.
///
/// Readers either see no file or the complete one.
fn persist_atomically(target: &Path, data: &[u8]) -> Result<(), ResolveError> {
    let cache_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| ResolveError::Cache { path, source }
    };

    let parent = target.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).map_err(cache_error(parent))?;

    let mut staged = NamedTempFile::new_in(parent).map_err(cache_error(parent))?;
    staged.write_all(data).map_err(cache_error(staged.path()))?;
    staged.as_file().sync_all().map_err(cache_error(staged.path()))?;
    staged
        .persist(target)
        .map_err(|e| cache_error(target)(e.error))?;
    Ok(())
}

impl ArtifactResolver for DefaultArtifactResolver {
    fn resolve(&self, uri: &str) -> Result<PathBuf, ResolveError> {
        match parse_location(uri)? {
            ArtifactLocation::Resource(path) => self.resolve_resource(uri, &path),
            ArtifactLocation::Local(path) => {
                if path.is_file() {
                    Ok(path)
                } else {
                    Err(ResolveError::NotFound(path.display().to_string()))
                }
            },
        }
    }
}
