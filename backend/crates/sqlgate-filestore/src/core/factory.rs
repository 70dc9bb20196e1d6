//! ObjectStore factory for the resource center backends
//!
//! Local directories and S3 buckets are both exposed as `Arc<dyn ObjectStore>`.
//! Remote clients get the request and connect timeouts from
//! `[resources.timeouts]`.

use crate::error::{FilestoreError, Result};
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::{ClientOptions, ObjectStore};
use sqlgate_configs::{RemoteStorageTimeouts, ResourceModel, ResourceSettings, S3Settings};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Build the object store selected by `settings.model`.
pub fn build_object_store(settings: &ResourceSettings) -> Result<Arc<dyn ObjectStore>> {
    match settings.model {
        ResourceModel::Local => build_local(&settings.local_directory),
        ResourceModel::S3 => build_s3(&settings.s3, &settings.timeouts),
    }
}

fn build_client_options(timeouts: &RemoteStorageTimeouts) -> ClientOptions {
    ClientOptions::new()
        .with_timeout(Duration::from_secs(timeouts.request_timeout_secs))
        .with_connect_timeout(Duration::from_secs(timeouts.connect_timeout_secs))
}

fn build_local(directory: &str) -> Result<Arc<dyn ObjectStore>> {
    let base = directory.trim();
    if base.is_empty() {
        return Err(FilestoreError::Config(
            "Local resource model requires a non-empty local_directory".into(),
        ));
    }

    let path = PathBuf::from(base);

    // LocalFileSystem::new_with_prefix needs an existing absolute path
    if !path.exists() {
        std::fs::create_dir_all(&path).map_err(|e| {
            FilestoreError::Config(format!(
                "Failed to create resource directory '{}': {}",
                path.display(),
                e
            ))
        })?;
    }

    let absolute_path = path.canonicalize().map_err(|e| {
        FilestoreError::Config(format!(
            "Failed to resolve absolute path for '{}': {}",
            path.display(),
            e
        ))
    })?;

    log::debug!("Using local resource directory {}", absolute_path.display());

    LocalFileSystem::new_with_prefix(absolute_path)
        .map(|fs| Arc::new(fs) as Arc<dyn ObjectStore>)
        .map_err(|e| FilestoreError::Config(format!("LocalFileSystem: {e}")))
}

fn build_s3(cfg: &S3Settings, timeouts: &RemoteStorageTimeouts) -> Result<Arc<dyn ObjectStore>> {
    let bucket = cfg.bucket.trim();
    if bucket.is_empty() {
        return Err(FilestoreError::Config("S3 resource model requires a bucket".into()));
    }

    let mut builder = AmazonS3Builder::new()
        .with_bucket_name(bucket)
        .with_region(&cfg.region)
        .with_client_options(build_client_options(timeouts));

    // S3-compatible services (MinIO etc.)
    if let Some(endpoint) = &cfg.endpoint {
        builder = builder.with_endpoint(endpoint);
    }
    if cfg.path_style_access || cfg.endpoint.is_some() {
        builder = builder.with_virtual_hosted_style_request(false);
    }
    if cfg.allow_http {
        builder = builder.with_allow_http(true);
    }

    if let (Some(access_key), Some(secret_key)) = (&cfg.access_key, &cfg.secret_key) {
        builder = builder
            .with_access_key_id(access_key)
            .with_secret_access_key(secret_key);
    }

    log::debug!("Using S3 resource bucket '{}' in {}", bucket, cfg.region);

    builder
        .build()
        .map(|s3| Arc::new(s3) as Arc<dyn ObjectStore>)
        .map_err(|e| FilestoreError::Config(format!("AmazonS3: {e}")))
}
