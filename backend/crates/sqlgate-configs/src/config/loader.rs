use super::types::{GatewayConfig, ResourceModel};
use crate::file_helpers::normalize_dir_path;
use std::fs;
use std::path::Path;

impl GatewayConfig {
    /// Load configuration from a TOML file
    ///
    /// Note: Environment overrides are applied separately via `apply_env_overrides()`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let mut config = Self::from_toml_str(&content)?;
        config.finalize()?;

        Ok(config)
    }

    /// Parse configuration from TOML text without finalizing it.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))
    }

    /// Override selected settings from `SQLGATE_*` environment variables.
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        use std::env;

        if let Ok(level) = env::var("SQLGATE_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(val) = env::var("SQLGATE_LOG_TO_CONSOLE") {
            self.logging.log_to_console =
                val.eq_ignore_ascii_case("true") || val == "1" || val.eq_ignore_ascii_case("yes");
        }

        if let Ok(base_path) = env::var("SQLGATE_RESOURCE_BASE_PATH") {
            self.resources.base_path = base_path;
        }

        // Credentials are kept out of config files where possible
        if let Ok(key) = env::var("SQLGATE_S3_ACCESS_KEY") {
            self.resources.s3.access_key = Some(key);
        }
        if let Ok(secret) = env::var("SQLGATE_S3_SECRET_KEY") {
            self.resources.s3.secret_key = Some(secret);
        }

        if let Ok(value) = env::var("SQLGATE_DEFAULT_PARALLELISM") {
            self.execution.default_parallelism = value.parse().map_err(|_| {
                anyhow::anyhow!("Invalid SQLGATE_DEFAULT_PARALLELISM value: {}", value)
            })?;
        }

        Ok(())
    }

    fn normalize_paths(&mut self) {
        self.logging.logs_path = normalize_dir_path(&self.logging.logs_path);
        self.execution.artifact_cache_dir = normalize_dir_path(&self.execution.artifact_cache_dir);
        self.resources.local_directory = normalize_dir_path(&self.resources.local_directory);
    }

    /// Normalize local filesystem paths and validate configuration.
    ///
    /// Call this after applying environment overrides.
    pub fn finalize(&mut self) -> anyhow::Result<()> {
        self.normalize_paths();
        self.validate()?;
        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        for (target, level) in &self.logging.targets {
            if !valid_levels.contains(&level.as_str()) {
                return Err(anyhow::anyhow!(
                    "Invalid log level '{}' for target '{}'. Must be one of: {}",
                    level,
                    target,
                    valid_levels.join(", ")
                ));
            }
        }

        if self.execution.default_parallelism == 0 {
            return Err(anyhow::anyhow!("default_parallelism cannot be 0"));
        }

        if self.execution.artifact_cache_dir.trim().is_empty() {
            return Err(anyhow::anyhow!("artifact_cache_dir cannot be empty"));
        }

        if self.resources.enabled {
            if self.resources.base_path.contains("..") {
                return Err(anyhow::anyhow!(
                    "resources.base_path cannot contain '..': {}",
                    self.resources.base_path
                ));
            }

            match self.resources.model {
                ResourceModel::Local => {
                    if self.resources.local_directory.trim().is_empty() {
                        return Err(anyhow::anyhow!(
                            "resources.local_directory is required for the local model"
                        ));
                    }
                },
                ResourceModel::S3 => {
                    if self.resources.s3.bucket.trim().is_empty() {
                        return Err(anyhow::anyhow!(
                            "resources.s3.bucket is required for the s3 model"
                        ));
                    }
                    if self.resources.s3.access_key.is_some() != self.resources.s3.secret_key.is_some()
                    {
                        return Err(anyhow::anyhow!(
                            "resources.s3.access_key and resources.s3.secret_key must be set together"
                        ));
                    }
                },
            }
        }

        Ok(())
    }
}
