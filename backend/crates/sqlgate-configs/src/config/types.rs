use super::defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub execution: ExecutionSettings,
    #[serde(default)]
    pub resources: ResourceSettings,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for log files (default: "./logs")
    #[serde(default = "default_logs_path")]
    pub logs_path: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    /// "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Optional per-target log level overrides
    /// [logging.targets]
    /// object_store = "warn"
    #[serde(default)]
    pub targets: HashMap<String, String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            logs_path: default_logs_path(),
            log_to_console: true,
            format: default_log_format(),
            targets: HashMap::new(),
        }
    }
}

/// Statement execution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionSettings {
    /// Enable `${name}` substitution and `name := value` fragment definitions
    #[serde(default = "default_true")]
    pub use_sql_fragment: bool,
    /// Parallelism used when a statement does not set one
    #[serde(default = "default_parallelism")]
    pub default_parallelism: u32,
    /// Local directory where downloaded artifacts are cached
    #[serde(default = "default_artifact_cache_dir")]
    pub artifact_cache_dir: String,
}

impl Default for ExecutionSettings {
    fn default() -> Self {
        Self {
            use_sql_fragment: true,
            default_parallelism: default_parallelism(),
            artifact_cache_dir: default_artifact_cache_dir(),
        }
    }
}

/// Backend used by the resource center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceModel {
    #[default]
    Local,
    S3,
}

/// Resource center settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub model: ResourceModel,
    /// Prefix under which all uploaded resources are stored
    #[serde(default = "default_resource_base_path")]
    pub base_path: String,
    /// Root directory for the local model
    #[serde(default = "default_local_resource_directory")]
    pub local_directory: String,
    #[serde(default)]
    pub s3: S3Settings,
    #[serde(default)]
    pub timeouts: RemoteStorageTimeouts,
}

impl Default for ResourceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            model: ResourceModel::Local,
            base_path: default_resource_base_path(),
            local_directory: default_local_resource_directory(),
            s3: S3Settings::default(),
            timeouts: RemoteStorageTimeouts::default(),
        }
    }
}

/// S3 (or S3-compatible) bucket settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Settings {
    #[serde(default)]
    pub bucket: String,
    #[serde(default = "default_s3_region")]
    pub region: String,
    /// Custom endpoint for S3-compatible services (MinIO etc.)
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Falls back to the default AWS credential chain when unset
    #[serde(default, skip_serializing)]
    pub access_key: Option<String>,
    #[serde(default, skip_serializing)]
    pub secret_key: Option<String>,
    #[serde(default)]
    pub path_style_access: bool,
    #[serde(default)]
    pub allow_http: bool,
}

impl Default for S3Settings {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: default_s3_region(),
            endpoint: None,
            access_key: None,
            secret_key: None,
            path_style_access: false,
            allow_http: false,
        }
    }
}

/// Timeouts applied to remote object store clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteStorageTimeouts {
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for RemoteStorageTimeouts {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}
