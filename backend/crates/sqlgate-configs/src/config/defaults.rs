// Default value functions

pub fn default_true() -> bool {
    true
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_log_format() -> String {
    "compact".to_string()
}

pub fn default_logs_path() -> String {
    "./logs".to_string() // Normalized to absolute at runtime
}

pub fn default_parallelism() -> u32 {
    1
}

pub fn default_artifact_cache_dir() -> String {
    "./data/artifacts".to_string()
}

pub fn default_resource_base_path() -> String {
    "/sqlgate".to_string()
}

pub fn default_local_resource_directory() -> String {
    "./data/resources".to_string()
}

pub fn default_s3_region() -> String {
    "us-east-1".to_string()
}

pub fn default_request_timeout_secs() -> u64 {
    60
}

pub fn default_connect_timeout_secs() -> u64 {
    10
}
