use std::path::{Path, PathBuf};

/// Turn a relative directory path into an absolute one rooted at the current
/// working directory. Absolute paths and empty strings are returned unchanged.
pub fn normalize_dir_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let candidate = Path::new(trimmed);
    if candidate.is_absolute() {
        return trimmed.to_string();
    }

    let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let joined = base.join(candidate.strip_prefix("./").unwrap_or(candidate));
    joined.to_string_lossy().to_string()
}
