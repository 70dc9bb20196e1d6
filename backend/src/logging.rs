// Logging for the gateway, built on tracing-subscriber.
//
// Library crates log through the `log` facade. `tracing_log::LogTracer`
// forwards those records into the subscriber so they share filters and
// sinks with the `jar.submit` spans.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use sqlgate_configs::LoggingSettings;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// File name written under `logging.logs_path`
pub const LOG_FILE_NAME: &str = "sqlgate.log";

/// Log format type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact text format: timestamp LEVEL target - message
    Compact,
    /// JSON Lines format for structured logging
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" | "jsonl" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Build the `EnvFilter` from the base level, noisy-crate overrides, and
/// optional per-target overrides from config.
pub fn build_env_filter(
    level: &str,
    target_levels: Option<&HashMap<String, String>>,
) -> anyhow::Result<EnvFilter> {
    let mut directives = vec![level.to_string()];

    // Storage clients are chatty at debug
    let noisy: &[(&str, &str)] = &[
        ("object_store", "info"),
        ("reqwest", "warn"),
        ("hyper", "warn"),
        ("hyper_util", "warn"),
        ("h2", "warn"),
        ("rustls", "warn"),
        ("tracing", "warn"),
    ];
    for (target, lvl) in noisy {
        directives.push(format!("{}={}", target, lvl));
    }

    if let Some(map) = target_levels {
        // Sorted so the filter string is stable
        let mut overrides: Vec<_> = map.iter().collect();
        overrides.sort();
        for (target, lvl) in overrides {
            directives.push(format!("{}={}", target, lvl));
        }
    }

    let filter_str = directives.join(",");
    EnvFilter::try_new(&filter_str)
        .map_err(|e| anyhow::anyhow!("Invalid tracing filter '{}': {}", filter_str, e))
}

/// Path of the log file for `settings`.
pub fn log_file_path(settings: &LoggingSettings) -> PathBuf {
    Path::new(&settings.logs_path).join(LOG_FILE_NAME)
}

/// Install the global subscriber described by `[logging]`.
///
/// Sets up:
///  - a colored console layer when `log_to_console` is true
///  - a file layer (compact text or JSON lines) at [`log_file_path`]
///  - the `log` to tracing bridge
///  - span close events, which print elapsed time for each submission
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    let log_format = LogFormat::parse(&settings.format);
    let file_path = log_file_path(settings);
    let targets = Some(&settings.targets);

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let log_file = OpenOptions::new().create(true).append(true).open(&file_path)?;

    // ok() in case a bridge is already installed
    tracing_log::LogTracer::init().ok();

    let console_layer = if settings.log_to_console {
        Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_target(true)
                .with_thread_names(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(build_env_filter(&settings.level, targets)?),
        )
    } else {
        None
    };

    let file_layer = match log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(log_file)
            .with_target(true)
            .with_thread_names(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_span_list(true)
            .with_filter(build_env_filter(&settings.level, targets)?)
            .boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(log_file)
            .with_target(true)
            .with_thread_names(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(build_env_filter(&settings.level, targets)?)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    tracing::trace!(
        "Logging initialized: level={}, console={}, file={}",
        settings.level,
        settings.log_to_console,
        file_path.display()
    );

    Ok(())
}

/// Console-only logging at INFO, for tools and local runs.
pub fn init_simple_logging() -> anyhow::Result<()> {
    tracing_log::LogTracer::init().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))
}
