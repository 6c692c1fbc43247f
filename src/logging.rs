//! Logging System
//!
//! Structured logging on the `tracing` stack: configurable level, text or
//! JSON format, stdout or file output. Environment variables win over the
//! config file (`NAVFRAME_LOG`, `NAVFRAME_LOG_FORMAT`).

use crate::error::NavigationError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Log file path; stdout when unset
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Colored output (text format on stdout only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            file: None,
            color: default_true(),
        }
    }
}

/// Initialize the logging system.
///
/// Priority order: `NAVFRAME_LOG` / `NAVFRAME_LOG_FORMAT` environment
/// variables, then the given config, then defaults.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), NavigationError> {
    let filter = build_env_filter(config);
    let format = determine_format(config)?;
    let base = Registry::default().with(filter);
    let use_color = config.map(|c| c.color).unwrap_or(true);

    let file_writer = match config.and_then(|c| c.file.as_ref()) {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    NavigationError::Config(format!("failed to create log directory: {e}"))
                })?;
            }
            Some(
                std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| {
                        NavigationError::Config(format!(
                            "failed to open log file {}: {e}",
                            path.display()
                        ))
                    })?,
            )
        }
        None => None,
    };

    if format == "json" {
        match file_writer {
            Some(file) => base
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(file),
                )
                .init(),
            None => base
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(std::io::stdout),
                )
                .init(),
        }
    } else {
        match file_writer {
            Some(file) => base
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(false)
                        .with_writer(file),
                )
                .init(),
            None => base
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(use_color)
                        .with_writer(std::io::stdout),
                )
                .init(),
        }
    }

    Ok(())
}

fn build_env_filter(config: Option<&LoggingConfig>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env("NAVFRAME_LOG") {
        return filter;
    }
    let level = config.map(|c| c.level.as_str()).unwrap_or("info");
    EnvFilter::new(level)
}

fn determine_format(config: Option<&LoggingConfig>) -> Result<String, NavigationError> {
    if let Ok(format) = std::env::var("NAVFRAME_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }
    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    if format != "json" && format != "text" {
        return Err(NavigationError::Config(format!(
            "Invalid log format: {format} (must be 'json' or 'text')"
        )));
    }
    Ok(format.to_string())
}
