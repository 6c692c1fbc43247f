//! Configuration System
//!
//! Layered runtime configuration: built-in defaults, an optional TOML file,
//! and `NAVFRAME_`-prefixed environment overrides, merged in that order.

use crate::error::NavigationError;
use crate::logging::LoggingConfig;
use crate::registry::DEFAULT_SUSPENDED_FRAME_CAP;
use crate::transition::DEFAULT_TRANSITION_MS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavframeConfig {
    /// Navigation policy settings
    #[serde(default)]
    pub navigation: NavigationConfig,

    /// Bundle storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Navigation policy settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Duration applied when a navigation request omits one
    #[serde(default = "default_transition_ms")]
    pub default_transition_ms: u64,

    /// Retained suspended nested frames before LRU eviction kicks in
    #[serde(default = "default_suspended_frame_cap")]
    pub suspended_frame_cap: usize,
}

fn default_transition_ms() -> u64 {
    DEFAULT_TRANSITION_MS
}

fn default_suspended_frame_cap() -> usize {
    DEFAULT_SUSPENDED_FRAME_CAP
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            default_transition_ms: default_transition_ms(),
            suspended_frame_cap: default_suspended_frame_cap(),
        }
    }
}

/// Bundle storage settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the suspend/resume bundle database. Defaults to
    /// the platform data directory.
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolved bundle database path.
    pub fn bundle_db_path(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.join("state"),
            None => crate::store::SledBundleStore::default_path(),
        }
    }
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Layered load: defaults, then the given file (or the user-level file
    /// when none is given), then `NAVFRAME_`-prefixed environment
    /// variables (`NAVFRAME_NAVIGATION__SUSPENDED_FRAME_CAP=8`).
    pub fn load(file: Option<&Path>) -> Result<NavframeConfig, NavigationError> {
        let mut builder = config::Config::builder();

        let path = file
            .map(Path::to_path_buf)
            .or_else(Self::user_config_path)
            .filter(|p| p.exists());
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::with_name(&path.to_string_lossy()).required(false),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix("NAVFRAME").separator("__"),
        );

        builder
            .build()
            .and_then(|merged| merged.try_deserialize())
            .map_err(|e| NavigationError::Config(e.to_string()))
    }

    /// Parse a single TOML file with no environment layering.
    pub fn load_from_file(path: &Path) -> Result<NavframeConfig, NavigationError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| NavigationError::Config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&raw)
            .map_err(|e| NavigationError::Config(format!("invalid config {}: {e}", path.display())))
    }

    /// `$XDG_CONFIG_HOME/navframe/config.toml` (or the platform
    /// equivalent).
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "navframe")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
