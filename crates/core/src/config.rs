//! # Launchpad Configuration
//!
//! Resolution order: built-in defaults, then `.launchpad/config.json` in the
//! runtime directory (if present), then environment overrides.
//!
//! | Variable                 | Field                  |
//! |--------------------------|------------------------|
//! | `LAUNCHPAD_LAUNCHES_URL` | `launches_url`         |
//! | `LAUNCHPAD_ROCKETS_URL`  | `rockets_url`          |
//! | `LAUNCHPAD_TIMEOUT_SECS` | `request_timeout_secs` |
//! | `LAUNCHPAD_DB_PATH`      | `database_path`        |

use crate::error::ConfigError;
use crate::query::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::search::DEFAULT_QUIET_PERIOD;
use crate::state::io::get_runtime_path;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LAUNCHES_URL: &str = "https://api.spacexdata.com/v4/launches";
pub const DEFAULT_ROCKETS_URL: &str = "https://api.spacexdata.com/v4/rockets";

const CONFIG_FILE: &str = "config.json";

/// Configuration for the catalog pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LaunchpadConfig {
    /// Endpoint returning the launch array
    pub launches_url: String,
    /// Endpoint returning the rocket array
    pub rockets_url: String,
    /// Per-request timeout for catalog retrieval
    pub request_timeout_secs: u64,
    /// SQLite database holding favorites (default: `<runtime>/launchpad.db`)
    pub database_path: Option<PathBuf>,
    /// Initial page size
    pub items_per_page: usize,
    /// Search debounce quiet period
    pub search_quiet_period_ms: u64,
}

impl Default for LaunchpadConfig {
    fn default() -> Self {
        Self {
            launches_url: DEFAULT_LAUNCHES_URL.to_string(),
            rockets_url: DEFAULT_ROCKETS_URL.to_string(),
            request_timeout_secs: 10,
            database_path: None,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            search_quiet_period_ms: DEFAULT_QUIET_PERIOD.as_millis() as u64,
        }
    }
}

impl LaunchpadConfig {
    /// Load config file and apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(get_runtime_path().join(CONFIG_FILE));
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file, falling back to defaults if absent or unparseable
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), "Ignoring unparseable config: {}", e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Apply overrides from a variable lookup (the environment in production)
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("LAUNCHPAD_LAUNCHES_URL") {
            self.launches_url = url;
        }
        if let Some(url) = lookup("LAUNCHPAD_ROCKETS_URL") {
            self.rockets_url = url;
        }
        if let Some(value) = lookup("LAUNCHPAD_TIMEOUT_SECS") {
            self.request_timeout_secs =
                value.parse().map_err(|_| ConfigError::InvalidEnv {
                    key: "LAUNCHPAD_TIMEOUT_SECS",
                    value,
                })?;
        }
        if let Some(path) = lookup("LAUNCHPAD_DB_PATH") {
            self.database_path = Some(PathBuf::from(path));
        }
        Ok(())
    }

    /// Reject settings that would break pagination or retrieval
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items_per_page == 0 {
            return Err(ConfigError::Invalid(
                "items_per_page must be greater than 0".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn search_quiet_period(&self) -> Duration {
        Duration::from_millis(self.search_quiet_period_ms)
    }

    /// Effective favorites database path
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| get_runtime_path().join("launchpad.db"))
    }
}
