//! # Client Configuration
//!
//! Configuration for the data-sync layer.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MEDSYNC_SCRIPT_URL=https://...                                     │
//! │     MEDSYNC_REQUEST_TIMEOUT_SECS=30                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/medsync/client.toml (Linux)                              │
//! │     ~/Library/Application Support/com.medsync.dashboard (macOS)        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     bundled endpoint URL, 30s timeout, 5min dashboard refresh          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The endpoint URL is fixed once the configuration is loaded: nothing in
//! the layer rewrites it at runtime.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{SyncError, SyncResult};

/// Endpoint URL compiled in as the last-resort default.
pub const DEFAULT_SCRIPT_URL: &str = "https://script.medsync.example/api/exec";

fn default_request_timeout() -> u64 {
    30
}

fn default_refresh_interval() -> u64 {
    300
}

// =============================================================================
// Endpoint Settings
// =============================================================================

/// Settings for the single script endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointSettings {
    /// The one URL every action is POSTed to.
    pub script_url: String,

    /// Client-side request timeout (seconds), distinct from connect/DNS
    /// failure.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        EndpointSettings {
            script_url: DEFAULT_SCRIPT_URL.to_string(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

// =============================================================================
// Refresh Settings
// =============================================================================

/// Settings for the periodic dashboard refresher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshSettings {
    /// Fixed interval between dashboard re-fetches (seconds).
    /// No backoff, no jitter.
    #[serde(default = "default_refresh_interval")]
    pub interval_secs: u64,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        RefreshSettings {
            interval_secs: default_refresh_interval(),
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete configuration for the data-sync layer.
///
/// ## Example Config File
/// ```toml
/// [endpoint]
/// script_url = "https://script.medsync.example/api/exec"
/// request_timeout_secs = 30
///
/// [refresh]
/// interval_secs = 300
///
/// # Optional override; defaults to the platform data dir.
/// session_dir = "/var/lib/medsync"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Script endpoint settings.
    #[serde(default)]
    pub endpoint: EndpointSettings,

    /// Dashboard refresh settings.
    #[serde(default)]
    pub refresh: RefreshSettings,

    /// Directory holding the durable session file. Defaults to the
    /// platform data dir when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Creates a config with bundled defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (client.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SyncResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> SyncResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SyncError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SyncError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| SyncError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SyncResult<()> {
        let url = Url::parse(&self.endpoint.script_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(SyncError::InvalidUrl(format!(
                "Script URL must be http or https, got: {}",
                self.endpoint.script_url
            )));
        }

        if self.endpoint.request_timeout_secs == 0 {
            return Err(SyncError::InvalidConfig(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.refresh.interval_secs == 0 {
            return Err(SyncError::InvalidConfig(
                "refresh interval_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("MEDSYNC_SCRIPT_URL") {
            debug!(url = %url, "Overriding script URL from environment");
            self.endpoint.script_url = url;
        }

        if let Ok(timeout) = std::env::var("MEDSYNC_REQUEST_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse::<u64>() {
                self.endpoint.request_timeout_secs = t;
            }
        }

        if let Ok(interval) = std::env::var("MEDSYNC_REFRESH_INTERVAL_SECS") {
            if let Ok(i) = interval.parse::<u64>() {
                self.refresh.interval_secs = i;
            }
        }

        if let Ok(dir) = std::env::var("MEDSYNC_SESSION_DIR") {
            self.session_dir = Some(PathBuf::from(dir));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "medsync", "dashboard")
            .map(|dirs| dirs.config_dir().join("client.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the script endpoint URL.
    pub fn script_url(&self) -> &str {
        &self.endpoint.script_url
    }

    /// Returns the request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.endpoint.request_timeout_secs)
    }

    /// Returns the dashboard refresh interval as a `Duration`.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh.interval_secs)
    }

    /// Returns the directory for durable session state.
    pub fn session_dir(&self) -> Option<PathBuf> {
        self.session_dir.clone().or_else(|| {
            directories::ProjectDirs::from("com", "medsync", "dashboard")
                .map(|dirs| dirs.data_dir().to_path_buf())
        })
    }
}
