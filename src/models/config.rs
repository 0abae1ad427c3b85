//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Polling behavior settings
    #[serde(default)]
    pub polling: PollingConfig,

    /// Delay settings between rounds, adapters and campaigns
    #[serde(default)]
    pub pacing: PacingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        if !path.as_ref().exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.client.user_agent.trim().is_empty() {
            return Err(AppError::config("client.user_agent is empty"));
        }
        if self.client.timeout_secs == 0 {
            return Err(AppError::config("client.timeout_secs must be > 0"));
        }
        if self.polling.max_pages == 0 {
            return Err(AppError::config("polling.max_pages must be > 0"));
        }
        if self.polling.max_concurrent == 0 {
            return Err(AppError::config("polling.max_concurrent must be > 0"));
        }
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Polling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Result page ceiling per backend
    #[serde(default = "defaults::max_pages")]
    pub max_pages: usize,

    /// Maximum concurrent page fetches within a round
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Optional wall-clock cap per campaign; a campaign past its deadline
    /// stops fetching and reports partial results
    #[serde(default)]
    pub campaign_timeout_secs: Option<u64>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            max_pages: defaults::max_pages(),
            max_concurrent: defaults::max_concurrent(),
            campaign_timeout_secs: None,
        }
    }
}

/// Delay settings between rounds, adapters and campaigns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Pause before each polling round, in milliseconds
    #[serde(default = "defaults::round_delay_ms")]
    pub round_delay_ms: u64,

    /// Upper bound for the per-adapter randomized pause, in milliseconds
    #[serde(default = "defaults::adapter_jitter_max_ms")]
    pub adapter_jitter_max_ms: u64,

    /// Cooldown between two campaigns in a batch, in seconds.
    /// Much longer than the in-campaign delays on purpose.
    #[serde(default = "defaults::campaign_cooldown_secs")]
    pub campaign_cooldown_secs: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            round_delay_ms: defaults::round_delay_ms(),
            adapter_jitter_max_ms: defaults::adapter_jitter_max_ms(),
            campaign_cooldown_secs: defaults::campaign_cooldown_secs(),
        }
    }
}

mod defaults {
    pub fn user_agent() -> String {
        "Mozilla/5.0 (X11; U; Linux i686; en-US) AppleWebKit/532.5 (KHTML, like Gecko) Chrome/4.0.249.43 Safari/532.5".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_pages() -> usize {
        10
    }
    pub fn max_concurrent() -> usize {
        4
    }
    pub fn round_delay_ms() -> u64 {
        250
    }
    pub fn adapter_jitter_max_ms() -> u64 {
        200
    }
    pub fn campaign_cooldown_secs() -> u64 {
        60
    }
}
