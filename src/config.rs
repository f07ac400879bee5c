//! Application configuration.
//!
//! Configuration is stored in `config.yaml` under the helpdesk config
//! directory and includes:
//! - Backend URL and anonymous API key
//! - Dashboard timing (poll interval, refresh indicator hold, splash hold)
//! - The status transition policy
//!
//! `HELPDESK_URL` and `HELPDESK_ANON_KEY` take precedence over the file.

use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HelpdeskError, Result};
use crate::lifecycle::TransitionPolicy;
use crate::paths;

pub const URL_ENV: &str = "HELPDESK_URL";
pub const ANON_KEY_ENV: &str = "HELPDESK_ANON_KEY";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub transitions: TransitionPolicy,
}

/// Hosted backend connection settings
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anon_key: Option<String>,
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("anon_key", &self.anon_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Dashboard timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Seconds between background refreshes (default: 30)
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Minimum time the refresh indicator stays visible after a manual refresh (default: 800)
    #[serde(default = "default_refresh_hold_ms")]
    pub refresh_hold_ms: u64,

    /// How long the splash screen stays up before routing (default: 1500)
    #[serde(default = "default_splash_ms")]
    pub splash_ms: u64,
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_refresh_hold_ms() -> u64 {
    800
}

fn default_splash_ms() -> u64 {
    1500
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            refresh_hold_ms: default_refresh_hold_ms(),
            splash_ms: default_splash_ms(),
        }
    }
}

impl DashboardConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn refresh_hold(&self) -> Duration {
        Duration::from_millis(self.refresh_hold_ms)
    }

    pub fn splash_hold(&self) -> Duration {
        Duration::from_millis(self.splash_ms)
    }
}

/// Resolved backend endpoint, ready for the HTTP clients
#[derive(Clone)]
pub struct Backend {
    pub url: url::Url,
    pub anon_key: String,
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backend")
            .field("url", &self.url.as_str())
            .field("anon_key", &"[REDACTED]")
            .finish()
    }
}

/// Keys accepted by `helpdesk config set/get`
pub const CONFIG_KEYS: &[&str] = &[
    "backend.url",
    "backend.anon_key",
    "dashboard.poll_interval_secs",
    "dashboard.refresh_hold_ms",
    "dashboard.splash_ms",
    "transitions",
];

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        Ok(paths::config_dir()?.join("config.yaml"))
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Backend URL from environment or config file
    pub fn backend_url(&self) -> Option<String> {
        if let Ok(url) = env::var(URL_ENV)
            && !url.is_empty()
        {
            return Some(url);
        }
        self.backend.url.clone()
    }

    /// Anonymous API key from environment or config file
    pub fn anon_key(&self) -> Option<String> {
        if let Ok(key) = env::var(ANON_KEY_ENV)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.backend.anon_key.clone()
    }

    /// Resolve the backend endpoint, failing with a hint when it is not configured.
    pub fn backend(&self) -> Result<Backend> {
        let raw_url = self.backend_url().ok_or_else(|| {
            HelpdeskError::Config(format!(
                "backend URL not configured. Set {URL_ENV} or run: helpdesk config set backend.url <url>"
            ))
        })?;
        let anon_key = self.anon_key().ok_or_else(|| {
            HelpdeskError::Config(format!(
                "backend key not configured. Set {ANON_KEY_ENV} or run: helpdesk config set backend.anon_key <key>"
            ))
        })?;

        let url = url::Url::parse(&raw_url)
            .map_err(|e| HelpdeskError::Config(format!("invalid backend URL '{raw_url}': {e}")))?;
        if url.cannot_be_a_base() {
            return Err(HelpdeskError::Config(format!(
                "invalid backend URL '{raw_url}': expected an http(s) URL"
            )));
        }

        Ok(Backend { url, anon_key })
    }

    /// Set a value by dotted key
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "backend.url" => self.backend.url = Some(value.to_string()),
            "backend.anon_key" => self.backend.anon_key = Some(value.to_string()),
            "dashboard.poll_interval_secs" => {
                self.dashboard.poll_interval_secs = parse_number(key, value)?;
            }
            "dashboard.refresh_hold_ms" => {
                self.dashboard.refresh_hold_ms = parse_number(key, value)?;
            }
            "dashboard.splash_ms" => self.dashboard.splash_ms = parse_number(key, value)?,
            "transitions" => self.transitions = value.parse()?,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// Get a value by dotted key. The anon key is never returned in full.
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        let value = match key {
            "backend.url" => self.backend_url(),
            "backend.anon_key" => self.anon_key().map(|k| mask_sensitive_value(&k)),
            "dashboard.poll_interval_secs" => Some(self.dashboard.poll_interval_secs.to_string()),
            "dashboard.refresh_hold_ms" => Some(self.dashboard.refresh_hold_ms.to_string()),
            "dashboard.splash_ms" => Some(self.dashboard.splash_ms.to_string()),
            "transitions" => Some(self.transitions.to_string()),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value
        .parse()
        .map_err(|_| HelpdeskError::Config(format!("'{key}' expects a whole number, got '{value}'")))
}

fn unknown_key(key: &str) -> HelpdeskError {
    HelpdeskError::Config(format!(
        "unknown config key '{}'. Valid keys: {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

/// Mask a sensitive value by showing only the first 2 and last 2 characters
pub fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}
