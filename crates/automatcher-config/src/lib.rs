// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveTime;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// Base unit of the quadratic retry backoff.
    pub backoff_unit_ms: u64,
    pub proxy: Option<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            max_retries: 3,
            backoff_unit_ms: 1000,
            proxy: None,
        }
    }
}

impl NetworkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn backoff_unit(&self) -> Duration {
        Duration::from_millis(self.backoff_unit_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicBrainzConfig {
    pub host: String,
    /// Full API root, e.g. `http://localhost:5000/ws/2`. Takes precedence over `host`.
    pub base_url: Option<String>,
    pub rate_limit_interval_ms: u64,
}

impl Default for MusicBrainzConfig {
    fn default() -> Self {
        Self {
            host: "musicbrainz.org".to_string(),
            base_url: None,
            rate_limit_interval_ms: 1000,
        }
    }
}

impl MusicBrainzConfig {
    pub fn api_root(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}/ws/2", self.host),
        }
    }

    pub fn rate_limit_interval(&self) -> Duration {
        Duration::from_millis(self.rate_limit_interval_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Memory,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub max_capacity: u64,
    /// Local wall-clock time (`HH:MM`) at which every cached entry expires.
    pub daily_expiry: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            max_capacity: 10_000,
            daily_expiry: "18:00".to_string(),
        }
    }
}

impl CacheConfig {
    pub fn daily_expiry_time(&self) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(self.daily_expiry.trim(), "%H:%M")
            .with_context(|| format!("invalid cache.daily_expiry '{}'", self.daily_expiry))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub musicbrainz: MusicBrainzConfig,
    pub cache: CacheConfig,
    pub telemetry: TelemetryConfig,
}

/// Load configuration from defaults, optional TOML file, and environment overrides (prefix: AUTOMATCHER_).
pub fn load(config_path: Option<&Path>) -> Result<AppConfig> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("AUTOMATCHER_").split("__"));

    let config: AppConfig = figment.extract()?;
    config.cache.daily_expiry_time()?;
    info!(target: "config", "configuration loaded");
    Ok(config)
}
