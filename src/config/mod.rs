// src/config/mod.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_DIR: &str = "results-mailer";
pub const SETTINGS_FILE: &str = "settings.ron";
pub const ENV_PREFIX: &str = "RESULTS_MAILER";

/// Application settings, layered from defaults, the settings file and
/// `RESULTS_MAILER_*` environment variables (in that order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    pub request_timeout_secs: u64,
    pub poll_interval_secs: u64,
    pub email_batch_size: u32,
    pub max_upload_bytes: u64,
    pub notification_timeout_secs: u64,
    pub banner_timeout_ms: u64,
    pub banner_fade_ms: u64,
    pub reload_delay_ms: u64,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 300,
            poll_interval_secs: 30,
            email_batch_size: 50,
            max_upload_bytes: 16 * 1024 * 1024,
            notification_timeout_secs: 5,
            banner_timeout_ms: 5000,
            banner_fade_ms: 500,
            reload_delay_ms: 1000,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(Self::settings_path().as_deref())
    }

    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.to_path_buf()).required(false));
        }

        builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to assemble configuration")?
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_secs(self.notification_timeout_secs)
    }

    pub fn banner_timeout(&self) -> Duration {
        Duration::from_millis(self.banner_timeout_ms)
    }

    pub fn banner_fade(&self) -> Duration {
        Duration::from_millis(self.banner_fade_ms)
    }

    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms)
    }
}
