use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use dashboard_stream::SubscribeSettings;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILENAME: &str = "dashboard.ron";
const CONFIG_PATH_VAR: &str = "DASHBOARD_CONFIG";
const STREAM_URL_VAR: &str = "DASHBOARD_STREAM_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub stream_url: String,
    pub connect_timeout_secs: u64,
    pub max_event_bytes: usize,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
    pub log_level: String,
    /// Print the page after every render pass.
    pub present: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            stream_url: "http://127.0.0.1:5000/status_stream".to_string(),
            connect_timeout_secs: 10,
            max_event_bytes: 1024 * 1024,
            log_destination: LogDestination::File,
            log_file: PathBuf::from("./dashboard.log"),
            log_level: "info".to_string(),
            present: true,
        }
    }
}

impl DashboardConfig {
    pub fn subscribe_settings(&self) -> SubscribeSettings {
        SubscribeSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            max_event_bytes: self.max_event_bytes,
        }
    }

    pub fn level(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(STREAM_URL_VAR).filter(|url| !url.trim().is_empty()) {
            self.stream_url = url;
        }
    }
}

/// Config path: first CLI argument, then `$DASHBOARD_CONFIG`, then `./dashboard.ron`.
pub fn resolve_path(
    mut args: impl Iterator<Item = String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> PathBuf {
    args.next()
        .or_else(|| lookup(CONFIG_PATH_VAR))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME))
}

/// Loads the config at `path`. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<Option<DashboardConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
