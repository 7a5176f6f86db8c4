//! Configuration file loading.
//!
//! Loading never fails: a missing file yields defaults silently, an
//! unreadable or invalid one yields defaults and an error log.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::paths::{config_path, CONFIG_ENV};
use super::schema::{Config, ConfigFile};

/// Config file to read: explicit path, then `CLAUDE_STATUS_CONFIG`, then the
/// platform default.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => config_path(),
    }
}

/// Load configuration from the resolved location.
pub fn load_config(explicit: Option<&Path>) -> Config {
    load_config_from(&resolve_config_path(explicit))
}

/// Load configuration from `path`, merged over defaults.
pub fn load_config_from(path: &Path) -> Config {
    let config = Config::default();

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return config,
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "failed to read config");
            return config;
        }
    };

    match serde_json::from_str::<ConfigFile>(&content) {
        Ok(file) => config.merge(file),
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "invalid config file");
            config
        }
    }
}
