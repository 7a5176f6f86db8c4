//! Platform directories for configuration, cache and logs.
//!
//! Resolved through the `dirs` crate, so XDG variables are honoured on Linux.

use std::path::PathBuf;

const APP_NAME: &str = "claude-status";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "CLAUDE_STATUS_CONFIG";

/// `<config_dir>/claude-status`
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// `<cache_dir>/claude-status`
pub fn cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// `<data_dir>/claude-status`
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default config file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Default status line journal path.
pub fn default_log_path() -> PathBuf {
    data_dir().join("status_line.json")
}
