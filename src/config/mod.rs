//! Configuration for the status line.
//!
//! - Schema and merge rules in [`schema`]
//! - File loading in [`loader`]
//! - Platform directories in [`paths`]
//!
//! # Example
//!
//! ```
//! use claude_status::config::{load_config_from, Layout};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.json");
//! fs::write(&path, r#"{"layout": "tokens", "github_ttl": 0}"#).unwrap();
//!
//! let config = load_config_from(&path);
//! assert_eq!(config.layout, Layout::Tokens);
//! assert_eq!(config.github_ttl, 60);
//! ```

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::{load_config, load_config_from, resolve_config_path};
pub use paths::{cache_dir, config_dir, config_path, data_dir, default_log_path, CONFIG_ENV};
pub use schema::{
    Config, ConfigFile, Layout, DEFAULT_GITHUB_TTL, DEFAULT_TASKS_TTL, DEFAULT_WORKFLOW,
};
