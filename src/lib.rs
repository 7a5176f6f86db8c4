//! claude-status - cached, colorized status line for coding-assistant sessions.
//!
//! The host pipes a JSON session payload to the binary on every refresh.
//! The status line combines git state, GitHub Actions build status, task
//! tracker counts and transcript token usage. Slow sources are read through
//! a file-backed cache shared by concurrent invocations.
//!
//! # Modules
//!
//! - [`cache`] - Persistent cache with mtime fingerprints and TTLs
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and platform paths
//! - [`error`] - Error types and result aliases
//! - [`git`] - Repository state via the git CLI
//! - [`github`] - GitHub Actions build status
//! - [`render`] - ANSI status line layouts
//! - [`shell`] - Timeout-bounded command execution
//! - [`status`] - Session payload and status data assembly
//! - [`tasks`] - Task tracker backends and provider selection
//! - [`transcript`] - Token usage from session transcripts
//!
//! # Example
//!
//! ```
//! use claude_status::config::Layout;
//! use claude_status::render::{render, Theme};
//! use claude_status::status::StatusData;
//!
//! let data = StatusData {
//!     model: "Opus".to_string(),
//!     dir: "app".to_string(),
//!     git_branch: "main".to_string(),
//!     ..StatusData::default()
//! };
//! let line = render(&data, Layout::Default, &Theme::plain());
//! assert_eq!(line, "[Opus] | 📁 app | 🌿 main");
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod render;
pub mod shell;
pub mod status;
pub mod tasks;
pub mod transcript;

pub use error::{Result, StatusLineError};
