//! Error types for status line operations.
//!
//! This module defines [`StatusLineError`], the error type shared by every
//! collaborator the status builder calls, and a [`Result`] type alias.
//!
//! # Error Handling Strategy
//!
//! - Collaborator failures (git, GitHub, task trackers) surface as
//!   `StatusLineError` and are downgraded to empty fields by the builder
//! - Construction misuse ([`StatusLineError::MissingConfig`]) is the only
//!   error that reaches the caller of the render path
//! - `anyhow::Error` (via `StatusLineError::Other`) covers the CLI plumbing

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Core error type for status line operations.
#[derive(Debug, Error)]
pub enum StatusLineError {
    /// The status builder was assembled without a configuration.
    #[error("Configuration must be provided before building the status line")]
    MissingConfig,

    /// Working directory is not inside a git repository.
    #[error("Not a git repository: {path}")]
    NotARepository { path: PathBuf },

    /// External command exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// External command did not finish in time and was killed.
    #[error("Command timed out after {timeout:?}: {command}")]
    CommandTimeout { command: String, timeout: Duration },

    /// GitHub API answered with a non-success status.
    #[error("GitHub API request to {url} returned {status}")]
    GitHubApi { url: String, status: u16 },

    /// No GitHub token could be resolved.
    #[error("GitHub token is empty or unavailable")]
    MissingToken,

    /// Configured workflow does not exist in the repository.
    #[error("Workflow '{name}' not found")]
    WorkflowNotFound { name: String },

    /// Workflow has never run on the requested branch.
    #[error("No workflow runs found for branch '{branch}'")]
    NoWorkflowRuns { branch: String },

    /// Output of an external tool could not be understood.
    #[error("Failed to parse {what}: {message}")]
    Parse { what: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error wrapper.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error wrapper.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StatusLineError {
    /// Build a [`StatusLineError::Parse`] from any displayable cause.
    pub fn parse(what: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::Parse {
            what: what.into(),
            message: cause.to_string(),
        }
    }
}

/// Result type alias for status line operations.
pub type Result<T> = std::result::Result<T, StatusLineError>;
