//! GitHub Actions build status.

pub mod client;
pub mod status;

pub use client::{resolve_token, resolve_token_with, GitHubClient, API_TIMEOUT, DEFAULT_API_URL};
pub use status::BuildStatus;
