//! Collaborator seams consumed by the status builder.

use std::path::PathBuf;

use crate::error::Result;
use crate::git::{DiffStats, GitRepo};
use crate::github::{BuildStatus, GitHubClient};

/// Version control state for one working directory.
pub trait Repository {
    fn branch(&self) -> Result<String>;
    fn status(&self) -> Result<String>;
    fn diff_stats(&self) -> Result<DiffStats>;
    fn remote_url(&self) -> Result<String>;

    /// File whose mtime fingerprints the branch.
    fn head_path(&self) -> PathBuf;
    /// File whose mtime fingerprints status and diff stats.
    fn index_path(&self) -> PathBuf;
    /// Ref file of `branch`, fingerprinting its CI status.
    fn ref_path(&self, branch: &str) -> PathBuf;
}

impl Repository for GitRepo {
    fn branch(&self) -> Result<String> {
        GitRepo::branch(self)
    }

    fn status(&self) -> Result<String> {
        GitRepo::status(self)
    }

    fn diff_stats(&self) -> Result<DiffStats> {
        GitRepo::diff_stats(self)
    }

    fn remote_url(&self) -> Result<String> {
        GitRepo::remote_url(self)
    }

    fn head_path(&self) -> PathBuf {
        GitRepo::head_path(self)
    }

    fn index_path(&self) -> PathBuf {
        GitRepo::index_path(self)
    }

    fn ref_path(&self, branch: &str) -> PathBuf {
        GitRepo::ref_path(self, branch)
    }
}

/// CI build status lookup.
pub trait BuildStatusSource {
    fn build_status(&self, owner: &str, repo: &str, branch: &str) -> Result<BuildStatus>;
}

impl BuildStatusSource for GitHubClient {
    fn build_status(&self, owner: &str, repo: &str, branch: &str) -> Result<BuildStatus> {
        GitHubClient::build_status(self, owner, repo, branch)
    }
}
