//! Git collaborator: repository discovery, working tree state and remotes.

pub mod diff;
pub mod remote;
pub mod repo;

pub use diff::{classify_porcelain, count_changes, parse_shortstat, DiffStats};
pub use remote::{parse_github_repo, GitHubRepo};
pub use repo::GitRepo;
