//! Task provider trait and statistics.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Issue counts reported by a task tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskStats {
    pub total_issues: u64,
    pub open_issues: u64,
    pub in_progress_issues: u64,
    pub closed_issues: u64,
    pub blocked_issues: u64,
    pub ready_issues: u64,
}

/// A task tracking backend bound to one working directory.
pub trait TaskProvider {
    /// Short name shown in the status line (e.g. `kt`).
    fn name(&self) -> &str;

    /// Whether this backend is active for its working directory.
    fn available(&self) -> bool;

    /// Current issue counts.
    fn stats(&self) -> Result<TaskStats>;

    /// Title of the next ready task, or empty when there is none.
    fn next_task(&self) -> Result<String>;
}

/// Whether `workdir` contains the marker directory `marker`.
pub fn has_marker_dir(workdir: &Path, marker: &str, provider: &str) -> bool {
    let path = workdir.join(marker);
    let found = path.is_dir();
    if !found {
        tracing::debug!(provider, path = %path.display(), "task tracker not available");
    }
    found
}
