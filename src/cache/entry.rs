//! Cache document and entry types.
//!
//! The whole cache lives in one JSON document. Git entries carry the
//! modification time of the file that fingerprints them; task entries are
//! keyed by working directory and only carry their cache time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::git::DiffStats;
use crate::github::BuildStatus;
use crate::tasks::TaskStats;

/// A cached string value fingerprinted by a file's mtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedValue {
    pub value: String,
    /// Fingerprint file mtime in nanoseconds since the epoch.
    pub file_mtime: i64,
    pub cached_at: DateTime<Utc>,
}

/// Cached git diff statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedDiffStats {
    pub stats: DiffStats,
    pub file_mtime: i64,
    pub cached_at: DateTime<Utc>,
}

/// Cached CI build status, scoped to one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedGitHubBuild {
    pub status: BuildStatus,
    pub file_mtime: i64,
    pub cached_at: DateTime<Utc>,
    pub branch: String,
}

/// Cached task statistics for one working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedTaskStats {
    pub stats: TaskStats,
    pub cached_at: DateTime<Utc>,
}

/// Cached next-task title for one working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedNextTask {
    pub title: String,
    pub cached_at: DateTime<Utc>,
}

/// The cache file on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<CachedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_status: Option<CachedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_diff_stats: Option<CachedDiffStats>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_build: Option<CachedGitHubBuild>,

    /// Keyed by working directory.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub task_stats_map: BTreeMap<String, CachedTaskStats>,

    /// Keyed by working directory.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub next_task_map: BTreeMap<String, CachedNextTask>,
}

impl CacheDocument {
    /// Drop per-workdir entries cached more than `max_age` before `now`.
    ///
    /// Returns the number of entries removed.
    pub fn evict_older_than(&mut self, now: DateTime<Utc>, max_age: Duration) -> usize {
        let before = self.task_stats_map.len() + self.next_task_map.len();

        self.task_stats_map
            .retain(|_, entry| now.signed_duration_since(entry.cached_at) <= max_age);
        self.next_task_map
            .retain(|_, entry| now.signed_duration_since(entry.cached_at) <= max_age);

        before - (self.task_stats_map.len() + self.next_task_map.len())
    }

    /// True when nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.git_branch.is_none()
            && self.git_status.is_none()
            && self.git_diff_stats.is_none()
            && self.github_build.is_none()
            && self.task_stats_map.is_empty()
            && self.next_task_map.is_empty()
    }
}
