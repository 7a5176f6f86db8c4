//! Flat record handed to the renderer.

use crate::git::DiffStats;
use crate::github::BuildStatus;
use crate::render::Color;
use crate::tasks::TaskStats;
use crate::transcript::{ContextWindow, TokenMetrics};

/// Everything one status line can show. Absent sources leave their fields
/// empty or zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusData {
    pub prefix: String,
    pub prefix_color: Color,
    pub model: String,
    /// Basename of the workspace directory.
    pub dir: String,
    pub version: String,

    pub git_branch: String,
    /// `±N` for a dirty tree, empty when clean.
    pub git_status: String,
    pub git_additions: u64,
    pub git_deletions: u64,
    pub git_new_files: u64,
    pub git_modified_files: u64,
    pub git_deleted_files: u64,
    pub git_unstaged_files: u64,
    pub github_status: Option<BuildStatus>,

    pub tokens_input: u64,
    pub tokens_output: u64,
    pub tokens_cached: u64,
    pub tokens_total: u64,
    pub context_length: u64,
    pub context_pct: f64,
    pub context_pct_usable: f64,

    /// A task tracker was detected and answered.
    pub has_tasks: bool,
    pub task_provider: String,
    pub tasks_total: u64,
    pub tasks_open: u64,
    pub tasks_ready: u64,
    pub tasks_in_progress: u64,
    pub tasks_blocked: u64,
    pub tasks_next_task: String,
}

impl StatusData {
    pub(crate) fn apply_diff_stats(&mut self, stats: &DiffStats) {
        self.git_additions = stats.additions;
        self.git_deletions = stats.deletions;
        self.git_new_files = stats.new_files;
        self.git_modified_files = stats.modified_files;
        self.git_deleted_files = stats.deleted_files;
        self.git_unstaged_files = stats.unstaged_files;
    }

    pub(crate) fn apply_tokens(&mut self, metrics: &TokenMetrics, window: ContextWindow) {
        self.tokens_input = metrics.input_tokens;
        self.tokens_output = metrics.output_tokens;
        self.tokens_cached = metrics.cached_tokens;
        self.tokens_total = metrics.total_tokens;
        self.context_length = metrics.context_length;
        self.context_pct = metrics.context_percentage(window);
        self.context_pct_usable = metrics.context_percentage_usable(window);
    }

    pub(crate) fn apply_task_stats(&mut self, provider: &str, stats: &TaskStats) {
        self.has_tasks = true;
        self.task_provider = provider.to_string();
        self.tasks_total = stats.total_issues;
        self.tasks_open = stats.open_issues;
        self.tasks_ready = stats.ready_issues;
        self.tasks_in_progress = stats.in_progress_issues;
        self.tasks_blocked = stats.blocked_issues;
    }

    /// Any per-file change counter is set.
    pub fn has_file_changes(&self) -> bool {
        self.git_new_files > 0
            || self.git_modified_files > 0
            || self.git_deleted_files > 0
            || self.git_unstaged_files > 0
    }
}
