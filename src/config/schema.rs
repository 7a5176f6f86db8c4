//! Configuration schema.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::paths::default_log_path;

/// Workflow tracked for CI status unless configured otherwise.
pub const DEFAULT_WORKFLOW: &str = "build_and_test";

/// Default CI status TTL in seconds.
pub const DEFAULT_GITHUB_TTL: u64 = 60;

/// Default task tracker TTL in seconds.
pub const DEFAULT_TASKS_TTL: u64 = 5;

/// Arrangement of segments in the rendered status line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Model, directory, git, CI, context and version, plus a task line.
    #[default]
    Default,
    /// Token counters instead of git details.
    Tokens,
    /// Task summary inline on a single line.
    Tasks,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Default => "default",
            Self::Tokens => "tokens",
            Self::Tasks => "tasks",
        })
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "default" => Ok(Self::Default),
            "tokens" => Ok(Self::Tokens),
            "tasks" => Ok(Self::Tasks),
            other => Err(format!("unknown layout '{other}'")),
        }
    }
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub layout: Layout,
    pub github_workflow: String,
    /// Seconds a CI status stays cached.
    pub github_ttl: u64,
    /// Seconds task statistics stay cached.
    pub tasks_ttl: u64,
    /// Append every render to the journal file.
    pub logging_enabled: bool,
    pub log_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: Layout::Default,
            github_workflow: DEFAULT_WORKFLOW.to_string(),
            github_ttl: DEFAULT_GITHUB_TTL,
            tasks_ttl: DEFAULT_TASKS_TTL,
            logging_enabled: false,
            log_path: default_log_path(),
        }
    }
}

impl Config {
    pub fn github_ttl(&self) -> Duration {
        Duration::from_secs(self.github_ttl)
    }

    pub fn tasks_ttl(&self) -> Duration {
        Duration::from_secs(self.tasks_ttl)
    }

    /// Overlay values from a config file. Empty and zero values keep the
    /// current setting; `logging_enabled` applies whenever present.
    pub fn merge(mut self, file: ConfigFile) -> Self {
        if let Some(layout) = file.layout.as_deref().filter(|l| !l.trim().is_empty()) {
            match layout.parse() {
                Ok(layout) => self.layout = layout,
                Err(err) => tracing::warn!(error = %err, "ignoring layout"),
            }
        }
        if let Some(workflow) = file.github_workflow.filter(|w| !w.is_empty()) {
            self.github_workflow = workflow;
        }
        if let Some(ttl) = positive(file.github_ttl) {
            self.github_ttl = ttl;
        }
        if let Some(ttl) = positive(file.tasks_ttl) {
            self.tasks_ttl = ttl;
        }
        if let Some(enabled) = file.logging_enabled {
            self.logging_enabled = enabled;
        }
        if let Some(path) = file.log_path.filter(|p| !p.as_os_str().is_empty()) {
            self.log_path = path;
        }
        self
    }
}

fn positive(ttl: Option<i64>) -> Option<u64> {
    ttl.and_then(|t| u64::try_from(t).ok()).filter(|t| *t > 0)
}

/// On-disk configuration; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub layout: Option<String>,
    pub github_workflow: Option<String>,
    pub github_ttl: Option<i64>,
    pub tasks_ttl: Option<i64>,
    pub logging_enabled: Option<bool>,
    pub log_path: Option<PathBuf>,
}
