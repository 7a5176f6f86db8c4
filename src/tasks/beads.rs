//! beads issue tracker backend (`.beads`).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::registry::{ProviderRegistry, PRIORITY_BEADS};
use super::types::{has_marker_dir, TaskProvider, TaskStats};
use crate::error::{Result, StatusLineError};
use crate::shell::{Commander, SystemCommander, TASK_TIMEOUT};

const MARKER_DIR: &str = ".beads";

/// Register the beads backend.
pub fn register(registry: &mut ProviderRegistry) {
    registry.register(PRIORITY_BEADS, Box::new(|workdir| Box::new(Client::new(workdir))));
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(default)]
    summary: TaskStats,
}

#[derive(Debug, Deserialize)]
struct Issue {
    #[serde(default)]
    title: String,
}

/// beads client bound to a working directory.
pub struct Client {
    workdir: PathBuf,
    commander: Box<dyn Commander>,
}

impl Client {
    pub fn new(workdir: &Path) -> Self {
        Self::with_commander(workdir, Box::new(SystemCommander::new(workdir, TASK_TIMEOUT)))
    }

    pub fn with_commander(workdir: &Path, commander: Box<dyn Commander>) -> Self {
        Self {
            workdir: workdir.to_path_buf(),
            commander,
        }
    }
}

impl TaskProvider for Client {
    fn name(&self) -> &str {
        "beads"
    }

    fn available(&self) -> bool {
        has_marker_dir(&self.workdir, MARKER_DIR, "beads")
    }

    fn stats(&self) -> Result<TaskStats> {
        let out = self.commander.output("bd", &["stats", "--json"])?;
        let response: StatsResponse =
            serde_json::from_str(&out).map_err(|e| StatusLineError::parse("bd stats output", e))?;
        Ok(response.summary)
    }

    fn next_task(&self) -> Result<String> {
        let out = self.commander.output("bd", &["ready", "--json"])?;
        let issues: Vec<Issue> =
            serde_json::from_str(&out).map_err(|e| StatusLineError::parse("bd ready output", e))?;
        Ok(issues.into_iter().next().map(|i| i.title).unwrap_or_default())
    }
}
