//! kt ticket tracker backend (`.ktickets`).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::registry::{ProviderRegistry, PRIORITY_KT};
use super::types::{has_marker_dir, TaskProvider, TaskStats};
use crate::error::{Result, StatusLineError};
use crate::shell::{Commander, SystemCommander, TASK_TIMEOUT};

const MARKER_DIR: &str = ".ktickets";

/// Register the kt backend.
pub fn register(registry: &mut ProviderRegistry) {
    registry.register(PRIORITY_KT, Box::new(|workdir| Box::new(Client::new(workdir))));
}

#[derive(Debug, Deserialize)]
struct StatsJson {
    #[serde(default)]
    open: u64,
    #[serde(default)]
    in_progress: u64,
    #[serde(default)]
    closed: u64,
    #[serde(default)]
    total: u64,
}

#[derive(Debug, Deserialize)]
struct Ticket {
    #[serde(default)]
    title: String,
}

/// kt client bound to a working directory.
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

    /// Number of tickets listed by `kt <list> --json`, zero on any failure.
    fn count(&self, list: &str) -> u64 {
        self.commander
            .output("kt", &[list, "--json"])
            .ok()
            .and_then(|out| serde_json::from_str::<Vec<Ticket>>(&out).ok())
            .map_or(0, |tickets| tickets.len() as u64)
    }
}

impl TaskProvider for Client {
    fn name(&self) -> &str {
        "kt"
    }

    fn available(&self) -> bool {
        has_marker_dir(&self.workdir, MARKER_DIR, "kt")
    }

    fn stats(&self) -> Result<TaskStats> {
        let out = self.commander.output("kt", &["stats", "--json"])?;
        let raw: StatsJson =
            serde_json::from_str(&out).map_err(|e| StatusLineError::parse("kt stats output", e))?;

        Ok(TaskStats {
            total_issues: raw.total,
            open_issues: raw.open,
            in_progress_issues: raw.in_progress,
            closed_issues: raw.closed,
            ready_issues: self.count("ready"),
            blocked_issues: self.count("blocked"),
        })
    }

    fn next_task(&self) -> Result<String> {
        let Ok(out) = self.commander.output("kt", &["ready", "--json"]) else {
            return Ok(String::new());
        };
        let tickets: Vec<Ticket> =
            serde_json::from_str(&out).map_err(|e| StatusLineError::parse("kt ready output", e))?;
        Ok(tickets.into_iter().next().map(|t| t.title).unwrap_or_default())
    }
}
