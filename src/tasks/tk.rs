//! tk ticket tracker backend (`.tickets`).
//!
//! `tk query` prints one JSON ticket per line; counts are derived locally
//! from ticket status and dependencies.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::registry::{ProviderRegistry, PRIORITY_TK};
use super::types::{has_marker_dir, TaskProvider, TaskStats};
use crate::error::{Result, StatusLineError};
use crate::shell::{Commander, SystemCommander, TASK_TIMEOUT};

const MARKER_DIR: &str = ".tickets";

/// Register the tk backend.
pub fn register(registry: &mut ProviderRegistry) {
    registry.register(PRIORITY_TK, Box::new(|workdir| Box::new(Client::new(workdir))));
}

#[derive(Debug, Clone, Deserialize)]
struct Ticket {
    #[serde(default)]
    id: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    deps: Vec<String>,
}

impl Ticket {
    fn is_active(&self) -> bool {
        self.status == "open" || self.status == "in_progress"
    }
}

fn parse_jsonl(output: &str) -> Result<Vec<Ticket>> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line).map_err(|e| StatusLineError::parse("tk query output", e))
        })
        .collect()
}

/// Ready: active with every known dependency closed.
/// Blocked: active with a known dependency that isn't closed.
/// Dependencies on unknown ids are ignored.
fn compute_stats(tickets: &[Ticket]) -> TaskStats {
    let status_by_id: HashMap<&str, &str> = tickets
        .iter()
        .map(|t| (t.id.as_str(), t.status.as_str()))
        .collect();

    let mut stats = TaskStats {
        total_issues: tickets.len() as u64,
        ..TaskStats::default()
    };

    for ticket in tickets {
        match ticket.status.as_str() {
            "open" => stats.open_issues += 1,
            "in_progress" => stats.in_progress_issues += 1,
            "closed" => stats.closed_issues += 1,
            _ => {}
        }

        if !ticket.is_active() {
            continue;
        }

        let blocked = ticket.deps.iter().any(|dep| {
            status_by_id
                .get(dep.as_str())
                .is_some_and(|status| *status != "closed")
        });
        if blocked {
            stats.blocked_issues += 1;
        } else {
            stats.ready_issues += 1;
        }
    }

    stats
}

/// Title from a `tk ready` line such as `pp-461d  [P2][open] - Task title`.
fn parse_ready_line(line: &str) -> Option<String> {
    line.split_once(" - ")
        .map(|(_, title)| title.trim().to_string())
}

/// tk client bound to a working directory.
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
        "tk"
    }

    fn available(&self) -> bool {
        has_marker_dir(&self.workdir, MARKER_DIR, "tk")
    }

    fn stats(&self) -> Result<TaskStats> {
        let out = self.commander.output("tk", &["query"])?;
        Ok(compute_stats(&parse_jsonl(&out)?))
    }

    fn next_task(&self) -> Result<String> {
        // tk exits non-zero when nothing is ready.
        let Ok(out) = self.commander.output("tk", &["ready"]) else {
            return Ok(String::new());
        };
        Ok(out
            .lines()
            .next()
            .and_then(parse_ready_line)
            .unwrap_or_default())
    }
}
