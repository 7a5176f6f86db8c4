//! Cache command implementation.
//!
//! Provides `claude-status cache show`, `cache path` and `cache clear`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cache::{format_duration, CacheDocument, CacheStore};
use crate::cli::args::{CacheArgs, CacheSubcommand};

use super::dispatcher::{Command, CommandResult};

/// The cache command implementation.
pub struct CacheCommand {
    cache_dir: PathBuf,
    args: CacheArgs,
}

impl CacheCommand {
    /// Create a new cache command operating on `cache_dir`.
    pub fn new(cache_dir: &Path, args: CacheArgs) -> Self {
        Self {
            cache_dir: cache_dir.to_path_buf(),
            args,
        }
    }
}

impl Command for CacheCommand {
    fn execute(&self, out: &mut dyn Write) -> crate::error::Result<CommandResult> {
        let store = CacheStore::new(&self.cache_dir);

        match &self.args.command {
            CacheSubcommand::Clear => clear_cache(&store, out)?,
            CacheSubcommand::Path => writeln!(out, "{}", store.cache_path().display())?,
            CacheSubcommand::Show { json } => show_cache(&store, *json, out)?,
        }

        Ok(CommandResult::success())
    }
}

fn clear_cache(store: &CacheStore, out: &mut dyn Write) -> Result<()> {
    store
        .clear()
        .with_context(|| format!("failed to remove {}", store.cache_path().display()))?;
    writeln!(out, "Cache cleared")?;
    Ok(())
}

fn show_cache(store: &CacheStore, json: bool, out: &mut dyn Write) -> Result<()> {
    let document = store.snapshot();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
        return Ok(());
    }

    if document.is_empty() {
        writeln!(out, "Cache is empty")?;
        return Ok(());
    }

    writeln!(out, "{}", store.cache_path().display())?;
    for line in describe(&document, Utc::now()) {
        writeln!(out, "  {line}")?;
    }
    Ok(())
}

/// One line per cached entry, with its age.
fn describe(document: &CacheDocument, now: DateTime<Utc>) -> Vec<String> {
    let age = |cached_at: DateTime<Utc>| format_duration(now - cached_at);
    let mut lines = Vec::new();

    if let Some(entry) = &document.git_branch {
        lines.push(format!("git branch: {} ({} ago)", entry.value, age(entry.cached_at)));
    }
    if let Some(entry) = &document.git_status {
        let value: &str = if entry.value.is_empty() { "clean" } else { &entry.value };
        lines.push(format!("git status: {} ({} ago)", value, age(entry.cached_at)));
    }
    if let Some(entry) = &document.git_diff_stats {
        lines.push(format!(
            "git diff: +{} -{} ({} ago)",
            entry.stats.additions,
            entry.stats.deletions,
            age(entry.cached_at)
        ));
    }
    if let Some(entry) = &document.github_build {
        lines.push(format!(
            "github build: {} on {} ({} ago)",
            entry.status,
            entry.branch,
            age(entry.cached_at)
        ));
    }
    for (workdir, entry) in &document.task_stats_map {
        lines.push(format!(
            "tasks {}: {} ready, {} blocked ({} ago)",
            workdir,
            entry.stats.ready_issues,
            entry.stats.blocked_issues,
            age(entry.cached_at)
        ));
    }
    for (workdir, entry) in &document.next_task_map {
        let title: &str = if entry.title.is_empty() { "-" } else { &entry.title };
        lines.push(format!("next task {}: {} ({} ago)", workdir, title, age(entry.cached_at)));
    }

    lines
}
