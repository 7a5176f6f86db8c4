//! Optional record of every rendered status line.
//!
//! The journal is a pretty-printed JSON array rewritten on each append. A
//! file that no longer parses is replaced by a fresh array.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::input::StatusInput;
use crate::error::Result;

/// One rendered status line and the payload that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// RFC 3339 time of the render.
    pub timestamp: String,
    pub input_data: StatusInput,
    pub status_line_output: String,
}

impl JournalEntry {
    pub fn new(at: DateTime<Utc>, input: &StatusInput, output: &str) -> Self {
        Self {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Secs, true),
            input_data: input.clone(),
            status_line_output: output.to_string(),
        }
    }
}

/// Entries currently stored at `path`. Missing or corrupted files read as empty.
pub fn read_journal(path: &Path) -> Vec<JournalEntry> {
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };
    match serde_json::from_str(&content) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "journal corrupted, starting fresh");
            Vec::new()
        }
    }
}

/// Append `entry` to the journal at `path`, creating parent directories.
pub fn append_entry(path: &Path, entry: JournalEntry) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut entries = read_journal(path);
    entries.push(entry);

    let json = serde_json::to_string_pretty(&entries)?;
    fs::write(path, json)?;
    Ok(())
}

/// Append a render to the journal, logging instead of failing.
pub fn record(path: &Path, input: &StatusInput, output: &str) {
    let entry = JournalEntry::new(Utc::now(), input, output);
    if let Err(err) = append_entry(path, entry) {
        tracing::error!(path = %path.display(), error = %err, "failed to write journal");
    }
}
