//! Token usage metrics from a session transcript.
//!
//! Transcripts are JSONL files. Each assistant entry carries a `usage`
//! block; sidechain (sub-agent) entries are excluded from the totals.

use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;

/// Accumulated token counts for one transcript.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenMetrics {
    pub input_tokens: u64,
    pub output_tokens: u64,
    /// Cache reads plus cache creation.
    pub cached_tokens: u64,
    pub total_tokens: u64,
    /// Context size of the most recent entry.
    pub context_length: u64,
}

/// Context window limits for a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextWindow {
    pub max_tokens: u64,
    /// Tokens available before auto-compaction (80% of max).
    pub usable_tokens: u64,
}

impl ContextWindow {
    /// Limits for `model_id`.
    pub fn for_model(model_id: &str) -> Self {
        let id = model_id.to_lowercase();
        if id.contains("[1m]") || id.contains("claude-sonnet-4") {
            Self {
                max_tokens: 1_000_000,
                usable_tokens: 800_000,
            }
        } else {
            Self {
                max_tokens: 200_000,
                usable_tokens: 160_000,
            }
        }
    }
}

impl TokenMetrics {
    /// Share of the full context window in use, capped at 100.
    pub fn context_percentage(&self, window: ContextWindow) -> f64 {
        percentage(self.context_length, window.max_tokens)
    }

    /// Share of the usable context window in use, capped at 100.
    pub fn context_percentage_usable(&self, window: ContextWindow) -> f64 {
        percentage(self.context_length, window.usable_tokens)
    }
}

fn percentage(used: u64, limit: u64) -> f64 {
    if limit == 0 {
        return 0.0;
    }
    (used as f64 / limit as f64 * 100.0).min(100.0)
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default, rename = "isSidechain")]
    is_sidechain: bool,
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    usage: Option<Usage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
    cache_read_input_tokens: u64,
    cache_creation_input_tokens: u64,
}

/// Parse the transcript at `path`.
///
/// `None` or an empty path yields zero metrics. Malformed lines are skipped.
pub fn parse_transcript(path: Option<&Path>) -> Result<TokenMetrics> {
    let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(TokenMetrics::default());
    };

    let reader = BufReader::new(File::open(path)?);
    let mut metrics = TokenMetrics::default();

    for line in reader.split(b'\n') {
        let line = line?;
        if line.trim_ascii().is_empty() {
            continue;
        }
        let Ok(entry) = serde_json::from_slice::<Entry>(&line) else {
            continue;
        };
        if entry.is_sidechain {
            continue;
        }
        let Some(usage) = entry.message.and_then(|m| m.usage) else {
            continue;
        };

        let cached = usage.cache_read_input_tokens + usage.cache_creation_input_tokens;
        metrics.input_tokens += usage.input_tokens;
        metrics.output_tokens += usage.output_tokens;
        metrics.cached_tokens += cached;
        metrics.context_length = usage.input_tokens + cached;
    }

    metrics.total_tokens = metrics.input_tokens + metrics.output_tokens + metrics.cached_tokens;
    Ok(metrics)
}
