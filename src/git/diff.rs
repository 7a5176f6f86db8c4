//! Diff statistics and porcelain status parsing.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Uncommitted change statistics for a working tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    /// Lines added (staged plus unstaged).
    pub additions: u64,
    /// Lines deleted (staged plus unstaged).
    pub deletions: u64,
    /// Untracked or newly staged files.
    pub new_files: u64,
    pub modified_files: u64,
    pub deleted_files: u64,
    /// Tracked files with changes not yet staged.
    pub unstaged_files: u64,
}

impl DiffStats {
    /// True when there is nothing to report.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Matches the insertion and deletion clauses of `--shortstat` output.
static SHORTSTAT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+) (insertion|deletion)s?\([+-]\)").expect("SHORTSTAT_REGEX must compile")
});

/// Parse `git diff --shortstat` output into `(additions, deletions)`.
///
/// Example input: ` 3 files changed, 42 insertions(+), 10 deletions(-)`.
pub fn parse_shortstat(output: &str) -> (u64, u64) {
    let mut additions = 0;
    let mut deletions = 0;

    for caps in SHORTSTAT_REGEX.captures_iter(output) {
        let count: u64 = caps[1].parse().unwrap_or(0);
        match &caps[2] {
            "insertion" => additions += count,
            _ => deletions += count,
        }
    }

    (additions, deletions)
}

/// Number of entries in `git status --porcelain` output.
pub fn count_changes(porcelain: &str) -> usize {
    porcelain.lines().filter(|l| !l.trim().is_empty()).count()
}

/// Classify `git status --porcelain` lines into file counters.
///
/// Only the file counters of the returned stats are populated.
pub fn classify_porcelain(porcelain: &str) -> DiffStats {
    let mut stats = DiffStats::default();

    for line in porcelain.lines() {
        let mut codes = line.chars();
        let (Some(x), Some(y)) = (codes.next(), codes.next()) else {
            continue;
        };

        if x == '?' && y == '?' {
            stats.new_files += 1;
            continue;
        }

        if x == 'A' {
            stats.new_files += 1;
        } else if x == 'D' || y == 'D' {
            stats.deleted_files += 1;
        } else if x == 'M' || y == 'M' || x == 'R' || x == 'C' {
            stats.modified_files += 1;
        }

        if y != ' ' {
            stats.unstaged_files += 1;
        }
    }

    stats
}
