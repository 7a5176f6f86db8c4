//! CI build status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of the latest workflow run on a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    Success,
    Failure,
    Pending,
    Error,
}

impl BuildStatus {
    /// Map a workflow run's `status` and `conclusion` fields.
    pub fn from_run(status: &str, conclusion: Option<&str>) -> Self {
        match status {
            "completed" => match conclusion {
                Some("success") => Self::Success,
                Some("failure" | "timed_out" | "cancelled") => Self::Failure,
                _ => Self::Error,
            },
            "queued" | "in_progress" | "waiting" => Self::Pending,
            _ => Self::Error,
        }
    }

    /// Emoji shown in the status line.
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Failure => "❌",
            Self::Pending => "🔄",
            Self::Error => "⚠️",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Pending => "pending",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
