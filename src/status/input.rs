//! Session payload read from stdin.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Model shown when the payload carries no display name.
pub const DEFAULT_MODEL_NAME: &str = "Claude";

/// JSON document the host pipes in on every refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusInput {
    pub model: ModelInfo,
    pub workspace: WorkspaceInfo,
    pub version: String,
    pub session_id: String,
    pub transcript_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelInfo {
    pub id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceInfo {
    pub current_dir: String,
}

impl StatusInput {
    /// Parse a payload.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Display name, or [`DEFAULT_MODEL_NAME`] when absent.
    pub fn model_name(&self) -> &str {
        if self.model.display_name.is_empty() {
            DEFAULT_MODEL_NAME
        } else {
            &self.model.display_name
        }
    }

    /// Last component of the workspace directory.
    pub fn dir_name(&self) -> String {
        let dir = Path::new(&self.workspace.current_dir);
        match dir.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None if self.workspace.current_dir.is_empty() => ".".to_string(),
            None => self.workspace.current_dir.clone(),
        }
    }

    /// Workspace directory; `.` when absent.
    pub fn workdir(&self) -> PathBuf {
        if self.workspace.current_dir.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&self.workspace.current_dir)
        }
    }

    pub fn transcript(&self) -> Option<&Path> {
        Some(Path::new(&self.transcript_path)).filter(|p| !p.as_os_str().is_empty())
    }
}
