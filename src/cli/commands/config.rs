//! Config command implementation.
//!
//! The `claude-status config` command shows the resolved configuration.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::ConfigArgs;
use crate::config::load_config_from;
use crate::error::{Result, StatusLineError};

use super::dispatcher::{Command, CommandResult};

/// The config command implementation.
pub struct ConfigCommand {
    config_path: PathBuf,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(config_path: &Path, args: ConfigArgs) -> Self {
        Self {
            config_path: config_path.to_path_buf(),
            args,
        }
    }

    /// Get the config file path.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

impl Command for ConfigCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        if self.args.path {
            writeln!(out, "{}", self.config_path.display())?;
            return Ok(CommandResult::success());
        }

        let config = load_config_from(&self.config_path);
        let json =
            serde_json::to_string_pretty(&config).map_err(|e| StatusLineError::Other(e.into()))?;
        writeln!(out, "{json}")?;

        Ok(CommandResult::success())
    }
}
