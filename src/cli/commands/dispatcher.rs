//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{self, load_config_from, resolve_config_path};
use crate::error::Result;

use super::cache::CacheCommand;
use super::config::ConfigCommand;
use super::render::{RenderCommand, RenderOptions};

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command, writing user-facing output to `out`.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    config_path: PathBuf,
    cache_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a dispatcher reading configuration from `config_path`, or the
    /// default location when `None`.
    pub fn new(config_path: Option<&Path>) -> Self {
        Self {
            config_path: resolve_config_path(config_path),
            cache_dir: config::cache_dir(),
        }
    }

    /// Use `cache_dir` instead of the platform cache directory.
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Dispatch and execute a command.
    ///
    /// Rendering reads the session payload from `input`; every command writes
    /// to `out`.
    pub fn dispatch(
        &self,
        cli: &Cli,
        input: &mut dyn Read,
        out: &mut dyn Write,
    ) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Cache(args)) => {
                let cmd = CacheCommand::new(&self.cache_dir, args.clone());
                cmd.execute(out)
            }
            Some(Commands::Config(args)) => {
                let cmd = ConfigCommand::new(&self.config_path, args.clone());
                cmd.execute(out)
            }
            Some(Commands::Render) | None => {
                let mut payload = String::new();
                if let Err(err) = input.read_to_string(&mut payload) {
                    tracing::error!(error = %err, "failed to read stdin");
                }
                let options = RenderOptions {
                    prefix: cli.prefix.clone(),
                    prefix_color: cli.prefix_color.clone(),
                    no_color: cli.no_color,
                };
                let cmd = RenderCommand::new(
                    load_config_from(&self.config_path),
                    &self.cache_dir,
                    options,
                    payload,
                );
                cmd.execute(out)
            }
        }
    }
}
