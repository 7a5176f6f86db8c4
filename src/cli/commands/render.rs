//! Render command implementation.
//!
//! `claude-status` (or `claude-status render`) reads the session payload,
//! builds the status data and prints one status line. Any failure still
//! prints a minimal line so the host never shows an empty status.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::Result;
use crate::render::{render, Color, Theme};
use crate::status::{journal, StatusBuilder, StatusInput};

use super::dispatcher::{Command, CommandResult};

/// Printed when the status line cannot be produced.
pub const FALLBACK_LINE: &str = "\x1b[31m[Claude] 📁 Unknown\x1b[0m";

/// Presentation flags from the command line.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub prefix: String,
    /// Color name; ignored without a prefix.
    pub prefix_color: String,
    pub no_color: bool,
}

/// The render command implementation.
pub struct RenderCommand {
    config: Config,
    cache_dir: PathBuf,
    options: RenderOptions,
    payload: String,
}

impl RenderCommand {
    /// Create a render command for the raw stdin `payload`.
    pub fn new(config: Config, cache_dir: &Path, options: RenderOptions, payload: String) -> Self {
        Self {
            config,
            cache_dir: cache_dir.to_path_buf(),
            options,
            payload,
        }
    }

    fn run(&self, out: &mut dyn Write) -> Result<()> {
        let input = StatusInput::from_json(&self.payload)?;

        let mut builder = StatusBuilder::builder()
            .config(self.config.clone())
            .cache(CacheStore::new(&self.cache_dir))
            .workdir(input.workdir());
        if !self.options.prefix.is_empty() {
            builder = builder
                .prefix(&self.options.prefix)
                .prefix_color(Color::parse_or_default(&self.options.prefix_color));
        }
        let builder = builder.build()?;

        let data = builder.collect(&input);
        let line = render(&data, self.config.layout, &Theme::from_env(self.options.no_color));
        writeln!(out, "{line}")?;

        if self.config.logging_enabled {
            journal::record(&self.config.log_path, &input, &line);
        }
        Ok(())
    }
}

impl Command for RenderCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        match self.run(out) {
            Ok(()) => Ok(CommandResult::success()),
            Err(err) => {
                tracing::error!(error = %err, "failed to render status line");
                writeln!(out, "{FALLBACK_LINE}")?;
                Ok(CommandResult::failure(1))
            }
        }
    }
}
