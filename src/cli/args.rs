//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct. Running without a subcommand
//! renders the status line, which is how the host invokes the binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cached, colorized status line for coding-assistant sessions.
#[derive(Debug, Parser)]
#[command(name = "claude-status")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides the platform default)
    #[arg(short, long, global = true, env = "CLAUDE_STATUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Text shown at the start of the status line
    #[arg(long, global = true, default_value = "")]
    pub prefix: String,

    /// Prefix color (cyan, blue, green, yellow, red, magenta, gray)
    #[arg(long, global = true, default_value = "")]
    pub prefix_color: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Read the session JSON from stdin and print the status line (default)
    Render,

    /// Inspect or clear the status cache
    Cache(CacheArgs),

    /// Show resolved configuration
    Config(ConfigArgs),
}

/// Arguments for the `cache` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

/// Cache subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheSubcommand {
    /// Delete the cache document.
    Clear,
    /// Print the cache document path.
    Path,
    /// Show cached entries.
    Show {
        /// Output the raw document as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Print only the config file path
    #[arg(long)]
    pub path: bool,
}
