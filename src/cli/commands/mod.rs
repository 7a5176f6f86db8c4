//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Rendering is the default so the
//! host can invoke the bare binary.

pub mod cache;
pub mod config;
pub mod dispatcher;
pub mod render;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use render::{RenderCommand, RenderOptions, FALLBACK_LINE};
