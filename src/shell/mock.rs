//! Scripted [`Commander`] for tests.
//!
//! `MockCommander` answers commands from a table of canned responses and
//! records every invocation for later assertion.
//!
//! # Example
//!
//! ```
//! use claude_status::shell::{Commander, MockCommander};
//!
//! let commander = MockCommander::new()
//!     .respond("git rev-parse --abbrev-ref HEAD", "main")
//!     .fail("git remote get-url origin", 2);
//!
//! assert_eq!(commander.output("git", &["rev-parse", "--abbrev-ref", "HEAD"]).unwrap(), "main");
//! assert!(commander.output("git", &["remote", "get-url", "origin"]).is_err());
//! assert_eq!(commander.calls().len(), 2);
//! ```

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use super::command::{command_line, Commander};
use crate::error::{Result, StatusLineError};

#[derive(Debug, Clone)]
enum Response {
    Stdout(String),
    Exit(i32),
    Timeout,
}

/// Commander returning pre-configured output keyed by full command line.
///
/// Unknown commands fail with exit code 127.
#[derive(Debug, Default)]
pub struct MockCommander {
    responses: HashMap<String, Response>,
    calls: Mutex<Vec<String>>,
}

impl MockCommander {
    /// Create a commander with no responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` with `stdout`.
    pub fn respond(mut self, command: &str, stdout: &str) -> Self {
        self.responses
            .insert(command.to_string(), Response::Stdout(stdout.to_string()));
        self
    }

    /// Make `command` exit with `code`.
    pub fn fail(mut self, command: &str, code: i32) -> Self {
        self.responses
            .insert(command.to_string(), Response::Exit(code));
        self
    }

    /// Make `command` time out.
    pub fn time_out(mut self, command: &str) -> Self {
        self.responses.insert(command.to_string(), Response::Timeout);
        self
    }

    /// Every command line run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    /// Number of times `command` was run.
    pub fn call_count(&self, command: &str) -> usize {
        self.calls().iter().filter(|c| *c == command).count()
    }
}

impl Commander for MockCommander {
    fn output(&self, program: &str, args: &[&str]) -> Result<String> {
        let command = command_line(program, args);
        self.calls
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(command.clone());

        match self.responses.get(&command) {
            Some(Response::Stdout(out)) => Ok(out.trim_end().to_string()),
            Some(Response::Exit(code)) => Err(StatusLineError::CommandFailed {
                command,
                code: Some(*code),
            }),
            Some(Response::Timeout) => Err(StatusLineError::CommandTimeout {
                command,
                timeout: Duration::from_secs(10),
            }),
            None => Err(StatusLineError::CommandFailed {
                command,
                code: Some(127),
            }),
        }
    }
}
