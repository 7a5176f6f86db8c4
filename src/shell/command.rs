//! Timeout-bounded subprocess execution.

use crate::error::{Result, StatusLineError};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;
use wait_timeout::ChildExt;

/// Timeout for local git metadata calls.
pub const GIT_TIMEOUT: Duration = Duration::from_secs(2);

/// Timeout for task tracker CLIs.
pub const TASK_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for `gh auth token`.
pub const GH_TIMEOUT: Duration = Duration::from_secs(2);

/// Runs external programs and returns their standard output.
///
/// Implemented by [`SystemCommander`] for real processes and by
/// [`MockCommander`](super::MockCommander) in tests.
pub trait Commander: Send + Sync {
    /// Run `program` with `args`, returning stdout with trailing whitespace
    /// removed. Non-zero exit and timeouts are errors.
    fn output(&self, program: &str, args: &[&str]) -> Result<String>;
}

/// Spawns real processes with a working directory and timeout.
#[derive(Debug, Clone)]
pub struct SystemCommander {
    workdir: Option<PathBuf>,
    timeout: Duration,
}

impl SystemCommander {
    /// Create a commander running in `workdir`.
    pub fn new(workdir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            workdir: Some(workdir.into()),
            timeout,
        }
    }

    /// Create a commander inheriting the current directory.
    pub fn in_current_dir(timeout: Duration) -> Self {
        Self {
            workdir: None,
            timeout,
        }
    }

    /// Working directory, if one was set.
    pub fn workdir(&self) -> Option<&Path> {
        self.workdir.as_deref()
    }

    /// Timeout applied to every command.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Commander for SystemCommander {
    fn output(&self, program: &str, args: &[&str]) -> Result<String> {
        let command_line = command_line(program, args);

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|err| {
            tracing::debug!(command = %command_line, error = %err, "failed to spawn");
            StatusLineError::CommandFailed {
                command: command_line.clone(),
                code: None,
            }
        })?;

        // Drain stdout concurrently so a chatty child can't block on a full pipe.
        let stdout = child.stdout.take();
        let reader = thread::spawn(move || {
            let mut buf = String::new();
            if let Some(mut out) = stdout {
                let _ = out.read_to_string(&mut buf);
            }
            buf
        });

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                tracing::debug!(command = %command_line, timeout = ?self.timeout, "command timed out");
                return Err(StatusLineError::CommandTimeout {
                    command: command_line,
                    timeout: self.timeout,
                });
            }
            Err(err) => {
                let _ = child.kill();
                return Err(err.into());
            }
        };

        let stdout = reader.join().unwrap_or_default();

        if !status.success() {
            return Err(StatusLineError::CommandFailed {
                command: command_line,
                code: status.code(),
            });
        }

        Ok(stdout.trim_end().to_string())
    }
}

/// Render a command for logs and error messages.
pub fn command_line(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}
