//! External process execution
//!
//! [`ProcessRunner`] is the seam between the orchestration logic and the
//! operating system. [`SystemRunner`] spawns real processes; tests substitute
//! a recording fake.

use std::process::Stdio;

use tracing::debug;

use crate::core::invocation::Invocation;
use crate::error::CommandError;

/// How a process is attached to the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Collect stdout and stderr into one text, stdin closed
    ///
    /// The text is all of stdout followed by all of stderr; lines from the
    /// two streams are not interleaved by time.
    Capture,
    /// Inherit the terminal; the caller requires success
    Check,
    /// Inherit the terminal; the caller only wants the exit code
    Stream,
}

/// What a finished process left behind
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunOutcome {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    /// Stdout then stderr (capture mode only)
    pub output: String,
}

impl RunOutcome {
    /// Whether the process exited with status 0
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Human readable exit status
    pub fn status_text(&self) -> String {
        match self.code {
            Some(code) => format!("código de salida {code}"),
            None => "terminado por una señal".to_string(),
        }
    }
}

/// Executes invocations
pub trait ProcessRunner: Send + Sync {
    /// Run `invocation` to completion
    ///
    /// Returns an error only when the process could not be spawned; a
    /// non-zero exit is reported through [`RunOutcome::code`].
    fn run(&self, invocation: &Invocation, mode: RunMode) -> Result<RunOutcome, CommandError>;
}

/// Runner backed by [`std::process::Command`]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation, mode: RunMode) -> Result<RunOutcome, CommandError> {
        debug!(%invocation, ?mode, "spawning external command");
        let spawn_error = |e: std::io::Error| CommandError::Spawn {
            invocation: invocation.to_string(),
            error: e.to_string(),
        };

        let mut cmd = invocation.to_command();
        match mode {
            RunMode::Capture => {
                let output = cmd.stdin(Stdio::null()).output().map_err(spawn_error)?;
                let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
                text.push_str(&String::from_utf8_lossy(&output.stderr));
                debug!(code = ?output.status.code(), bytes = text.len(), "captured output");
                Ok(RunOutcome {
                    code: output.status.code(),
                    output: text,
                })
            }
            RunMode::Check | RunMode::Stream => {
                let status = cmd.status().map_err(spawn_error)?;
                debug!(code = ?status.code(), "process exited");
                Ok(RunOutcome {
                    code: status.code(),
                    output: String::new(),
                })
            }
        }
    }
}
