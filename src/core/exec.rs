//! Execution modes
//!
//! [`Executor`] applies the execution mode (normal or dry-run) and the
//! per-call failure policy on top of a [`ProcessRunner`].

use tracing::warn;

use crate::core::invocation::Invocation;
use crate::error::CommandError;
use crate::infra::process::{ProcessRunner, RunMode};

/// Prefix printed in front of every simulated invocation
pub const DRY_RUN_PREFIX: &str = "DRY-RUN:";

/// Whether external commands are really executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Spawn the external tool
    #[default]
    Normal,
    /// Only print what would be spawned
    DryRun,
}

impl ExecutionMode {
    /// Mode selected by a `--dry-run` flag
    pub fn from_flag(dry_run: bool) -> Self {
        if dry_run {
            Self::DryRun
        } else {
            Self::Normal
        }
    }

    /// Whether this is [`ExecutionMode::DryRun`]
    pub fn is_dry_run(self) -> bool {
        self == Self::DryRun
    }
}

/// Line printed instead of running `invocation` in dry-run mode
pub fn dry_run_line(invocation: &Invocation) -> String {
    format!("{DRY_RUN_PREFIX} {invocation}")
}

/// Runs invocations under an [`ExecutionMode`]
#[derive(Clone, Copy)]
pub struct Executor<'a> {
    runner: &'a dyn ProcessRunner,
    mode: ExecutionMode,
}

impl<'a> Executor<'a> {
    /// Create an executor
    pub fn new(runner: &'a dyn ProcessRunner, mode: ExecutionMode) -> Self {
        Self { runner, mode }
    }

    /// Executor that always spawns, used for read-only queries
    pub fn normal(runner: &'a dyn ProcessRunner) -> Self {
        Self::new(runner, ExecutionMode::Normal)
    }

    /// Current execution mode
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Run and return combined stdout/stderr
    ///
    /// A non-zero exit still yields whatever text the process produced.
    /// Dry-run returns an empty string.
    pub fn capture(&self, invocation: &Invocation) -> Result<String, CommandError> {
        if self.mode.is_dry_run() {
            println!("{}", dry_run_line(invocation));
            return Ok(String::new());
        }
        let outcome = self.runner.run(invocation, RunMode::Capture)?;
        if !outcome.success() {
            warn!(%invocation, status = %outcome.status_text(), "command failed, keeping its output");
        }
        Ok(outcome.output)
    }

    /// Run and return combined stdout/stderr, requiring success
    ///
    /// Dry-run returns an empty string.
    pub fn capture_success(&self, invocation: &Invocation) -> Result<String, CommandError> {
        if self.mode.is_dry_run() {
            println!("{}", dry_run_line(invocation));
            return Ok(String::new());
        }
        let outcome = self.runner.run(invocation, RunMode::Capture)?;
        if outcome.success() {
            Ok(outcome.output)
        } else {
            Err(CommandError::Failed {
                invocation: invocation.to_string(),
                status: outcome.status_text(),
            })
        }
    }

    /// Run attached to the terminal and require success
    pub fn check(&self, invocation: &Invocation) -> Result<(), CommandError> {
        if self.mode.is_dry_run() {
            println!("{}", dry_run_line(invocation));
            return Ok(());
        }
        let outcome = self.runner.run(invocation, RunMode::Check)?;
        if outcome.success() {
            Ok(())
        } else {
            Err(CommandError::Failed {
                invocation: invocation.to_string(),
                status: outcome.status_text(),
            })
        }
    }

    /// Run attached to the terminal and return the exit code
    ///
    /// Signal termination is reported as `-1`. Dry-run returns `0`.
    pub fn stream(&self, invocation: &Invocation) -> Result<i32, CommandError> {
        if self.mode.is_dry_run() {
            println!("{}", dry_run_line(invocation));
            return Ok(0);
        }
        let outcome = self.runner.run(invocation, RunMode::Stream)?;
        Ok(outcome.code.unwrap_or(-1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeRunner;

    fn flash() -> Invocation {
        Invocation::new("fastboot").args(["flash", "boot", "boot.img"])
    }

    #[test]
    fn test_dry_run_never_spawns() {
        let runner = FakeRunner::new();
        let exec = Executor::new(&runner, ExecutionMode::DryRun);

        assert_eq!(exec.capture(&flash()).unwrap(), "");
        assert_eq!(exec.capture_success(&flash()).unwrap(), "");
        exec.check(&flash()).unwrap();
        assert_eq!(exec.stream(&flash()).unwrap(), 0);
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_dry_run_line_format() {
        assert_eq!(
            dry_run_line(&flash()),
            "DRY-RUN: fastboot flash boot boot.img"
        );
    }

    #[test]
    fn test_capture_returns_output_of_failed_command() {
        let runner = FakeRunner::new().respond("getprop", 1, "error: no devices/emulators found");
        let exec = Executor::normal(&runner);
        let inv = Invocation::new("adb").args(["shell", "getprop", "ro.product.model"]);

        let text = exec.capture(&inv).unwrap();
        assert_eq!(text, "error: no devices/emulators found");
        assert_eq!(runner.calls(), vec![inv.to_string()]);
    }

    #[test]
    fn test_capture_success_rejects_non_zero_exit() {
        let runner = FakeRunner::new().respond("ls", 1, "adb: no devices/emulators found");
        let exec = Executor::normal(&runner);
        let inv = Invocation::new("adb").args(["shell", "ls", "-1", "/sdcard"]);

        let err = exec.capture_success(&inv).unwrap_err();
        assert_eq!(
            err,
            CommandError::Failed {
                invocation: "adb shell ls -1 /sdcard".to_string(),
                status: "código de salida 1".to_string(),
            }
        );
        assert_eq!(runner.modes(), vec![RunMode::Capture]);
    }

    #[test]
    fn test_capture_success_returns_output() {
        let runner = FakeRunner::new().respond("ls", 0, "DCIM\n");
        let exec = Executor::normal(&runner);
        let inv = Invocation::new("adb").args(["shell", "ls"]);
        assert_eq!(exec.capture_success(&inv).unwrap(), "DCIM\n");
    }

    #[test]
    fn test_check_fails_on_non_zero_exit() {
        let runner = FakeRunner::new().respond("flash", 1, "");
        let exec = Executor::normal(&runner);

        let err = exec.check(&flash()).unwrap_err();
        assert_eq!(
            err,
            CommandError::Failed {
                invocation: "fastboot flash boot boot.img".to_string(),
                status: "código de salida 1".to_string(),
            }
        );
    }

    #[test]
    fn test_check_propagates_spawn_failure() {
        let runner = FakeRunner::new().fail_spawn("flash");
        let exec = Executor::normal(&runner);
        assert!(matches!(
            exec.check(&flash()),
            Err(CommandError::Spawn { .. })
        ));
    }

    #[test]
    fn test_stream_returns_exit_code() {
        let runner = FakeRunner::new().respond("sideload", 7, "");
        let exec = Executor::normal(&runner);
        let inv = Invocation::new("adb").args(["sideload", "rom.zip"]);
        assert_eq!(exec.stream(&inv).unwrap(), 7);
        assert_eq!(runner.modes(), vec![RunMode::Stream]);
    }
}
