//! Background jobs for the terminal UI
//!
//! Each job runs this executable again as a child process on a tokio task.
//! The finished output goes back to the UI thread over an unbounded channel;
//! the UI thread is the only writer of the log.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

use super::app::Job;
use crate::cli::session::Session;

/// Width of the rule around each output block
const RULE_WIDTH: usize = 60;

/// How to start the CLI for a job
#[derive(Debug, Clone)]
pub struct Launcher {
    program: PathBuf,
    base_args: Vec<OsString>,
}

impl Launcher {
    pub fn new(program: impl Into<PathBuf>, base_args: Vec<OsString>) -> Self {
        Self {
            program: program.into(),
            base_args,
        }
    }

    /// Launcher for the running executable, forwarding tool and config paths
    pub fn current(session: &Session) -> Result<Self> {
        let program =
            std::env::current_exe().context("No se pudo localizar el ejecutable de redmi-tool")?;
        let mut base_args = Vec::new();
        if let Some(adb) = session.tools().adb_path() {
            base_args.push("--adb".into());
            base_args.push(adb.as_os_str().to_os_string());
        }
        if let Some(fastboot) = session.tools().fastboot_path() {
            base_args.push("--fastboot".into());
            base_args.push(fastboot.as_os_str().to_os_string());
        }
        if let Some(config) = session.config_path() {
            base_args.push("--config".into());
            base_args.push(config.as_os_str().to_os_string());
        }
        Ok(Self::new(program, base_args))
    }

    fn command(&self, job: &Job) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.base_args)
            .args(&job.args)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        cmd
    }

    /// Run `job` to completion and return its combined output
    pub async fn run(&self, job: &Job) -> Result<String> {
        debug!(title = %job.title, args = ?job.args, "starting ui job");
        let output = self.command(job).output();
        let output = match job.timeout {
            Some(limit) => tokio::time::timeout(limit, output)
                .await
                .map_err(|_| anyhow!("tiempo de espera agotado ({}s)", limit.as_secs()))??,
            None => output.await?,
        };
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }
}

/// Log block for a finished job
pub fn format_output(title: &str, output: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("\n[{title}]\n{rule}\n{output}\n{rule}\n")
}

/// Log line for a job that could not run
pub fn format_failure(error: &anyhow::Error) -> String {
    format!("\nERROR: {error}\n")
}

/// Start `job` on the runtime behind `handle`
pub fn spawn_job(
    handle: &Handle,
    launcher: Arc<Launcher>,
    job: Job,
    tx: UnboundedSender<String>,
) -> JoinHandle<()> {
    handle.spawn(async move {
        let message = match launcher.run(&job).await {
            Ok(output) => format_output(&job.title, &output),
            Err(e) => format_failure(&e),
        };
        // The UI may already be gone
        let _ = tx.send(message);
    })
}
