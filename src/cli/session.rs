//! Per-invocation context shared by all commands
//!
//! Holds the loaded settings, the resolved tool paths and the two injected
//! capabilities: the process runner and the confirmer.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::confirm::Confirmer;
use crate::core::exec::{ExecutionMode, Executor};
use crate::core::settings::Settings;
use crate::error::ToolkitError;
use crate::infra::dirs::ToolDirs;
use crate::infra::process::{ProcessRunner, SystemRunner};
use crate::infra::terminal::TerminalConfirmer;
use crate::infra::tools::ToolPaths;

/// Everything a command needs besides its own arguments
pub struct Session {
    settings: Settings,
    config_path: Option<PathBuf>,
    tools: ToolPaths,
    runner: Box<dyn ProcessRunner>,
    confirmer: Box<dyn Confirmer>,
}

impl Session {
    /// Assemble a session from parts
    pub fn new(
        settings: Settings,
        tools: ToolPaths,
        runner: Box<dyn ProcessRunner>,
        confirmer: Box<dyn Confirmer>,
    ) -> Self {
        Self {
            settings,
            config_path: None,
            tools,
            runner,
            confirmer,
        }
    }

    /// Load settings, resolve tools and attach the real runner and terminal
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::Settings`] when the settings file is invalid.
    pub fn load(
        config: Option<&Path>,
        adb: Option<PathBuf>,
        fastboot: Option<PathBuf>,
    ) -> Result<Self, ToolkitError> {
        let settings = match config {
            Some(path) => Settings::load_from_path(path)?,
            None => Settings::load(&ToolDirs::new())?,
        };
        let tools = ToolPaths::resolve(adb, fastboot, &settings.tools);
        debug!(?tools, "resolved platform tools");
        let mut session = Self::new(
            settings,
            tools,
            Box::new(SystemRunner),
            Box::new(TerminalConfirmer),
        );
        session.config_path = config.map(Path::to_path_buf);
        Ok(session)
    }

    /// Settings file given with `--config`, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tools(&self) -> &ToolPaths {
        &self.tools
    }

    pub fn confirmer(&self) -> &dyn Confirmer {
        self.confirmer.as_ref()
    }

    /// Executor in the given mode
    pub fn executor(&self, mode: ExecutionMode) -> Executor<'_> {
        Executor::new(self.runner.as_ref(), mode)
    }

    /// Executor for read-only queries
    pub fn query_executor(&self) -> Executor<'_> {
        Executor::normal(self.runner.as_ref())
    }
}
