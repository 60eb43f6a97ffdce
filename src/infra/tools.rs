//! Platform tool lookup
//!
//! `adb` and `fastboot` are located once at startup: an explicit path (flag or
//! environment) wins, then the `[tools]` section of the settings, then a
//! `PATH` search.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::defaults::{ADB_TOOL, FASTBOOT_TOOL};
use crate::core::platform_tools::{Adb, Fastboot};
use crate::core::settings::ToolSettings;
use crate::error::ToolkitError;

/// Resolved locations of the platform tools
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolPaths {
    adb: Option<PathBuf>,
    fastboot: Option<PathBuf>,
}

impl ToolPaths {
    /// Use already-resolved paths
    pub fn new(adb: Option<PathBuf>, fastboot: Option<PathBuf>) -> Self {
        Self { adb, fastboot }
    }

    /// Resolve both tools
    pub fn resolve(
        adb: Option<PathBuf>,
        fastboot: Option<PathBuf>,
        settings: &ToolSettings,
    ) -> Self {
        Self {
            adb: locate(ADB_TOOL, adb.or_else(|| settings.adb.clone())),
            fastboot: locate(FASTBOOT_TOOL, fastboot.or_else(|| settings.fastboot.clone())),
        }
    }

    /// Path to `adb`, if found
    pub fn adb_path(&self) -> Option<&Path> {
        self.adb.as_deref()
    }

    /// Path to `fastboot`, if found
    pub fn fastboot_path(&self) -> Option<&Path> {
        self.fastboot.as_deref()
    }

    /// `adb` wrapper
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::ToolMissing`] when `adb` was not found.
    pub fn adb(&self) -> Result<Adb, ToolkitError> {
        self.adb.as_ref().map(Adb::new).ok_or_else(|| missing(ADB_TOOL))
    }

    /// `fastboot` wrapper
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::ToolMissing`] when `fastboot` was not found.
    pub fn fastboot(&self) -> Result<Fastboot, ToolkitError> {
        self.fastboot
            .as_ref()
            .map(Fastboot::new)
            .ok_or_else(|| missing(FASTBOOT_TOOL))
    }
}

fn missing(tool: &str) -> ToolkitError {
    ToolkitError::ToolMissing {
        tool: tool.to_string(),
    }
}

/// Locate one tool
///
/// An explicit path must point at an existing file; otherwise the tool is
/// reported missing rather than silently searched on `PATH`.
fn locate(name: &str, explicit: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            debug!(tool = name, path = %path.display(), "using configured tool");
            return Some(path);
        }
        // Bare names like "adb" are looked up on PATH
        if path.components().count() == 1 {
            return which::which(&path).ok();
        }
        warn!(tool = name, path = %path.display(), "configured tool does not exist");
        return None;
    }

    match which::which(name) {
        Ok(path) => {
            debug!(tool = name, path = %path.display(), "found tool on PATH");
            Some(path)
        }
        Err(e) => {
            debug!(tool = name, error = %e, "tool not found on PATH");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_path_wins_over_settings() {
        let temp = TempDir::new().unwrap();
        let flag = temp.path().join("adb-flag");
        let configured = temp.path().join("adb-config");
        std::fs::write(&flag, "").unwrap();
        std::fs::write(&configured, "").unwrap();

        let settings = ToolSettings {
            adb: Some(configured),
            fastboot: None,
        };
        let tools = ToolPaths::resolve(Some(flag.clone()), None, &settings);
        assert_eq!(tools.adb_path(), Some(flag.as_path()));
    }

    #[test]
    fn test_settings_used_without_flag() {
        let temp = TempDir::new().unwrap();
        let configured = temp.path().join("fastboot");
        std::fs::write(&configured, "").unwrap();

        let settings = ToolSettings {
            adb: None,
            fastboot: Some(configured.clone()),
        };
        let tools = ToolPaths::resolve(None, None, &settings);
        assert_eq!(tools.fastboot_path(), Some(configured.as_path()));
    }

    #[test]
    fn test_nonexistent_explicit_path_is_missing() {
        let temp = TempDir::new().unwrap();
        let tools = ToolPaths::resolve(
            Some(temp.path().join("nope/adb")),
            None,
            &ToolSettings::default(),
        );
        assert!(tools.adb_path().is_none());
        assert!(matches!(
            tools.adb(),
            Err(ToolkitError::ToolMissing { ref tool }) if tool == "adb"
        ));
    }

    #[test]
    fn test_missing_fastboot_error_message() {
        let tools = ToolPaths::new(None, None);
        let err = tools.fastboot().unwrap_err();
        assert_eq!(err.to_string(), "fastboot no encontrado");
    }
}
