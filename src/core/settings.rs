//! User settings
//!
//! Reads optional overrides from `config.toml` in the config directory.
//! Every key is optional; absent keys fall back to `config::defaults`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::defaults::{BACKUP_REMOTE_ROOT, DEFAULT_BACKUP_EXCLUDES, EXPECTED_MODEL_MARKERS};
use crate::error::SettingsError;
use crate::infra::dirs::ToolDirs;

/// Settings for redmi-tool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Explicit tool locations
    #[serde(default)]
    pub tools: ToolSettings,

    /// Device validation
    #[serde(default)]
    pub device: DeviceSettings,

    /// Backup defaults
    #[serde(default)]
    pub backup: BackupSettings,
}

/// `[tools]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Path to `adb`
    pub adb: Option<PathBuf>,

    /// Path to `fastboot`
    pub fastboot: Option<PathBuf>,
}

/// `[device]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceSettings {
    /// Model substrings accepted by `--validate-device`
    pub expected_models: Option<Vec<String>>,
}

/// `[backup]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackupSettings {
    /// Folders skipped when `--exclude` is not given
    pub excludes: Option<Vec<String>>,

    /// Device directory copied by `backup`
    pub remote_root: Option<String>,
}

impl Settings {
    /// Load settings from the config directory
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Parse` if the file exists but is not valid TOML.
    pub fn load(dirs: &ToolDirs) -> Result<Self, SettingsError> {
        Self::load_from_path(&dirs.config_path())
    }

    /// Load settings from a specific path
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Read` when the file cannot be read and
    /// `SettingsError::Parse` when it is not valid TOML.
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| SettingsError::Parse {
            path: path.display().to_string(),
            error: e.to_string(),
        })
    }

    /// Effective model markers
    #[must_use]
    pub fn expected_models(&self) -> Vec<String> {
        self.device
            .expected_models
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| to_owned(EXPECTED_MODEL_MARKERS))
    }

    /// Effective backup exclusions
    #[must_use]
    pub fn backup_excludes(&self) -> Vec<String> {
        self.backup
            .excludes
            .clone()
            .unwrap_or_else(|| to_owned(DEFAULT_BACKUP_EXCLUDES))
    }

    /// Effective backup source directory
    #[must_use]
    pub fn backup_remote_root(&self) -> &str {
        self.backup
            .remote_root
            .as_deref()
            .unwrap_or(BACKUP_REMOTE_ROOT)
    }
}

fn to_owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}
