//! Platform-specific directory management
//!
//! Locates the configuration directory. `REDMI_TOOL_CONFIG_DIR` overrides the
//! platform default (XDG on Linux, `Library/Application Support` on macOS).

use std::env;
use std::path::PathBuf;

/// Environment variable overriding the config directory
pub const ENV_CONFIG_DIR: &str = "REDMI_TOOL_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "redmi-tool";

/// Settings file name inside the config directory
const CONFIG_FILE: &str = "config.toml";

/// Platform-specific directory provider
#[derive(Debug, Clone)]
pub struct ToolDirs {
    config_dir: PathBuf,
}

impl ToolDirs {
    /// Resolve directories from the environment or platform defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    /// Use an explicit config directory
    #[must_use]
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Config directory path
    ///
    /// - Linux: `$XDG_CONFIG_HOME/redmi-tool` or `~/.config/redmi-tool`
    /// - macOS: `~/Library/Application Support/redmi-tool`
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Path to `config.toml`
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    fn resolve_config_dir() -> PathBuf {
        if let Ok(path) = env::var(ENV_CONFIG_DIR) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            })
    }
}

impl Default for ToolDirs {
    fn default() -> Self {
        Self::new()
    }
}
