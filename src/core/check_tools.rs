//! Platform tool availability
//!
//! Reports whether `adb` and `fastboot` were resolved, independent of any
//! device being connected.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::defaults::{ADB_TOOL, FASTBOOT_TOOL};
use crate::core::exec::Executor;
use crate::core::invocation::Invocation;
use crate::core::platform_tools::{Adb, Fastboot};
use crate::infra::tools::ToolPaths;

/// Hint printed when a tool is missing
pub const INSTALL_HINT: &str =
    "Instala Android platform-tools y asegúrate que estén en PATH.";

/// Availability of one tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolCheck {
    /// Tool name
    pub name: String,
    /// Resolved executable, if any
    pub path: Option<PathBuf>,
    /// Version reported by the tool, if it could be read
    pub version: Option<String>,
}

impl ToolCheck {
    /// Whether the tool was found
    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    /// Status word shown to the operator
    pub fn status(&self) -> &'static str {
        if self.found() {
            "OK"
        } else {
            "NO ENCONTRADO"
        }
    }
}

/// Availability of both tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolReport {
    pub checks: Vec<ToolCheck>,
}

impl ToolReport {
    /// Whether every tool was found
    pub fn all_found(&self) -> bool {
        self.checks.iter().all(ToolCheck::found)
    }
}

/// Extract a version string from tool output
pub fn extract_version(output: &str) -> Option<String> {
    let version_regex =
        regex::Regex::new(r"(?i)version\s+v?(\d+\.\d+(?:\.\d+)?(?:[-.\w]*)?)").ok()?;
    version_regex
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn check_one(
    exec: &Executor<'_>,
    name: &str,
    path: Option<PathBuf>,
    version: impl Fn(&PathBuf) -> Invocation,
) -> ToolCheck {
    let version = path
        .as_ref()
        .and_then(|p| exec.capture(&version(p)).ok())
        .and_then(|out| extract_version(&out));
    ToolCheck {
        name: name.to_string(),
        path,
        version,
    }
}

/// Check both platform tools
///
/// The version query is best effort: a tool that resolves but cannot report
/// a version is still `OK`.
pub fn check_tools(exec: &Executor<'_>, tools: &ToolPaths) -> ToolReport {
    ToolReport {
        checks: vec![
            check_one(exec, ADB_TOOL, tools.adb_path().map(PathBuf::from), |p| {
                Adb::new(p).version()
            }),
            check_one(exec, FASTBOOT_TOOL, tools.fastboot_path().map(PathBuf::from), |p| {
                Fastboot::new(p).version()
            }),
        ],
    }
}
