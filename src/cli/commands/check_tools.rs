//! CLI command for `redmi-tool check-tools`
//!
//! Reports whether `adb` and `fastboot` are available. A missing tool is
//! reported, not treated as a failure.

use anyhow::Result;

use crate::cli::output::{is_json, print_json};
use crate::cli::session::Session;
use crate::core::check_tools::{check_tools, ToolReport, INSTALL_HINT};

/// Execute the check-tools command
pub async fn execute(session: &Session) -> Result<()> {
    let report = check_tools(&session.query_executor(), session.tools());

    if is_json() {
        print_json(&serde_json::json!({
            "all_found": report.all_found(),
            "tools": report.checks,
        }));
        return Ok(());
    }

    for line in render(&report) {
        println!("{line}");
    }
    Ok(())
}

/// Text lines for a report
pub fn render(report: &ToolReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .checks
        .iter()
        .map(|check| match &check.version {
            Some(version) => format!("{}: {} ({version})", check.name, check.status()),
            None => format!("{}: {}", check.name, check.status()),
        })
        .collect();
    if !report.all_found() {
        lines.push(INSTALL_HINT.to_string());
    }
    lines
}
