//! CLI command for `redmi-tool backup`

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::session::Session;
use crate::core::backup::{run_backup, BackupOptions};
use crate::core::exec::ExecutionMode;

/// Execute the backup command
///
/// A non-empty `exclude` list replaces the configured defaults.
pub async fn execute(
    session: &Session,
    dst: PathBuf,
    compress: bool,
    exclude: Vec<String>,
    dry_run: bool,
) -> Result<()> {
    let adb = session.tools().adb()?;
    let settings = session.settings();

    let options = BackupOptions {
        destination: dst,
        remote_root: settings.backup_remote_root().to_string(),
        excludes: if exclude.is_empty() {
            settings.backup_excludes()
        } else {
            exclude
        },
        compress,
    };

    let report = run_backup(
        &options,
        &adb,
        &session.executor(ExecutionMode::from_flag(dry_run)),
    )?;
    tracing::info!(
        pulled = report.pulled.len(),
        skipped = report.skipped.len(),
        pruned = report.pruned.len(),
        "backup finished"
    );
    Ok(())
}
