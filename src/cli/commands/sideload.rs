//! CLI command for `redmi-tool sideload`
//!
//! The device must be in recovery, on "Apply update from ADB".

use std::path::Path;

use anyhow::Result;

use crate::cli::session::Session;
use crate::core::confirm::{require_confirmation, SIDELOAD_PROMPT};
use crate::core::exec::ExecutionMode;
use crate::error::{CommandError, ToolkitError, ValidationError};

/// Execute the sideload command
pub async fn execute(session: &Session, file: &Path, confirm: bool, dry_run: bool) -> Result<()> {
    let adb = session.tools().adb()?;
    if !file.exists() {
        return Err(ToolkitError::from(ValidationError::FileNotFound {
            path: file.to_path_buf(),
        })
        .into());
    }

    require_confirmation(confirm, session.confirmer(), SIDELOAD_PROMPT)?;
    println!(
        "Este comando requiere que el dispositivo esté en modo recovery en \"Apply update from ADB\""
    );

    let invocation = adb.sideload(file);
    let code = session
        .executor(ExecutionMode::from_flag(dry_run))
        .stream(&invocation)?;
    if code != 0 {
        return Err(ToolkitError::from(CommandError::Failed {
            invocation: invocation.to_string(),
            status: format!("código de salida {code}"),
        })
        .into());
    }
    Ok(())
}
