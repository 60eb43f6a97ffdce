//! CLI commands for `redmi-tool pull` and `redmi-tool push`

use std::path::Path;

use anyhow::Result;

use crate::cli::output::print_success;
use crate::cli::session::Session;
use crate::core::exec::ExecutionMode;

/// Copy `src` from the device to the local `dst`
pub async fn execute_pull(session: &Session, src: &str, dst: &Path) -> Result<()> {
    let adb = session.tools().adb()?;
    session.executor(ExecutionMode::Normal).check(&adb.pull(src, dst))?;
    print_success("Pull completado.");
    Ok(())
}

/// Copy the local `src` to `dst` on the device
pub async fn execute_push(session: &Session, src: &Path, dst: &str) -> Result<()> {
    let adb = session.tools().adb()?;
    session.executor(ExecutionMode::Normal).check(&adb.push(src, dst))?;
    print_success("Push completado.");
    Ok(())
}
