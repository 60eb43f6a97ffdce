//! CLI command for `redmi-tool reboot`

use anyhow::Result;
use tracing::info;

use crate::cli::session::Session;
use crate::core::exec::ExecutionMode;
use crate::core::platform_tools::RebootTarget;

/// Execute the reboot command
pub async fn execute(session: &Session, target: RebootTarget) -> Result<()> {
    let adb = session.tools().adb()?;
    info!(%target, "rebooting device");
    session.executor(ExecutionMode::Normal).check(&adb.reboot(target))?;
    Ok(())
}
