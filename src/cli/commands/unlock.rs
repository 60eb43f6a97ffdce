//! CLI command for `redmi-tool unlock-bootloader`

use anyhow::Result;
use tracing::warn;

use crate::cli::output::{print_info, print_success};
use crate::cli::session::Session;
use crate::core::confirm::{require_confirmation, UNLOCK_PROMPT};
use crate::core::exec::ExecutionMode;

/// Execute the unlock-bootloader command
pub async fn execute(session: &Session, confirm: bool, dry_run: bool) -> Result<()> {
    let fastboot = session.tools().fastboot()?;
    require_confirmation(confirm, session.confirmer(), UNLOCK_PROMPT)?;

    print_info("Desbloqueando bootloader... (puede pedir confirmación en el teléfono)");
    warn!("sending bootloader unlock request");
    // Some devices only accept `fastboot oem unlock`
    session
        .executor(ExecutionMode::from_flag(dry_run))
        .check(&fastboot.unlock())?;
    print_success("Operación enviada. Sigue las instrucciones en el dispositivo.");
    Ok(())
}
