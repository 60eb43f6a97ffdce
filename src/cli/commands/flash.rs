//! CLI command implementation for `redmi-tool flash`
//!
//! Order of checks: `fastboot` present, image exists, optional model
//! validation, confirmation gate, then the single `fastboot flash` call.

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::output::{print_success, print_warning};
use crate::cli::session::Session;
use crate::core::confirm::{require_confirmation, FLASH_PROMPT};
use crate::core::device::validate_model;
use crate::core::exec::ExecutionMode;
use crate::error::{ToolkitError, ValidationError};

/// Arguments of `flash`
#[derive(Debug, Clone)]
pub struct FlashOptions {
    pub partition: String,
    pub image: PathBuf,
    /// Device is already in bootloader mode; skip the reminder
    pub use_fastboot: bool,
    pub confirm: bool,
    pub dry_run: bool,
    pub validate_device: bool,
}

/// Execute the flash command
pub async fn execute(session: &Session, options: &FlashOptions) -> Result<()> {
    let fastboot = session.tools().fastboot()?;
    if !options.image.exists() {
        return Err(ToolkitError::from(ValidationError::FileNotFound {
            path: options.image.clone(),
        })
        .into());
    }

    if options.validate_device {
        let adb = session.tools().adb().ok();
        validate_model(
            &session.query_executor(),
            adb.as_ref(),
            &session.settings().expected_models(),
            session.confirmer(),
            options.confirm,
        )?;
    }

    require_confirmation(options.confirm, session.confirmer(), FLASH_PROMPT)?;

    if !options.use_fastboot {
        print_warning("Asegúrate que el dispositivo esté en bootloader/fastboot mode.");
    }
    session
        .executor(ExecutionMode::from_flag(options.dry_run))
        .check(&fastboot.flash(&options.partition, &options.image))?;
    print_success("Flash completado (revisa la salida anterior para errores).");
    Ok(())
}
