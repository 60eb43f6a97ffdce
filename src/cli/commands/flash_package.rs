//! CLI command for `redmi-tool flash-package`
//!
//! Flashes every `(partition, image)` pair of a JSON manifest, in order,
//! after checking all images and confirming the printed plan.

use std::path::Path;

use anyhow::Result;

use crate::cli::output::print_success;
use crate::cli::session::Session;
use crate::core::device::validate_model;
use crate::core::exec::ExecutionMode;
use crate::core::package::{run_package, FlashManifest};

/// Execute the flash-package command
pub async fn execute(
    session: &Session,
    manifest: &Path,
    confirm: bool,
    dry_run: bool,
    validate_device: bool,
) -> Result<()> {
    let fastboot = session.tools().fastboot()?;

    if validate_device {
        let adb = session.tools().adb().ok();
        validate_model(
            &session.query_executor(),
            adb.as_ref(),
            &session.settings().expected_models(),
            session.confirmer(),
            confirm,
        )?;
    }

    let manifest = FlashManifest::load(manifest)?;
    let report = run_package(
        &manifest,
        &fastboot,
        &session.executor(ExecutionMode::from_flag(dry_run)),
        session.confirmer(),
        confirm,
    )?;
    tracing::info!(flashed = report.flashed.len(), "package finished");
    print_success("Paquete flasheado (revisa la salida anterior para errores).");
    Ok(())
}
