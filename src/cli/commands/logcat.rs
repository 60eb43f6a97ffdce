//! CLI command for `redmi-tool logcat`
//!
//! Dumps the current log buffer (`adb logcat -d`) into a local file.

use std::path::Path;

use anyhow::Result;

use crate::cli::output::{create_spinner, print_success};
use crate::cli::session::Session;
use crate::infra::filesystem;

/// Execute the logcat command
pub async fn execute(session: &Session, out: &Path) -> Result<()> {
    let adb = session.tools().adb()?;

    let spinner = create_spinner("Capturando logcat...");
    let data = session.query_executor().capture(&adb.logcat_dump());
    spinner.finish_and_clear();

    filesystem::write_file(out, &data?)?;
    print_success(&format!("Log guardado en {}", out.display()));
    Ok(())
}
