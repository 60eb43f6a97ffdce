//! CLI command for `redmi-tool devices`
//!
//! Lists devices seen by `adb` and by `fastboot`. Either tool may be missing;
//! its section is then replaced by a notice.

use anyhow::Result;

use crate::cli::output::{is_json, print_json};
use crate::cli::session::Session;
use crate::core::device::parse_device_list;
use crate::core::exec::Executor;
use crate::core::invocation::Invocation;
use crate::error::ToolkitError;

/// Execute the devices command
pub async fn execute(session: &Session) -> Result<()> {
    let exec = session.query_executor();
    let tools = session.tools();

    let adb = tools.adb().map(|adb| adb.devices());
    let fastboot = tools.fastboot().map(|fastboot| fastboot.devices());

    if is_json() {
        print_json(&serde_json::json!({
            "adb": listing(&exec, &adb)?.map(|out| parse_device_list(&out)),
            "fastboot": listing(&exec, &fastboot)?.map(|out| parse_device_list(&out)),
        }));
        return Ok(());
    }

    print_section(&exec, "adb", &adb)?;
    print_section(&exec, "fastboot", &fastboot)?;
    Ok(())
}

fn listing(
    exec: &Executor<'_>,
    invocation: &Result<Invocation, ToolkitError>,
) -> Result<Option<String>> {
    match invocation {
        Ok(inv) => Ok(Some(exec.capture(inv)?)),
        Err(_) => Ok(None),
    }
}

fn print_section(
    exec: &Executor<'_>,
    tool: &str,
    invocation: &Result<Invocation, ToolkitError>,
) -> Result<()> {
    match listing(exec, invocation)? {
        Some(out) => {
            println!("--- {tool} devices ---");
            println!("{out}");
        }
        None => println!("{tool} no encontrado"),
    }
    Ok(())
}
