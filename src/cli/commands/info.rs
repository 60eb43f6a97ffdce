//! CLI command for `redmi-tool info`

use anyhow::Result;

use crate::cli::output::{is_json, print_json};
use crate::cli::session::Session;
use crate::config::defaults::INFO_PROPERTIES;
use crate::core::device::query_properties;

/// Execute the info command
pub async fn execute(session: &Session) -> Result<()> {
    let adb = session.tools().adb()?;
    let props = query_properties(&session.query_executor(), &adb, INFO_PROPERTIES);

    if is_json() {
        let map: serde_json::Map<String, serde_json::Value> = props
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect();
        print_json(&serde_json::Value::Object(map));
        return Ok(());
    }

    for (name, value) in props {
        println!("{name}: {value}");
    }
    Ok(())
}
