//! Device queries and model validation

use serde::Serialize;
use tracing::{info, warn};

use crate::config::defaults::MODEL_PROPERTY;
use crate::core::confirm::{Confirmer, MODEL_MISMATCH_PROMPT};
use crate::core::exec::Executor;
use crate::core::platform_tools::Adb;
use crate::error::{ToolkitError, ValidationError};

/// Header line printed by `adb devices`
const ADB_DEVICES_HEADER: &str = "List of devices attached";

/// One line of `adb devices` / `fastboot devices`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceEntry {
    /// Device serial number
    pub serial: String,
    /// Connection state (`device`, `unauthorized`, `fastboot`, ...)
    pub state: String,
}

/// Parse the device table printed by either tool
///
/// Skips the adb header, daemon start-up chatter and blank lines.
pub fn parse_device_list(output: &str) -> Vec<DeviceEntry> {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && *l != ADB_DEVICES_HEADER && !l.starts_with('*'))
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let serial = fields.next()?;
            let state = fields.next()?;
            Some(DeviceEntry {
                serial: serial.to_string(),
                state: state.to_string(),
            })
        })
        .collect()
}

/// Whether `model` contains any of `markers`, ignoring case
pub fn model_matches(model: &str, markers: &[String]) -> bool {
    let model = model.to_uppercase();
    markers
        .iter()
        .any(|marker| model.contains(&marker.to_uppercase()))
}

/// Outcome of a successful validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelCheck {
    /// Model matched a marker
    Matched(String),
    /// Model did not match but the operator chose to continue
    Accepted(String),
}

/// Check that the connected device is the expected model
///
/// The model query always runs for real, even when `exec` is in dry-run
/// mode, since it has no side effects on the device.
///
/// # Errors
///
/// - [`ToolkitError::ToolMissing`] when `adb` is not available
/// - [`ValidationError::ModelQuery`] when the query cannot be spawned,
///   exits non-zero or prints nothing
/// - [`ValidationError::ModelMismatch`] when the model differs and the
///   operator declines to continue
pub fn validate_model(
    exec: &Executor<'_>,
    adb: Option<&Adb>,
    markers: &[String],
    confirmer: &dyn Confirmer,
    auto_confirm: bool,
) -> Result<ModelCheck, ToolkitError> {
    let adb = adb.ok_or_else(|| ToolkitError::ToolMissing {
        tool: "adb".to_string(),
    })?;

    let model = exec
        .capture_success(&adb.getprop(MODEL_PROPERTY))
        .map_err(|e| ValidationError::ModelQuery {
            error: e.to_string(),
        })?
        .trim()
        .to_uppercase();
    if model.is_empty() {
        return Err(ValidationError::ModelQuery {
            error: "el dispositivo no informó ningún modelo".to_string(),
        }
        .into());
    }

    if model_matches(&model, markers) {
        println!("Dispositivo detectado: {model}");
        info!(%model, "device model accepted");
        return Ok(ModelCheck::Matched(model));
    }

    println!("Advertencia: el dispositivo parece ser {model}, no un Redmi A2 Lite.");
    warn!(%model, "unexpected device model");
    if auto_confirm {
        info!("continuing on unexpected model because --confirm was given");
        return Ok(ModelCheck::Accepted(model));
    }
    if confirmer.confirm(MODEL_MISMATCH_PROMPT) {
        Ok(ModelCheck::Accepted(model))
    } else {
        Err(ValidationError::ModelMismatch { model }.into())
    }
}

/// Read each of `properties` with `getprop`, in order
///
/// Query failures leave the value empty.
pub fn query_properties(
    exec: &Executor<'_>,
    adb: &Adb,
    properties: &[&str],
) -> Vec<(String, String)> {
    properties
        .iter()
        .map(|prop| {
            let value = exec
                .capture(&adb.getprop(prop))
                .unwrap_or_else(|e| {
                    warn!(property = prop, error = %e, "property query failed");
                    String::new()
                })
                .trim()
                .to_string();
            ((*prop).to_string(), value)
        })
        .collect()
}
