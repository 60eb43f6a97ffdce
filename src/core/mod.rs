//! Core business logic module
//!
//! Orchestration of the platform tools. Processes are never spawned here
//! directly; everything goes through [`exec::Executor`] and the
//! [`crate::infra::process::ProcessRunner`] it wraps.
//!
//! # Submodules
//!
//! - [`invocation`] - Program plus argument list value object
//! - [`platform_tools`] - `adb` / `fastboot` invocation builders
//! - [`exec`] - Normal and dry-run execution
//! - [`confirm`] - Confirmation gate for destructive operations
//! - [`device`] - Device listing and model validation
//! - [`package`] - Flash manifests and plan execution
//! - [`backup`] - Storage backup with exclusions and compression
//! - [`check_tools`] - Tool availability report
//! - [`settings`] - Optional `config.toml` overrides

pub mod backup;
pub mod check_tools;
pub mod confirm;
pub mod device;
pub mod exec;
pub mod invocation;
pub mod package;
pub mod platform_tools;
pub mod settings;
