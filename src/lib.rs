//! redmi-tool - ADB/Fastboot helper for the Redmi A2 Lite
//!
//! Thin orchestration layer over the Android platform tools: every operation
//! is a validated invocation of `adb` or `fastboot`, with a confirmation gate
//! in front of anything destructive.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface, output formatting and the terminal UI
//! - [`core`] - Orchestration logic (invocations, validation, manifests, backups)
//! - [`infra`] - Infrastructure layer (processes, tool lookup, filesystem, prompts)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and exit codes

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
