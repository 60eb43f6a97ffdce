//! Output formatting and progress indicators
//!
//! Status-prefixed messages, spinners and the final error report. Core
//! operations print their own progress lines; this module covers what the
//! command layer adds on top.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::ToolkitError;

static JSON_OUTPUT: AtomicBool = AtomicBool::new(false);

/// Process-wide output preferences
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Machine readable output
    pub json: bool,
}

impl OutputConfig {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Make these preferences visible to [`is_json`]
    pub fn apply_global(self) {
        JSON_OUTPUT.store(self.json, Ordering::Relaxed);
    }
}

/// Whether `--json` was given
pub fn is_json() -> bool {
    JSON_OUTPUT.load(Ordering::Relaxed)
}

/// Create a spinner for operations with unknown duration
///
/// Hidden in JSON mode so stdout stays parseable.
pub fn create_spinner(message: &str) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}

pub fn print_success(message: &str) {
    println!("{} {message}", status::SUCCESS);
}

pub fn print_warning(message: &str) {
    println!("{} {message}", status::WARNING);
}

pub fn print_info(message: &str) {
    println!("{} {message}", status::INFO);
}

/// Print a JSON document on stdout
pub fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

/// Report a failed command on stderr
///
/// Cancellation is reported with its plain message; everything else gets an
/// `Error:` prefix and its cause chain.
pub fn display_error(error: &anyhow::Error) {
    if matches!(
        error.downcast_ref::<ToolkitError>(),
        Some(ToolkitError::Cancelled)
    ) {
        eprintln!("{error}");
        return;
    }
    eprintln!("{} Error: {error:#}", status::ERROR);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_hidden_in_json_mode() {
        OutputConfig::new(true).apply_global();
        assert!(is_json());
        assert!(create_spinner("Capturando logcat...").is_hidden());
        OutputConfig::new(false).apply_global();
        assert!(!is_json());
    }
}
