//! redmi-tool - ADB/Fastboot helper for the Redmi A2 Lite
//!
//! Entry point for the redmi-tool command-line application.

use clap::Parser;
use tracing::Level;

use redmi_tool::cli::output::{display_error, OutputConfig};
use redmi_tool::cli::Cli;
use redmi_tool::error::exit_code;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber; logs go to stderr
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    // Apply output configuration globally
    OutputConfig::new(cli.json).apply_global();

    // Run the command and map failures to exit codes
    if let Err(e) = cli.run().await {
        display_error(&e);
        std::process::exit(exit_code(&e));
    }
}
