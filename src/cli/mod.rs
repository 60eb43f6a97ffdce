//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;
pub mod session;
pub mod tui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use commands::Commands;
use session::Session;

/// Herramienta multi-uso para Redmi A2 Lite (Windows / Linux / macOS)
///
/// Requiere Android platform-tools (`adb`, `fastboot`) y la depuración USB
/// habilitada en el teléfono.
#[derive(Parser, Debug)]
#[command(name = "redmi-tool")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Más detalle en los logs (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Salida JSON (check-tools, devices, info)
    #[arg(long, global = true)]
    pub json: bool,

    /// Ruta al ejecutable adb
    #[arg(long, env = "REDMI_TOOL_ADB", global = true, value_name = "PATH")]
    pub adb: Option<PathBuf>,

    /// Ruta al ejecutable fastboot
    #[arg(long, env = "REDMI_TOOL_FASTBOOT", global = true, value_name = "PATH")]
    pub fastboot: Option<PathBuf>,

    /// Archivo de configuración (por defecto <config_dir>/redmi-tool/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        if let Some(cmd) = self.command {
            let session = Session::load(self.config.as_deref(), self.adb, self.fastboot)?;
            cmd.run(&session).await
        } else {
            // No subcommand provided, show help
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
