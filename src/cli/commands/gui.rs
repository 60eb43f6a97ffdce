//! CLI command for `redmi-tool gui`
//!
//! Launches the terminal UI. Without an interactive terminal it prints what
//! the UI offers and exits.

use anyhow::Result;
use tokio::runtime::Handle;

use crate::cli::session::Session;
use crate::cli::tui::worker::Launcher;
use crate::cli::tui::{is_terminal_interactive, DeviceTui};

/// Execute the gui command
pub async fn execute(session: &Session) -> Result<()> {
    if !is_terminal_interactive() {
        print_non_interactive_info();
        return Ok(());
    }

    let launcher = Launcher::current(session)?;
    let handle = Handle::current();
    // The UI loop blocks on terminal events; jobs keep running on the runtime
    tokio::task::block_in_place(move || DeviceTui::new(launcher, handle).run())
}

fn print_non_interactive_info() {
    println!("Redmi A2 Lite Tool (TUI)");
    println!();
    println!("⚠️  Se requiere una terminal interactiva para la interfaz.");
    println!("   Usa los subcomandos directamente, por ejemplo `redmi-tool info`.");
    println!();
    println!("Pestañas de la interfaz:");
    println!("  • Información - info, dispositivos, verificación de herramientas");
    println!("  • Control - reinicio a sistema, bootloader o recovery");
    println!("  • Archivos - pull, push y logcat");
    println!("  • Backup - backup de /sdcard, con o sin ZIP");
    println!("  • Flasheo - flash de imagen, paquete JSON y desbloqueo de bootloader");
}
