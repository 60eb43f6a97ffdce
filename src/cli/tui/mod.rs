//! TUI (Terminal User Interface) module
//!
//! Tabbed front-end over the CLI: every action runs `redmi-tool` itself as a
//! child process and the output lands in a shared log view.

pub mod app;
pub mod ui;
pub mod worker;

use std::io::{self, IsTerminal, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub use app::App;
use worker::{spawn_job, Launcher};

/// How long to wait for a key before checking for job output
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Check if running in an interactive terminal
pub fn is_terminal_interactive() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" || term.is_empty() {
            return false;
        }
    }
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

/// Terminal UI bound to a runtime and a launcher
pub struct DeviceTui {
    app: App,
    launcher: Arc<Launcher>,
    handle: Handle,
    tx: UnboundedSender<String>,
    rx: UnboundedReceiver<String>,
}

impl DeviceTui {
    pub fn new(launcher: Launcher, handle: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            app: App::new(),
            launcher: Arc::new(launcher),
            handle,
            tx,
            rx,
        }
    }

    /// Run the TUI until the user quits
    pub fn run(&mut self) -> anyhow::Result<()> {
        // Setup terminal
        enable_raw_mode().context("No se pudo preparar la terminal")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
        loop {
            while let Ok(message) = self.rx.try_recv() {
                self.app.job_finished(&message);
            }

            terminal.draw(|f| ui::draw(f, &mut self.app))?;

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }
                if let Some(job) = self.app.handle_key(key.code) {
                    spawn_job(&self.handle, Arc::clone(&self.launcher), job, self.tx.clone());
                }
                if self.app.should_quit() {
                    return Ok(());
                }
            }
        }
    }
}
