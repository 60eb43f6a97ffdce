//! Terminal UI state
//!
//! Pure state machine: key presses go in, [`Job`]s come out. Nothing here
//! touches the terminal or spawns processes, so it is tested directly.

use std::time::Duration;

use crossterm::event::KeyCode;
use ratatui::widgets::ListState;

use crate::config::defaults::{
    DEFAULT_BACKUP_DIR, DEFAULT_FLASH_PARTITION, DEFAULT_LOGCAT_FILE, QUERY_TIMEOUT,
};

/// Notebook tabs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Info,
    Control,
    Files,
    Backup,
    Flash,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Info, Tab::Control, Tab::Files, Tab::Backup, Tab::Flash];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Info => "Información",
            Tab::Control => "Control",
            Tab::Files => "Archivos",
            Tab::Backup => "Backup",
            Tab::Flash => "Flasheo",
        }
    }

    pub fn actions(self) -> &'static [Action] {
        match self {
            Tab::Info => &[Action::Info, Action::Devices, Action::CheckTools],
            Tab::Control => &[
                Action::RebootDevice,
                Action::RebootBootloader,
                Action::RebootRecovery,
            ],
            Tab::Files => &[Action::Pull, Action::Push, Action::Logcat],
            Tab::Backup => &[Action::Backup, Action::BackupZip],
            Tab::Flash => &[Action::FlashImage, Action::FlashPackage, Action::Unlock],
        }
    }

    /// Tabs whose actions can destroy data
    pub fn is_dangerous(self) -> bool {
        self == Tab::Flash
    }
}

/// One text prompt of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub initial: &'static str,
}

const fn field(label: &'static str, initial: &'static str) -> Field {
    Field { label, initial }
}

/// Everything the UI can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Info,
    Devices,
    CheckTools,
    RebootDevice,
    RebootBootloader,
    RebootRecovery,
    Pull,
    Push,
    Logcat,
    Backup,
    BackupZip,
    FlashImage,
    FlashPackage,
    Unlock,
}

impl Action {
    /// Entry shown in the action list
    pub fn label(self) -> &'static str {
        match self {
            Action::Info => "📋 Ver Información",
            Action::Devices => "📱 Listar Dispositivos",
            Action::CheckTools => "🔧 Verificar Herramientas",
            Action::RebootDevice => "🔄 Reiniciar (Sistema)",
            Action::RebootBootloader => "🔄 Reiniciar (Bootloader)",
            Action::RebootRecovery => "🔄 Reiniciar (Recovery)",
            Action::Pull => "📥 Pull (Descargar archivo)",
            Action::Push => "📤 Push (Subir archivo)",
            Action::Logcat => "📝 Ver Logcat",
            Action::Backup => "💾 Backup /sdcard (sin comprimir)",
            Action::BackupZip => "💾 Backup /sdcard (con ZIP)",
            Action::FlashImage => "⚡ Flash Imagen",
            Action::FlashPackage => "📦 Flash Paquete (JSON)",
            Action::Unlock => "🔓 Desbloquear Bootloader",
        }
    }

    /// Heading of the output block in the log
    pub fn title(self) -> &'static str {
        match self {
            Action::Info => "Información del Dispositivo",
            Action::Devices => "Dispositivos Conectados",
            Action::CheckTools => "Verificación de Herramientas",
            Action::RebootDevice => "Reinicio",
            Action::RebootBootloader => "Reinicio Bootloader",
            Action::RebootRecovery => "Reinicio Recovery",
            Action::Pull => "Pull - Descarga",
            Action::Push => "Push - Subida",
            Action::Logcat => "Logcat",
            Action::Backup => "Backup /sdcard",
            Action::BackupZip => "Backup /sdcard (comprimido)",
            Action::FlashImage => "Flash Imagen",
            Action::FlashPackage => "Flash Paquete",
            Action::Unlock => "Desbloqueo Bootloader",
        }
    }

    /// Values asked before running, in order
    pub fn fields(self) -> &'static [Field] {
        const PULL: &[Field] = &[
            field("Ruta en dispositivo (ej: /sdcard/archivo.txt):", ""),
            field("Carpeta de destino:", "."),
        ];
        const PUSH: &[Field] = &[
            field("Archivo a subir:", ""),
            field("Ruta destino (ej: /sdcard/):", "/sdcard/"),
        ];
        const LOGCAT: &[Field] = &[field("Archivo de salida:", DEFAULT_LOGCAT_FILE)];
        const BACKUP: &[Field] = &[field("Carpeta para backup:", DEFAULT_BACKUP_DIR)];
        const FLASH: &[Field] = &[
            field("Imagen (.img):", ""),
            field("Partición (ej: recovery, boot):", DEFAULT_FLASH_PARTITION),
        ];
        const PACKAGE: &[Field] = &[field("Manifiesto JSON:", "")];

        match self {
            Action::Pull => PULL,
            Action::Push => PUSH,
            Action::Logcat => LOGCAT,
            Action::Backup | Action::BackupZip => BACKUP,
            Action::FlashImage => FLASH,
            Action::FlashPackage => PACKAGE,
            _ => &[],
        }
    }

    /// Question asked in a yes/no dialog before running
    pub fn confirmation(self) -> Option<&'static str> {
        match self {
            Action::FlashImage => Some("¿Flashear imagen? Esto puede dañar el dispositivo."),
            Action::FlashPackage => Some("¿Flashear paquete? Esto puede dañar el dispositivo."),
            Action::Unlock => Some(
                "Desbloquear bootloader:\n\n\
                 ❌ Perderá TODOS los datos\n\
                 ❌ Invalidará la garantía\n\
                 ❌ No se puede revertir fácilmente\n\n\
                 ¿Estás SEGURO de que deseas continuar?",
            ),
            _ => None,
        }
    }

    /// Read-only queries get a bounded wait
    pub fn timeout(self) -> Option<Duration> {
        match self {
            Action::Info | Action::Devices | Action::CheckTools => Some(QUERY_TIMEOUT),
            _ => None,
        }
    }

    /// CLI arguments for this action given the prompted `values`
    pub fn arguments(self, values: &[String]) -> Vec<String> {
        let value = |i: usize| values.get(i).cloned().unwrap_or_default();
        let mut args: Vec<String> = match self {
            Action::Info => vec!["info".into()],
            Action::Devices => vec!["devices".into()],
            Action::CheckTools => vec!["check-tools".into()],
            Action::RebootDevice => vec!["reboot".into(), "device".into()],
            Action::RebootBootloader => vec!["reboot".into(), "bootloader".into()],
            Action::RebootRecovery => vec!["reboot".into(), "recovery".into()],
            Action::Pull => vec!["pull".into(), value(0), value(1)],
            Action::Push => vec!["push".into(), value(0), value(1)],
            Action::Logcat => vec!["logcat".into(), "--out".into(), value(0)],
            Action::Backup => vec!["backup".into(), value(0)],
            Action::BackupZip => vec!["backup".into(), value(0), "--compress".into()],
            Action::FlashImage => vec!["flash".into(), value(1), value(0)],
            Action::FlashPackage => vec!["flash-package".into(), value(0)],
            Action::Unlock => vec!["unlock-bootloader".into()],
        };
        // The dialog already asked; flashes also check the model
        if self.confirmation().is_some() {
            args.push("--confirm".into());
        }
        if matches!(self, Action::FlashImage | Action::FlashPackage) {
            args.push("--validate-device".into());
        }
        args
    }
}

/// A CLI run requested by the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub title: String,
    pub args: Vec<String>,
    pub timeout: Option<Duration>,
}

impl Job {
    fn new(action: Action, values: &[String]) -> Self {
        Self {
            title: action.title().to_string(),
            args: action.arguments(values),
            timeout: action.timeout(),
        }
    }
}

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Moving between tabs and actions
    Browse,
    /// Typing the value of `action.fields()[values.len()]`
    Prompt {
        action: Action,
        values: Vec<String>,
        buffer: String,
    },
    /// Waiting for a yes/no answer
    Confirm { action: Action, values: Vec<String> },
}

/// Terminal UI state
pub struct App {
    tab: usize,
    list_state: ListState,
    mode: Mode,
    log: String,
    running: usize,
    should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            tab: 0,
            list_state,
            mode: Mode::Browse,
            log: String::new(),
            running: 0,
            should_quit: false,
        }
    }

    pub fn tab(&self) -> Tab {
        Tab::ALL[self.tab]
    }

    pub fn tab_index(&self) -> usize {
        self.tab
    }

    pub fn list_state(&mut self) -> &mut ListState {
        &mut self.list_state
    }

    pub fn selected_action(&self) -> Action {
        let actions = self.tab().actions();
        actions[self.list_state.selected().unwrap_or(0).min(actions.len() - 1)]
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn log(&self) -> &str {
        &self.log
    }

    /// Jobs started and not yet reported back
    pub fn running(&self) -> usize {
        self.running
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Append worker output; one message per finished job
    pub fn job_finished(&mut self, message: &str) {
        self.running = self.running.saturating_sub(1);
        self.log.push_str(message);
    }

    /// Handle one key press, returning a job to launch if one was requested
    pub fn handle_key(&mut self, key: KeyCode) -> Option<Job> {
        let job = match std::mem::replace(&mut self.mode, Mode::Browse) {
            Mode::Browse => self.handle_browse_key(key),
            Mode::Prompt {
                action,
                values,
                buffer,
            } => self.handle_prompt_key(key, action, values, buffer),
            Mode::Confirm { action, values } => match key {
                KeyCode::Char('y' | 'Y' | 's' | 'S') => Some(Job::new(action, &values)),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => None,
                _ => {
                    self.mode = Mode::Confirm { action, values };
                    None
                }
            },
        };
        if job.is_some() {
            self.running += 1;
        }
        job
    }

    fn handle_browse_key(&mut self, key: KeyCode) -> Option<Job> {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') => self.log.clear(),
            KeyCode::Right | KeyCode::Tab => self.select_tab((self.tab + 1) % Tab::ALL.len()),
            KeyCode::Left | KeyCode::BackTab => {
                self.select_tab((self.tab + Tab::ALL.len() - 1) % Tab::ALL.len());
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let i = self.list_state.selected().unwrap_or(0);
                self.list_state.select(Some(i.saturating_sub(1)));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let i = self.list_state.selected().unwrap_or(0);
                let last = self.tab().actions().len() - 1;
                self.list_state.select(Some((i + 1).min(last)));
            }
            KeyCode::Enter => return self.start(self.selected_action(), Vec::new()),
            _ => {}
        }
        None
    }

    fn handle_prompt_key(
        &mut self,
        key: KeyCode,
        action: Action,
        mut values: Vec<String>,
        mut buffer: String,
    ) -> Option<Job> {
        match key {
            // Empty answer or Esc cancels the action
            KeyCode::Esc => None,
            KeyCode::Enter => {
                let value = buffer.trim();
                if value.is_empty() {
                    return None;
                }
                values.push(value.to_string());
                self.start(action, values)
            }
            KeyCode::Backspace => {
                buffer.pop();
                self.mode = Mode::Prompt {
                    action,
                    values,
                    buffer,
                };
                None
            }
            KeyCode::Char(c) => {
                buffer.push(c);
                self.mode = Mode::Prompt {
                    action,
                    values,
                    buffer,
                };
                None
            }
            _ => {
                self.mode = Mode::Prompt {
                    action,
                    values,
                    buffer,
                };
                None
            }
        }
    }

    /// Ask for the next missing value, then confirmation, then run
    fn start(&mut self, action: Action, values: Vec<String>) -> Option<Job> {
        if let Some(next) = action.fields().get(values.len()) {
            self.mode = Mode::Prompt {
                action,
                values,
                buffer: next.initial.to_string(),
            };
            return None;
        }
        if action.confirmation().is_some() {
            self.mode = Mode::Confirm { action, values };
            return None;
        }
        Some(Job::new(action, &values))
    }

    fn select_tab(&mut self, index: usize) {
        self.tab = index;
        self.list_state.select(Some(0));
    }
}
