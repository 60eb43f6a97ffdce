//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod backup;
pub mod check_tools;
pub mod devices;
pub mod flash;
pub mod flash_package;
pub mod gui;
pub mod info;
pub mod logcat;
pub mod reboot;
pub mod sideload;
pub mod transfer;
pub mod unlock;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use crate::cli::session::Session;
use crate::config::defaults::{DEFAULT_BACKUP_DIR, DEFAULT_LOGCAT_FILE};
use crate::core::platform_tools::RebootTarget;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verifica que `adb` y `fastboot` estén disponibles
    CheckTools,

    /// Lista dispositivos conectados (modo ADB y Fastboot)
    Devices,

    /// Muestra información básica del dispositivo vía ADB
    Info,

    /// Reinicia: `device`, `bootloader`, `recovery`
    Reboot {
        /// Destino del reinicio
        #[arg(value_enum)]
        target: RebootTarget,
    },

    /// Flashea una imagen en una partición vía fastboot. Ej: `recovery twrp.img`
    Flash {
        /// Partición destino
        partition: String,

        /// Imagen a flashear
        image: PathBuf,

        /// Usar fastboot directamente (requiere estar en modo bootloader)
        #[arg(long)]
        use_fastboot: bool,

        /// Confirma que entiendes los riesgos del flasheo
        #[arg(long)]
        confirm: bool,

        /// Simula las acciones sin ejecutar comandos peligrosos
        #[arg(long)]
        dry_run: bool,

        /// Validar que sea un Redmi A2 Lite antes de flashear
        #[arg(long)]
        validate_device: bool,
    },

    /// Instala un paquete vía `adb sideload` (modo recovery)
    Sideload {
        /// Paquete zip
        file: PathBuf,

        /// Confirma que entiendes el uso de sideload
        #[arg(long)]
        confirm: bool,

        /// Simula las acciones sin ejecutar comandos peligrosos
        #[arg(long)]
        dry_run: bool,
    },

    /// Descarga un archivo o carpeta del dispositivo: `pull /sdcard/DCIM ./backup`
    Pull {
        /// Ruta en el dispositivo
        src: String,

        /// Destino local
        dst: PathBuf,
    },

    /// Sube un archivo al dispositivo: `push update.zip /sdcard/`
    Push {
        /// Archivo local
        src: PathBuf,

        /// Ruta en el dispositivo
        dst: String,
    },

    /// Realiza un backup del almacenamiento interno a la carpeta local `dst`
    ///
    /// Exclusiones por defecto: DCIM, Pictures, Videos, .thumbnails.
    /// Cada --exclude reemplaza la lista por defecto.
    Backup {
        /// Carpeta local de destino
        #[arg(default_value = DEFAULT_BACKUP_DIR)]
        dst: PathBuf,

        /// Comprimir el backup en un archivo zip al terminar
        #[arg(long)]
        compress: bool,

        /// Carpetas a excluir (ej: --exclude DCIM --exclude WhatsApp/Media)
        #[arg(long, value_name = "CARPETA")]
        exclude: Vec<String>,

        /// Simula las acciones sin ejecutar comandos peligrosos
        #[arg(long)]
        dry_run: bool,
    },

    /// Captura el logcat y lo guarda en un archivo (`adb logcat -d`)
    Logcat {
        /// Archivo donde guardar logcat -d
        #[arg(long, default_value = DEFAULT_LOGCAT_FILE)]
        out: PathBuf,
    },

    /// Flashea un paquete de imágenes descrito en un manifiesto JSON
    ///
    /// Formato: {"actions": [{"partition": "recovery", "image": "twrp.img"}, ...]}
    FlashPackage {
        /// Manifiesto JSON
        manifest: PathBuf,

        /// Confirma que entiendes los riesgos
        #[arg(long)]
        confirm: bool,

        /// Simula las acciones sin ejecutar comandos peligrosos
        #[arg(long)]
        dry_run: bool,

        /// Validar que sea un Redmi A2 Lite antes de flashear
        #[arg(long)]
        validate_device: bool,
    },

    /// Intenta desbloquear el bootloader vía fastboot
    UnlockBootloader {
        /// Confirma que entiendes las consecuencias
        #[arg(long)]
        confirm: bool,

        /// Simula las acciones sin ejecutar comandos peligrosos
        #[arg(long)]
        dry_run: bool,
    },

    /// Abre la interfaz de terminal
    Gui,
}

impl Commands {
    /// Run the command
    pub async fn run(self, session: &Session) -> Result<()> {
        match self {
            Self::CheckTools => check_tools::execute(session).await,
            Self::Devices => devices::execute(session).await,
            Self::Info => info::execute(session).await,
            Self::Reboot { target } => reboot::execute(session, target).await,
            Self::Flash {
                partition,
                image,
                use_fastboot,
                confirm,
                dry_run,
                validate_device,
            } => {
                let options = flash::FlashOptions {
                    partition,
                    image,
                    use_fastboot,
                    confirm,
                    dry_run,
                    validate_device,
                };
                flash::execute(session, &options).await
            }
            Self::Sideload {
                file,
                confirm,
                dry_run,
            } => sideload::execute(session, &file, confirm, dry_run).await,
            Self::Pull { src, dst } => transfer::execute_pull(session, &src, &dst).await,
            Self::Push { src, dst } => transfer::execute_push(session, &src, &dst).await,
            Self::Backup {
                dst,
                compress,
                exclude,
                dry_run,
            } => backup::execute(session, dst, compress, exclude, dry_run).await,
            Self::Logcat { out } => logcat::execute(session, &out).await,
            Self::FlashPackage {
                manifest,
                confirm,
                dry_run,
                validate_device,
            } => flash_package::execute(session, &manifest, confirm, dry_run, validate_device).await,
            Self::UnlockBootloader { confirm, dry_run } => {
                unlock::execute(session, confirm, dry_run).await
            }
            Self::Gui => gui::execute(session).await,
        }
    }
}
