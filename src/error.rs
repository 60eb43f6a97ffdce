//! Error types for redmi-tool
//!
//! Domain-specific error types using thiserror. User-facing messages are in
//! Spanish, like the rest of the console output.

use std::path::PathBuf;
use thiserror::Error;

/// Exit status for precondition, validation and external command failures
pub const EXIT_FAILURE: i32 = 1;

/// Exit status when the operator declines a confirmation prompt
pub const EXIT_CANCELLED: i32 = 2;

/// Failures of a spawned external program
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The program could not be started at all
    #[error("Error ejecutando: {invocation} -> {error}")]
    Spawn { invocation: String, error: String },

    /// The program ran and reported failure
    #[error("Error ejecutando: {invocation} -> {status}")]
    Failed { invocation: String, status: String },
}

/// Flash manifest errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file could not be read
    #[error("Error leyendo manifiesto '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Manifest is not valid JSON or has the wrong shape
    #[error("Error leyendo manifiesto '{path}': {error}")]
    Parse { path: PathBuf, error: String },

    /// No actions to run
    #[error("No se encontraron acciones en el manifiesto.")]
    Empty,

    /// An action names an empty partition
    #[error("La acción #{index} no indica partición")]
    MissingPartition { index: usize },

    /// An action references an image that does not exist
    #[error("Imagen no encontrada: {} (partition: {partition})", image.display())]
    MissingImage { partition: String, image: PathBuf },

    /// A flash step failed; later steps were not run
    #[error("Falló el paso {step}/{total} (flash {partition}); {skipped} acción(es) sin ejecutar")]
    StepFailed {
        step: usize,
        total: usize,
        partition: String,
        skipped: usize,
        #[source]
        source: CommandError,
    },
}

/// Pre-flight validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Connected device is not the expected model and the operator declined
    #[error("El dispositivo parece ser {model}, no un Redmi A2 Lite")]
    ModelMismatch { model: String },

    /// Model query could not be performed
    #[error("Error validando dispositivo: {error}")]
    ModelQuery { error: String },

    /// A local input file does not exist
    #[error("Archivo no encontrado: {}", path.display())]
    FileNotFound { path: PathBuf },
}

/// Settings file errors
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read config file
    #[error("No se pudo leer la configuración '{path}': {error}")]
    Read { path: String, error: String },

    /// Failed to parse config file
    #[error("Configuración inválida '{path}': {error}")]
    Parse { path: String, error: String },
}

/// Top-level redmi-tool error type
#[derive(Error, Debug)]
pub enum ToolkitError {
    /// Required external executable is not available
    #[error("{tool} no encontrado")]
    ToolMissing { tool: String },

    /// Validation error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Manifest error
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// External command error
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Settings error
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Operator declined a confirmation prompt
    #[error("Operación cancelada por usuario.")]
    Cancelled,

    /// Local filesystem error
    #[error("Error de E/S en '{}': {error}", path.display())]
    Io { path: PathBuf, error: String },

    /// Backup archive could not be written
    #[error("No se pudo comprimir el backup: {0}")]
    Archive(String),
}

impl ToolkitError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Cancelled => EXIT_CANCELLED,
            _ => EXIT_FAILURE,
        }
    }
}

/// Exit status for an error surfaced through `anyhow`
///
/// Walks the source chain so context added by the command layer does not hide
/// a cancellation.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ToolkitError>())
        .map_or(EXIT_FAILURE, ToolkitError::exit_code)
}
