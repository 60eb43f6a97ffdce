//! Confirmation gate for destructive operations
//!
//! Flashing, sideloading and unlocking the bootloader need either an explicit
//! `--confirm` flag or an affirmative answer from a [`Confirmer`].

use tracing::info;

use crate::error::ToolkitError;

/// Something that can answer a yes/no question
pub trait Confirmer: Send + Sync {
    /// Ask `prompt`; `true` means proceed
    fn confirm(&self, prompt: &str) -> bool;
}

/// Answers yes to everything
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

impl Confirmer for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Risk prompt for flashing one image
pub const FLASH_PROMPT: &str =
    "Comando peligroso: flashear puede borrar datos o dañar el dispositivo. ¿Deseas continuar?";

/// Risk prompt for running a flash plan
pub const PACKAGE_PROMPT: &str = "¿Deseas ejecutar el plan anterior?";

/// Risk prompt for `adb sideload`
pub const SIDELOAD_PROMPT: &str = "Sideload puede modificar el sistema. ¿Deseas continuar?";

/// Risk prompt for unlocking the bootloader
pub const UNLOCK_PROMPT: &str =
    "Comando peligroso: perderás datos y se puede invalidar garantía. ¿Deseas continuar?";

/// Prompt shown when the connected model is not the expected one
pub const MODEL_MISMATCH_PROMPT: &str = "¿Deseas continuar de todas formas?";

/// Interpret a typed answer; anything but an explicit yes is a no
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí"
    )
}

/// Pass when `confirmed` is set or the operator agrees to `prompt`
///
/// # Errors
///
/// Returns [`ToolkitError::Cancelled`] when the operator declines.
pub fn require_confirmation(
    confirmed: bool,
    confirmer: &dyn Confirmer,
    prompt: &str,
) -> Result<(), ToolkitError> {
    if confirmed {
        info!("confirmation bypassed with --confirm");
        return Ok(());
    }
    if confirmer.confirm(prompt) {
        Ok(())
    } else {
        Err(ToolkitError::Cancelled)
    }
}
