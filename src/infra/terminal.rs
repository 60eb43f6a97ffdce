//! Interactive terminal prompts

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::core::confirm::{is_affirmative, Confirmer};

/// [`Confirmer`] reading the answer from standard input
///
/// End of input counts as "no".
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "{prompt} [y/N] ");
        let _ = stderr.flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(0) | Err(_) => {
                let _ = writeln!(stderr);
                debug!("no answer on stdin, treating as no");
                false
            }
            Ok(_) => is_affirmative(&answer),
        }
    }
}
