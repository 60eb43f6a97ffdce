//! Filesystem operations
//!
//! Local file and directory writes, with errors carrying the offending path.

use std::path::Path;

use crate::error::ToolkitError;

fn io_error(path: &Path, e: &std::io::Error) -> ToolkitError {
    ToolkitError::Io {
        path: path.to_path_buf(),
        error: e.to_string(),
    }
}

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), ToolkitError> {
    std::fs::create_dir_all(path).map_err(|e| io_error(path, &e))
}

/// Remove a file, or a directory and all its contents
///
/// Missing paths are not an error.
pub fn remove_path(path: &Path) -> Result<(), ToolkitError> {
    if path.is_dir() {
        std::fs::remove_dir_all(path).map_err(|e| io_error(path, &e))
    } else if path.exists() {
        std::fs::remove_file(path).map_err(|e| io_error(path, &e))
    } else {
        Ok(())
    }
}

/// Write content to a file, creating parent directories
pub fn write_file(path: &Path, content: &str) -> Result<(), ToolkitError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }
    std::fs::write(path, content).map_err(|e| io_error(path, &e))
}
