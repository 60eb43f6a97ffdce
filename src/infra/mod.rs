//! Infrastructure layer
//!
//! Handles all I/O: external processes, tool lookup, the filesystem and the
//! terminal. This module is the only place where side effects occur.

pub mod dirs;
pub mod filesystem;
pub mod process;
pub mod terminal;
pub mod tools;
