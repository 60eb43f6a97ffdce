//! Configuration constants
//!
//! Default values used when no `config.toml` overrides them.

pub mod defaults;
