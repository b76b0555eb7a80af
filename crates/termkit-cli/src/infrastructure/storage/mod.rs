//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads `config.toml` from the platform config
//! directory (or an explicit path), falls back to defaults when the file does
//! not exist, and writes a starter file for `termkit config init`.

pub mod config;
