//! Infrastructure layer of the termkit front end.
//!
//! OS-facing adapters: the stdin-backed [`terminal::StdinReader`] and the
//! TOML configuration file.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `termkit_core`, but is never imported by the `application` layer.

pub mod storage;
pub mod terminal;
