//! Application layer of the termkit front end.
//!
//! Code in this layer talks to the user only through the [`prompt::LineReader`]
//! trait and a `std::io::Write` sink, so every flow can be driven by scripted
//! input in tests.  It never touches stdin, the config file or the process
//! exit status directly; `main.rs` and the infrastructure layer do that.
//!
//! # Sub-modules
//!
//! - **`console`**     – ANSI coloring with an explicit on/off [`console::Palette`].
//! - **`prompt`**      – Validated line input, IPv4 input and yes/no questions.
//! - **`menu`**        – Numbered menu selection built on the prompter.
//! - **`commands`**    – One function per `termkit` subcommand.
//! - **`interactive`** – The `termkit menu` loop tying the above together.

pub mod commands;
pub mod console;
pub mod interactive;
pub mod menu;
pub mod prompt;
