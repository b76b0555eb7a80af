//! Terminal input backed by the process's stdin and stdout.

use std::io::{self, BufRead, Write};

use crate::application::console::strip_ansi;
use crate::application::prompt::{trim_line_ending, LineReader};

/// Reads answers from stdin after writing the prompt to stdout.
///
/// Escape sequences typed into a cooked terminal (arrow keys, for instance)
/// are removed from the answer.
#[derive(Debug, Default)]
pub struct StdinReader;

impl StdinReader {
    pub fn new() -> Self {
        Self
    }
}

impl LineReader for StdinReader {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;
        drop(stdout);

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(clean_answer(line)))
    }
}

fn clean_answer(line: String) -> String {
    strip_ansi(&trim_line_ending(line))
}
