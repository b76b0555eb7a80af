//! Validated line prompting.
//!
//! [`Prompter`] repeats a question until the answer passes a validator,
//! printing the error message in red between attempts.  Input comes from a
//! [`LineReader`]; output goes to any `Write` sink.

use std::collections::VecDeque;
use std::io::{self, Write};

use termkit_core::{is_ipv4, is_ipv4_with_prefix};
use thiserror::Error;

use super::console::Palette;

/// Source of user input lines.
pub trait LineReader {
    /// Shows `prompt` and reads one line without its line terminator.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Propagates terminal I/O errors.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Error type for prompting.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Input ended before an acceptable answer was given.
    #[error("input closed before a valid answer was given")]
    Eof,

    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Asks questions over a [`LineReader`] and writes feedback to `out`.
pub struct Prompter<R, W> {
    reader: R,
    out: W,
    palette: Palette,
}

impl<R: LineReader, W: Write> Prompter<R, W> {
    pub fn new(reader: R, out: W, palette: Palette) -> Self {
        Self {
            reader,
            out,
            palette,
        }
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Consumes the prompter, returning the reader and the output sink.
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.out)
    }

    /// Writes one line of output.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")
    }

    /// Reads one raw line, mapping end of input to [`PromptError::Eof`].
    pub(crate) fn read_raw(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.reader.read_line(prompt)?.ok_or(PromptError::Eof)
    }

    /// Asks until `validator` accepts the answer.
    ///
    /// An empty answer returns `default` when one is given, without consulting
    /// the validator.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Eof`] if input ends first.
    pub fn input(
        &mut self,
        validator: impl Fn(&str) -> bool,
        message: &str,
        err_message: &str,
        default: Option<&str>,
    ) -> Result<String, PromptError> {
        loop {
            let answer = self.read_raw(message)?;
            if answer.is_empty() {
                if let Some(default) = default {
                    return Ok(default.to_string());
                }
            }
            if validator(&answer) {
                return Ok(answer);
            }
            let err = self.palette.red(err_message);
            self.say(&err)?;
        }
    }

    /// Asks for an IPv4 address, or `<ipv4>/<prefix>` when `with_prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Eof`] if input ends first.
    pub fn ipv4(&mut self, default: Option<&str>, with_prefix: bool) -> Result<String, PromptError> {
        let mut message = String::from("Please input ipv4");
        if with_prefix {
            message.push_str("/prefix");
        }
        if let Some(default) = default {
            message.push_str(&format!("(default:{default})"));
        }
        message.push_str(": ");

        let validator: fn(&str) -> bool = if with_prefix {
            is_ipv4_with_prefix
        } else {
            is_ipv4
        };
        self.input(validator, &message, "invalid value.", default)
    }

    /// Asks a yes/no question.
    ///
    /// Answers starting with `y`/`Y` mean yes, `n`/`N` mean no; anything else
    /// (including an empty line) picks `default`.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Eof`] if input ends first.
    pub fn yes_no(&mut self, message: &str, default: bool) -> Result<bool, PromptError> {
        let suffix = if default { " [Y/n]?: " } else { " [y/N]?: " };
        let question = self.palette.yellow(&format!("{message}{suffix}"));
        let answer = self.read_raw(&question)?;
        Ok(match answer.chars().next() {
            Some('y' | 'Y') => true,
            Some('n' | 'N') => false,
            _ => default,
        })
    }
}

/// A [`LineReader`] that replays a fixed script and records every prompt.
///
/// Always compiled so integration tests and demos can drive the prompter
/// without a terminal.
#[derive(Debug, Default)]
pub struct ScriptedReader {
    answers: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedReader {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }
}

/// Drops one trailing `\n` or `\r\n`.
pub(crate) fn trim_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
