//! Numbered menu selection.

use std::io::Write;

use super::prompt::{LineReader, PromptError, Prompter};

/// Which escape hatches a menu offers besides the numbered items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuOptions {
    /// `q` or `0` leaves the menu with [`MenuChoice::Exit`].
    pub allow_exit: bool,
    /// `b` leaves the menu with [`MenuChoice::Back`].
    pub allow_back: bool,
}

/// Outcome of [`Prompter::choose_num`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Zero-based index of the chosen item.
    Selected(usize),
    Back,
    Exit,
}

impl<R: LineReader, W: Write> Prompter<R, W> {
    /// Shows `items` as a numbered list and asks until a valid choice is made.
    ///
    /// Items are numbered from 1.  Leaving the program on `Exit` is the
    /// caller's decision.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Eof`] if input ends first.
    pub fn choose_num<S: AsRef<str>>(
        &mut self,
        items: &[S],
        message: &str,
        options: MenuOptions,
    ) -> Result<MenuChoice, PromptError> {
        let palette = self.palette();
        loop {
            self.say(&palette.green(message))?;
            match (options.allow_exit, options.allow_back) {
                (true, true) => self.say(&palette.yellow("0 or q to exit, b to back"))?,
                (true, false) => self.say(&palette.yellow("0 or q to exit"))?,
                (false, true) => self.say(&palette.yellow("b to back"))?,
                (false, false) => {}
            }
            for (index, item) in items.iter().enumerate() {
                self.say(&format!("{}, {}", index + 1, palette.cyan(item.as_ref())))?;
            }

            let answer = self.read_raw(">> ")?;
            let answer = answer.trim();

            if options.allow_exit && (answer == "q" || answer == "0") {
                self.say("Exit selected.")?;
                return Ok(MenuChoice::Exit);
            }
            if options.allow_back && answer == "b" {
                self.say("Back selected.")?;
                return Ok(MenuChoice::Back);
            }
            if answer.is_empty() || !answer.bytes().all(|b| b.is_ascii_digit()) {
                self.say(&palette.red("Please input number!"))?;
                continue;
            }
            match answer.parse::<usize>() {
                Ok(number) if (1..=items.len()).contains(&number) => {
                    let index = number - 1;
                    let selected = format!(
                        "{}{}",
                        palette.white("Selected : "),
                        palette.cyan(items[index].as_ref())
                    );
                    self.say(&selected)?;
                    return Ok(MenuChoice::Selected(index));
                }
                _ => self.say(&palette.red("Please input existing number!!"))?,
            }
        }
    }

    /// Menu over `(label, value)` pairs; returns the chosen value, or `None`
    /// on [`MenuChoice::Back`] / [`MenuChoice::Exit`].
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Eof`] if input ends first.
    pub fn select<'a, T>(
        &mut self,
        entries: &'a [(&str, T)],
        message: &str,
        options: MenuOptions,
    ) -> Result<Option<&'a T>, PromptError> {
        let labels: Vec<&str> = entries.iter().map(|(label, _)| *label).collect();
        match self.choose_num(&labels, message, options)? {
            MenuChoice::Selected(index) => Ok(Some(&entries[index].1)),
            MenuChoice::Back | MenuChoice::Exit => Ok(None),
        }
    }
}
