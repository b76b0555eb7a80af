//! ANSI coloring.
//!
//! Whether escape codes are emitted is a property of the [`Palette`] value
//! handed to each call site; there is no process-wide switch.

use std::sync::LazyLock;

use regex::Regex;

/// The fixed set of SGR colors used by termkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Brown,
    Blue,
    Purple,
    Cyan,
    White,
    LightRed,
    LightGreen,
    Yellow,
    LightBlue,
    Pink,
    LightCyan,
}

impl Color {
    /// SGR parameter string, e.g. `"00;31"`.
    pub const fn sgr(self) -> &'static str {
        match self {
            Self::Red => "00;31",
            Self::Green => "00;32",
            Self::Brown => "00;33",
            Self::Blue => "00;34",
            Self::Purple => "00;35",
            Self::Cyan => "00;36",
            Self::White => "00;37",
            Self::LightRed => "01;31",
            Self::LightGreen => "01;32",
            Self::Yellow => "01;33",
            Self::LightBlue => "01;34",
            Self::Pink => "01;35",
            Self::LightCyan => "01;36",
        }
    }
}

/// Colorizer with an explicit enable flag.
///
/// ```rust
/// use termkit_cli::application::console::{Color, Palette};
///
/// assert_eq!(Palette::new(true).paint(Color::Red, "x"), "\x1b[00;31mx\x1b[0m");
/// assert_eq!(Palette::plain().paint(Color::Red, "x"), "x");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// A palette that never emits escape codes.
    pub const fn plain() -> Self {
        Self::new(false)
    }

    /// Wraps `msg` in the SGR sequence for `color`, or returns it unchanged
    /// when coloring is disabled.
    pub fn paint(&self, color: Color, msg: &str) -> String {
        if self.enabled {
            format!("\x1b[{}m{msg}\x1b[0m", color.sgr())
        } else {
            msg.to_string()
        }
    }

    pub fn red(&self, msg: &str) -> String {
        self.paint(Color::Red, msg)
    }

    pub fn green(&self, msg: &str) -> String {
        self.paint(Color::Green, msg)
    }

    pub fn cyan(&self, msg: &str) -> String {
        self.paint(Color::Cyan, msg)
    }

    pub fn white(&self, msg: &str) -> String {
        self.paint(Color::White, msg)
    }

    pub fn yellow(&self, msg: &str) -> String {
        self.paint(Color::Yellow, msg)
    }
}

/// CSI sequences (`ESC [ params intermediates final`) and two-byte
/// `ESC` + `@`..`Z`, `\`..`_` sequences.
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])").expect("Invalid regex pattern")
});

/// Removes ANSI escape sequences.  A lone `ESC` that starts neither form is
/// kept.
pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}
