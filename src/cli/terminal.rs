//! Terminal capability detection and colouring

use owo_colors::{OwoColorize, colors::css};

/// Below this many columns, contact details go on their own lines.
const NARROW_COLUMNS: u16 = 60;

/// Whether stdout accepts ANSI colours.
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Whether the terminal is narrower than [`NARROW_COLUMNS`].
pub fn is_narrow() -> bool {
    terminal_size::terminal_size().is_some_and(|(width, _)| width.0 < NARROW_COLUMNS)
}

/// Extension trait for colouring shell output.
///
/// Every method falls back to the plain text when colours are unsupported.
pub trait Colorize {
    /// Green, for completed commands and done tasks.
    fn success(&self) -> String;
    /// Orange, for failed commands.
    fn warning(&self) -> String;
    /// Light blue, for names.
    fn info(&self) -> String;
    /// Dimmed, for secondary details.
    fn dim(&self) -> String;
}

fn paint<T: std::fmt::Display + ?Sized>(text: &T, style: impl Fn(&T) -> String) -> String {
    if supports_color() {
        style(text)
    } else {
        text.to_string()
    }
}

impl<T: std::fmt::Display + ?Sized> Colorize for T {
    fn success(&self) -> String {
        paint(self, |t| t.fg::<css::Green>().to_string())
    }

    fn warning(&self) -> String {
        paint(self, |t| t.fg::<css::Orange>().to_string())
    }

    fn info(&self) -> String {
        paint(self, |t| t.fg::<css::LightBlue>().to_string())
    }

    fn dim(&self) -> String {
        paint(self, |t| t.dimmed().to_string())
    }
}
