//! Styling helpers for terminal output.
//!
//! The [`GameStyle`] trait provides a set of convenience methods for applying
//! ANSI styling via the `colored` crate. Implementations for `&str` and
//! `String` are provided so string literals can be styled directly.

use colored::{ColoredString, Colorize};

/// Convenience trait for applying color and style to text output.
pub trait GameStyle {
    fn title_style(&self) -> ColoredString;
    fn opening_style(&self) -> ColoredString;
    fn description_style(&self) -> ColoredString;
    fn narration_style(&self) -> ColoredString;
    fn prompt_style(&self) -> ColoredString;
    fn game_over_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
}

impl GameStyle for &str {
    fn title_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10).bold().underline()
    }
    fn opening_style(&self) -> ColoredString {
        self.italic().truecolor(180, 180, 200)
    }
    fn description_style(&self) -> ColoredString {
        self.italic().truecolor(102, 208, 250)
    }
    fn narration_style(&self) -> ColoredString {
        self.truecolor(230, 230, 190)
    }
    fn prompt_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40).bold()
    }
    fn game_over_style(&self) -> ColoredString {
        self.truecolor(220, 40, 220).bold()
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
}

impl GameStyle for String {
    fn title_style(&self) -> ColoredString {
        self.as_str().title_style()
    }
    fn opening_style(&self) -> ColoredString {
        self.as_str().opening_style()
    }
    fn description_style(&self) -> ColoredString {
        self.as_str().description_style()
    }
    fn narration_style(&self) -> ColoredString {
        self.as_str().narration_style()
    }
    fn prompt_style(&self) -> ColoredString {
        self.as_str().prompt_style()
    }
    fn game_over_style(&self) -> ColoredString {
        self.as_str().game_over_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styling_keeps_the_text() {
        colored::control::set_override(false);
        assert_eq!("You can't do that.".error_style().to_string(), "You can't do that.");
        assert_eq!(String::from("> ").prompt_style().to_string(), "> ");
    }
}
