//! Styling helpers for terminal output.
//!
//! The [`GameStyle`] trait provides a set of convenience methods for applying
//! ANSI styling via the `colored` crate. Implementations for `&str` and
//! `String` are provided so string literals can be styled directly.

use colored::{ColoredString, Colorize};

use crate::io::{Color, TextStyle};

/// Convenience trait for applying color and style to text output.
pub trait GameStyle {
    fn item_style(&self) -> ColoredString;
    fn character_style(&self) -> ColoredString;
    fn location_titlebar_style(&self) -> ColoredString;
    fn description_style(&self) -> ColoredString;
    fn exit_style(&self) -> ColoredString;
    fn combat_style(&self) -> ColoredString;
    fn danger_style(&self) -> ColoredString;
    fn success_style(&self) -> ColoredString;
    fn denied_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
    fn system_style(&self) -> ColoredString;

    /// Apply the style matching a semantic [`TextStyle`].
    fn styled(&self, style: TextStyle) -> ColoredString {
        match style {
            TextStyle::Plain => self.system_style().clear(),
            TextStyle::Title => self.location_titlebar_style(),
            TextStyle::Description => self.description_style(),
            TextStyle::Item => self.item_style(),
            TextStyle::Character => self.character_style(),
            TextStyle::Exit => self.exit_style(),
            TextStyle::Combat => self.combat_style(),
            TextStyle::Danger => self.danger_style(),
            TextStyle::Success => self.success_style(),
            TextStyle::Denied => self.denied_style(),
            TextStyle::Error => self.error_style(),
            TextStyle::System => self.system_style(),
        }
    }
}

impl GameStyle for &str {
    fn item_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40)
    }
    fn character_style(&self) -> ColoredString {
        self.truecolor(13, 130, 60)
    }
    fn location_titlebar_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10).underline()
    }
    fn description_style(&self) -> ColoredString {
        self.italic().truecolor(102, 208, 250)
    }
    fn exit_style(&self) -> ColoredString {
        self.italic().truecolor(110, 220, 110)
    }
    fn combat_style(&self) -> ColoredString {
        self.truecolor(230, 230, 30)
    }
    fn danger_style(&self) -> ColoredString {
        self.bold().truecolor(230, 80, 80)
    }
    fn success_style(&self) -> ColoredString {
        self.truecolor(150, 230, 30)
    }
    fn denied_style(&self) -> ColoredString {
        self.italic().truecolor(230, 30, 30)
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
    fn system_style(&self) -> ColoredString {
        self.dimmed().truecolor(75, 180, 255)
    }
}

impl GameStyle for String {
    fn item_style(&self) -> ColoredString {
        self.as_str().item_style()
    }
    fn character_style(&self) -> ColoredString {
        self.as_str().character_style()
    }
    fn location_titlebar_style(&self) -> ColoredString {
        self.as_str().location_titlebar_style()
    }
    fn description_style(&self) -> ColoredString {
        self.as_str().description_style()
    }
    fn exit_style(&self) -> ColoredString {
        self.as_str().exit_style()
    }
    fn combat_style(&self) -> ColoredString {
        self.as_str().combat_style()
    }
    fn danger_style(&self) -> ColoredString {
        self.as_str().danger_style()
    }
    fn success_style(&self) -> ColoredString {
        self.as_str().success_style()
    }
    fn denied_style(&self) -> ColoredString {
        self.as_str().denied_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
    fn system_style(&self) -> ColoredString {
        self.as_str().system_style()
    }
}

/// Map an engine color onto `colored`'s palette.
pub fn ansi_color(color: Color) -> colored::Color {
    match color {
        Color::Black => colored::Color::Black,
        Color::Red => colored::Color::Red,
        Color::Green => colored::Color::Green,
        Color::Yellow => colored::Color::Yellow,
        Color::Blue => colored::Color::Blue,
        Color::Magenta => colored::Color::Magenta,
        Color::Cyan => colored::Color::Cyan,
        Color::White => colored::Color::White,
    }
}
