//! Terminal implementation of [`Output`].
//!
//! Lines are wrapped to the terminal (or a configured width) and colored by
//! their [`TextStyle`]. Clearing and cursor moves are plain ANSI sequences.

use std::io::{self, Write};

use colored::Colorize;
use log::warn;
use textwrap::{fill, termwidth};

use crate::io::{Color, Output, TextStyle};
use crate::style::{GameStyle, ansi_color};

#[derive(Debug, Clone)]
pub struct TerminalOutput {
    wrap_width: Option<usize>,
    colors: Option<(Color, Option<Color>)>,
}

impl TerminalOutput {
    /// `color = false` turns off ANSI styling process-wide.
    pub fn new(color: bool, wrap_width: Option<usize>) -> Self {
        if !color {
            colored::control::set_override(false);
        }
        Self {
            wrap_width,
            colors: None,
        }
    }

    fn width(&self) -> usize {
        self.wrap_width.unwrap_or_else(termwidth)
    }

    fn flush(&self) {
        if let Err(e) = io::stdout().flush() {
            warn!("failed to flush stdout: {e}");
        }
    }
}

impl Output for TerminalOutput {
    fn print(&mut self, text: &str, style: TextStyle) {
        let wrapped = fill(text, self.width());
        match (style, self.colors) {
            (TextStyle::Plain, Some((fg, bg))) => {
                let mut colored = wrapped.color(ansi_color(fg));
                if let Some(bg) = bg {
                    colored = colored.on_color(ansi_color(bg));
                }
                println!("{colored}");
            },
            _ => println!("{}", wrapped.styled(style)),
        }
    }

    fn clear(&mut self) {
        print!("\x1b[2J\x1b[H");
        self.flush();
    }

    fn set_cursor(&mut self, x: u16, y: u16) {
        // ANSI positions are 1-based, row first
        print!("\x1b[{};{}H", y + 1, x + 1);
        self.flush();
    }

    fn set_color(&mut self, foreground: Color, background: Option<Color>) {
        self.colors = Some((foreground, background));
    }
}
