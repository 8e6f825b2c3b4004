//! Player-facing I/O seams.
//!
//! The engine writes through [`Output`] and reads through [`Input`]; the
//! terminal implementations live in [`crate::terminal`] and
//! [`crate::repl::input`]. The recording and scripted pairs here drive the
//! session from tests without a terminal.
//!
//! All methods take `&mut self`, so at most one prompt can be outstanding on a
//! given input at any time.

use std::collections::VecDeque;

use anyhow::Result;

/// Semantic style of a line of output. Terminals map these to colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextStyle {
    #[default]
    Plain,
    Title,
    Description,
    Item,
    Character,
    Exit,
    Combat,
    Danger,
    Success,
    Denied,
    Error,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

pub trait Output {
    fn print(&mut self, text: &str, style: TextStyle);
    fn clear(&mut self);
    fn set_cursor(&mut self, x: u16, y: u16);
    /// Override the colors of subsequent plain text.
    fn set_color(&mut self, foreground: Color, background: Option<Color>);

    fn say(&mut self, text: &str) {
        self.print(text, TextStyle::Plain);
    }
}

/// Outcome of reading a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

pub trait Input {
    fn query_line(&mut self, prompt: &str) -> Result<InputEvent>;

    /// Read a single key. With `allowed` set, anything else is asked again.
    ///
    /// Keys are lowercased. An empty answer is `'\n'`. Returns `None` on
    /// end of input or interrupt.
    fn query_key(&mut self, prompt: &str, allowed: Option<&[char]>) -> Result<Option<char>> {
        loop {
            let line = match self.query_line(prompt)? {
                InputEvent::Line(line) => line,
                InputEvent::Eof | InputEvent::Interrupted => return Ok(None),
            };
            let key = line.trim().chars().next().map_or('\n', |c| c.to_ascii_lowercase());
            if allowed.is_none_or(|keys| keys.contains(&key)) {
                return Ok(Some(key));
            }
        }
    }

    /// Present a numbered menu and return the chosen index.
    ///
    /// Accepts a number or the start of an option's text. An empty answer picks
    /// `default`; end of input also yields `default`.
    fn query_choice(&mut self, title: &str, options: &[&str], default: Option<usize>) -> Result<Option<usize>> {
        let mut prompt = format!("{title}\n");
        for (idx, option) in options.iter().enumerate() {
            let marker = if Some(idx) == default { "*" } else { " " };
            prompt.push_str(&format!("{marker}{}) {option}\n", idx + 1));
        }
        prompt.push_str("> ");

        loop {
            let answer = match self.query_line(&prompt)? {
                InputEvent::Line(line) => line.trim().to_lowercase(),
                InputEvent::Eof | InputEvent::Interrupted => return Ok(default),
            };
            if answer.is_empty() && default.is_some() {
                return Ok(default);
            }
            if let Ok(number) = answer.parse::<usize>()
                && (1..=options.len()).contains(&number)
            {
                return Ok(Some(number - 1));
            }
            if !answer.is_empty()
                && let Some(idx) = options.iter().position(|opt| opt.to_lowercase().starts_with(&answer))
            {
                return Ok(Some(idx));
            }
        }
    }
}

/// Everything sent to a [`RecordingOutput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    Text(String, TextStyle),
    Clear,
    Cursor(u16, u16),
    Color(Color, Option<Color>),
}

/// Captures output in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingOutput {
    pub events: Vec<OutputEvent>,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Printed lines in order.
    pub fn lines(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                OutputEvent::Text(text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    /// Lines printed in the given style.
    pub fn styled(&self, style: TextStyle) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                OutputEvent::Text(text, s) if *s == style => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn reset(&mut self) {
        self.events.clear();
    }
}

impl Output for RecordingOutput {
    fn print(&mut self, text: &str, style: TextStyle) {
        self.events.push(OutputEvent::Text(text.to_string(), style));
    }

    fn clear(&mut self) {
        self.events.push(OutputEvent::Clear);
    }

    fn set_cursor(&mut self, x: u16, y: u16) {
        self.events.push(OutputEvent::Cursor(x, y));
    }

    fn set_color(&mut self, foreground: Color, background: Option<Color>) {
        self.events.push(OutputEvent::Color(foreground, background));
    }
}

/// Replays canned lines, then reports end of input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    /// Every prompt shown, in order.
    pub prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl Input for ScriptedInput {
    fn query_line(&mut self, prompt: &str) -> Result<InputEvent> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front().map_or(InputEvent::Eof, InputEvent::Line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_key_repeats_until_allowed() {
        let mut input = ScriptedInput::new(["maybe", "", "Y"]);
        let key = input.query_key("Quit? (y/n) ", Some(&['y', 'n'])).unwrap();
        assert_eq!(key, Some('y'));
        assert_eq!(input.prompts.len(), 3);
    }

    #[test]
    fn query_key_without_filter_accepts_enter() {
        let mut input = ScriptedInput::new([""]);
        assert_eq!(input.query_key("Press enter", None).unwrap(), Some('\n'));
        assert_eq!(input.query_key("Again", None).unwrap(), None);
    }

    #[test]
    fn query_choice_by_number_text_or_default() {
        let options = ["Rise again", "Give up"];
        let mut input = ScriptedInput::new(["2", "rise", "7", "", "nonsense"]);
        assert_eq!(input.query_choice("You died.", &options, Some(0)).unwrap(), Some(1));
        assert_eq!(input.query_choice("You died.", &options, Some(0)).unwrap(), Some(0));
        // "7" is out of range and is asked again; the empty answer then takes the default
        assert_eq!(input.query_choice("You died.", &options, Some(0)).unwrap(), Some(0));
        // "nonsense" is rejected, then input runs out
        assert_eq!(input.query_choice("You died.", &options, None).unwrap(), None);
        assert!(input.prompts[0].contains("*1) Rise again"));
    }

    #[test]
    fn recording_output_keeps_styles() {
        let mut out = RecordingOutput::new();
        out.print("The wolf turns on you!", TextStyle::Danger);
        out.say("hello");
        out.clear();
        assert_eq!(out.lines(), ["The wolf turns on you!", "hello"]);
        assert_eq!(out.styled(TextStyle::Danger), ["The wolf turns on you!"]);
        assert_eq!(out.events.len(), 3);
    }
}
