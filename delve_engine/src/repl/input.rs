//! Terminal input handling for the delve REPL.
//!
//! Wraps rustyline configuration and command-word completion, with a plain
//! stdin fallback when there's no interactive terminal.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{info, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::io::{Input, InputEvent};

/// Words offered by tab completion.
const COMMAND_TERMS: &[&str] = &[
    "attack", "down", "drink", "drop", "east", "eat", "equip", "help", "inventory", "look", "north", "northeast",
    "northwest", "quit", "read", "south", "southeast", "southwest", "status", "take", "unequip", "up", "use", "wait",
    "wear", "west",
];

type ReplEditor = rustyline::Editor<DelveHelper, DefaultHistory>;

#[derive(Default)]
struct DelveHelper;

impl Helper for DelveHelper {}

impl Completer for DelveHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let (start, prefix) = current_prefix(line, pos);
        Ok((start, completions(&prefix)))
    }
}

impl Hinter for DelveHelper {
    type Hint = String;
}

impl Highlighter for DelveHelper {}

impl Validator for DelveHelper {}

/// Start of the word under the cursor.
fn current_prefix(line: &str, pos: usize) -> (usize, String) {
    let slice = &line[..pos];
    let start = slice.rfind(char::is_whitespace).map_or(0, |idx| idx + 1);
    (start, slice[start..].to_string())
}

fn completions(prefix: &str) -> Vec<Pair> {
    if prefix.is_empty() {
        return Vec::new();
    }
    let lower = prefix.to_lowercase();
    COMMAND_TERMS
        .iter()
        .filter(|term| term.starts_with(&lower))
        .map(|term| Pair {
            display: (*term).to_string(),
            replacement: (*term).to_string(),
        })
        .collect()
}

/// Terminal [`Input`]: rustyline when stdin is a TTY, plain stdin otherwise.
pub struct TerminalInput {
    backend: Backend,
}

impl TerminalInput {
    pub fn new() -> Self {
        let backend = if io::stdin().is_terminal() {
            match RustylineInput::new() {
                Ok(editor) => {
                    info!("using rustyline-backed REPL input");
                    Backend::Rustyline(editor)
                },
                Err(err) => {
                    warn!("failed to initialize rustyline ({err}), falling back to basic stdin");
                    Backend::plain()
                },
            }
        } else {
            info!("stdin is not a TTY; using basic input mode");
            Backend::plain()
        };
        Self { backend }
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Input for TerminalInput {
    /// If the interactive backend fails, switch to plain stdin and retry once.
    fn query_line(&mut self, prompt: &str) -> Result<InputEvent> {
        match self.backend.read_line(prompt) {
            Ok(event) => Ok(event),
            Err(err) if self.backend.is_rustyline() => {
                warn!("rustyline input failed: {err} -- switching to basic stdin");
                self.backend = Backend::plain();
                Ok(self.backend.read_line(prompt)?)
            },
            Err(err) => Err(err.into()),
        }
    }
}

enum Backend {
    Rustyline(RustylineInput),
    Plain(StdinInput),
}

impl Backend {
    fn plain() -> Self {
        Backend::Plain(StdinInput::default())
    }

    fn is_rustyline(&self) -> bool {
        matches!(self, Backend::Rustyline(_))
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self {
            Backend::Rustyline(editor) => editor.read_line(prompt),
            Backend::Plain(stdin) => stdin.read_line(prompt),
        }
    }
}

struct RustylineInput {
    editor: ReplEditor,
    history_path: Option<PathBuf>,
}

impl RustylineInput {
    fn new() -> io::Result<Self> {
        let mut editor = rustyline::Editor::<DelveHelper, _>::new().map_err(map_io_err)?;
        editor.set_helper(Some(DelveHelper));
        let history_path = history_file_path();

        if let Some(path) = history_path.as_ref() {
            if let Some(dir) = path.parent()
                && let Err(err) = fs::create_dir_all(dir)
            {
                warn!("failed to create history directory {}: {err}", dir.display());
            }
            if let Err(err) = editor.load_history(path) {
                match err {
                    ReadlineError::Io(ref io_err) if io_err.kind() == io::ErrorKind::NotFound => {
                        info!("no prior history found at {}, starting fresh", path.display());
                    },
                    other => warn!("failed to load history from {}: {other}", path.display()),
                }
            }
        }

        Ok(Self { editor, history_path })
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(err) = self.editor.add_history_entry(line.as_str()) {
                        warn!("failed to append to history: {err}");
                    }
                    if let Some(path) = self.history_path.as_ref()
                        && let Err(err) = self.editor.save_history(path)
                    {
                        warn!("failed to persist history to {}: {err}", path.display());
                    }
                }
                Ok(InputEvent::Line(line))
            },
            Err(err) => convert_readline_error(err),
        }
    }
}

#[derive(Default)]
struct StdinInput {
    buffer: String,
}

impl StdinInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        print!("{prompt}");
        io::stdout().flush()?;

        self.buffer.clear();
        let bytes = io::stdin().read_line(&mut self.buffer)?;
        if bytes == 0 {
            return Ok(InputEvent::Eof);
        }
        let line = self.buffer.trim_end_matches(['\n', '\r']);
        Ok(InputEvent::Line(line.to_string()))
    }
}

fn convert_readline_error(err: ReadlineError) -> io::Result<InputEvent> {
    match err {
        ReadlineError::Interrupted => Ok(InputEvent::Interrupted),
        ReadlineError::Eof => Ok(InputEvent::Eof),
        ReadlineError::Io(io_err) => Err(io_err),
        other => Err(io::Error::other(other)),
    }
}

fn map_io_err(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(io_err) => io_err,
        other => io::Error::other(other),
    }
}

fn history_file_path() -> Option<PathBuf> {
    dirs::data_dir()
        .or_else(dirs::data_local_dir)
        .map(|base| build_history_path(&base))
}

fn build_history_path(base: &Path) -> PathBuf {
    base.join("delve").join("history.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_readline_ctrl_c_to_interrupt() {
        let result = convert_readline_error(ReadlineError::Interrupted).unwrap();
        assert!(matches!(result, InputEvent::Interrupted));
        let result = convert_readline_error(ReadlineError::Eof).unwrap();
        assert!(matches!(result, InputEvent::Eof));
    }

    #[test]
    fn history_path_appends_components() {
        let path = build_history_path(Path::new("/tmp/delve-test"));
        assert!(path.ends_with(Path::new("delve/history.txt")));
    }

    #[test]
    fn completes_the_word_under_the_cursor() {
        let (start, prefix) = current_prefix("take sw", 7);
        assert_eq!((start, prefix.as_str()), (5, "sw"));

        let words: Vec<_> = completions("no").into_iter().map(|p| p.replacement).collect();
        assert_eq!(words, ["north", "northeast", "northwest"]);
        assert!(completions("").is_empty());
    }

    #[test]
    fn terms_are_sorted_and_unique() {
        assert!(COMMAND_TERMS.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
