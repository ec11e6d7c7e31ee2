//! Terminal input for the play loop.
//!
//! Uses rustyline (with line editing and in-session history) when stdin is a
//! terminal, and a plain buffered stdin reader otherwise, so scripted input can
//! be piped straight into the binary.

use std::io::{self, IsTerminal, Write};

use log::{info, warn};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

/// Outcome of reading a line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

type LineEditor = rustyline::Editor<(), DefaultHistory>;

/// Reads player input from whichever backend suits the terminal.
pub struct InputManager {
    backend: Backend,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        let backend = if io::stdin().is_terminal() {
            match LineEditor::new() {
                Ok(editor) => {
                    info!("using rustyline-backed input");
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

    /// Read one line. If the interactive backend fails, switch to plain stdin
    /// and retry once.
    ///
    /// # Errors
    /// - if stdin itself can't be read
    pub fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self.backend.read_line(prompt) {
            Ok(event) => Ok(event),
            Err(err) if matches!(self.backend, Backend::Rustyline(_)) => {
                warn!("rustyline input failed: {err} -- switching to basic stdin");
                self.backend = Backend::plain();
                self.backend.read_line(prompt)
            },
            Err(err) => Err(err),
        }
    }
}

enum Backend {
    Rustyline(LineEditor),
    Plain(String),
}

impl Backend {
    fn plain() -> Self {
        Backend::Plain(String::new())
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self {
            Backend::Rustyline(editor) => match editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        if let Err(err) = editor.add_history_entry(line.as_str()) {
                            warn!("failed to append to history: {err}");
                        }
                    }
                    Ok(InputEvent::Line(line))
                },
                Err(ReadlineError::Interrupted) => Ok(InputEvent::Interrupted),
                Err(ReadlineError::Eof) => Ok(InputEvent::Eof),
                Err(ReadlineError::Io(err)) => Err(err),
                Err(other) => Err(io::Error::other(other)),
            },
            Backend::Plain(buffer) => {
                print!("{prompt}");
                io::stdout().flush()?;
                buffer.clear();
                if io::stdin().read_line(buffer)? == 0 {
                    return Ok(InputEvent::Eof);
                }
                Ok(InputEvent::Line(buffer.trim_end_matches(['\n', '\r']).to_string()))
            },
        }
    }
}
