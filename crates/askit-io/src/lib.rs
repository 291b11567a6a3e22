//! Console backends for askit prompts.
//!
//! Prompts talk to a [`Console`]: they write their question, then read one
//! [`InputEvent`]. The standard implementation reads lines from stdin and
//! writes to stdout or stderr; [`mock::MockConsole`] replays scripted events
//! and captures output for tests.
//!
//! All prompts of a form share one console through a [`SharedConsole`].

use std::sync::{Arc, Mutex};

use thiserror::Error;

pub mod mock;
pub mod std_console;

pub use mock::MockConsole;
pub use std_console::{OutputTarget, StdConsole};

/// One unit of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A submitted line, without its terminator
    Line(String),
    /// The user pressed Ctrl+C
    Interrupt,
    /// The input stream is closed
    EndOfInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("console lock poisoned")]
    Poisoned,
}

impl From<std::io::Error> for ConsoleError {
    fn from(err: std::io::Error) -> Self {
        ConsoleError::IoError(err.to_string())
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Line-oriented terminal access.
pub trait Console: Send {
    /// Block until the next input event.
    fn read_event(&mut self) -> ConsoleResult<InputEvent>;

    fn write_text(&mut self, text: &str) -> ConsoleResult<()>;

    fn flush(&mut self) -> ConsoleResult<()>;

    fn write_line(&mut self, text: &str) -> ConsoleResult<()> {
        self.write_text(text)?;
        self.write_text("\n")
    }
}

/// A console shared by every prompt of a form.
pub type SharedConsole = Arc<Mutex<dyn Console>>;

/// Wrap a console for sharing.
pub fn shared<C: Console + 'static>(console: C) -> SharedConsole {
    Arc::new(Mutex::new(console))
}
