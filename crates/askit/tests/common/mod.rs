// Console helpers shared by the askit integration tests

#![allow(dead_code)]

use askit::{shared, MockConsole, SharedConsole};

/// A mock console preloaded with `lines`, plus the handle prompts use.
pub fn scripted(lines: &[&str]) -> (MockConsole, SharedConsole) {
    let mock = MockConsole::new();
    mock.queue_lines(lines.iter().copied());
    let console = shared(mock.clone());
    (mock, console)
}

/// How many times the question line for `message` was rendered.
pub fn times_asked(mock: &MockConsole, message: &str) -> usize {
    mock.output().matches(&format!("? {message} ")).count()
}
