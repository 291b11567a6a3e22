//! Console over the process's standard streams.

use std::io::{self, BufRead, Write};

use crate::{Console, ConsoleResult, InputEvent};

const CTRL_C: char = '\u{3}';

/// Where prompt text is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputTarget {
    #[default]
    Stdout,
    /// Keeps stdout free for machine-readable results
    Stderr,
}

/// Reads lines from stdin and writes to stdout or stderr.
///
/// Without raw mode, Ctrl+C normally ends the process; a line carrying a
/// literal `^C` byte (as some terminals and pipes deliver it) is reported as
/// [`InputEvent::Interrupt`].
#[derive(Debug, Default)]
pub struct StdConsole {
    target: OutputTarget,
}

impl StdConsole {
    pub fn new(target: OutputTarget) -> Self {
        Self { target }
    }

    pub fn stdout() -> Self {
        Self::new(OutputTarget::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new(OutputTarget::Stderr)
    }

    pub fn target(&self) -> OutputTarget {
        self.target
    }
}

/// Classify what one `read_line` call produced.
pub(crate) fn classify(bytes_read: usize, line: &str) -> InputEvent {
    if bytes_read == 0 {
        return InputEvent::EndOfInput;
    }
    if line.contains(CTRL_C) {
        return InputEvent::Interrupt;
    }
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    InputEvent::Line(line.to_string())
}

impl Console for StdConsole {
    fn read_event(&mut self) -> ConsoleResult<InputEvent> {
        let mut line = String::new();
        let n = io::stdin().lock().read_line(&mut line)?;
        let event = classify(n, &line);
        log::trace!("stdin event: {event:?}");
        Ok(event)
    }

    fn write_text(&mut self, text: &str) -> ConsoleResult<()> {
        match self.target {
            OutputTarget::Stdout => io::stdout().lock().write_all(text.as_bytes())?,
            OutputTarget::Stderr => io::stderr().lock().write_all(text.as_bytes())?,
        }
        Ok(())
    }

    fn flush(&mut self) -> ConsoleResult<()> {
        match self.target {
            OutputTarget::Stdout => io::stdout().flush()?,
            OutputTarget::Stderr => io::stderr().flush()?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(0, ""), InputEvent::EndOfInput);
        assert_eq!(classify(4, "yes\n"), InputEvent::Line("yes".into()));
        assert_eq!(classify(5, "yes\r\n"), InputEvent::Line("yes".into()));
        assert_eq!(classify(1, "\n"), InputEvent::Line(String::new()));
        assert_eq!(classify(3, "ab\u{3}"), InputEvent::Interrupt);
        assert_eq!(classify(3, "end"), InputEvent::Line("end".into()));
    }

    #[test]
    fn test_default_target_is_stdout() {
        assert_eq!(StdConsole::default().target(), OutputTarget::Stdout);
        assert_eq!(StdConsole::stderr().target(), OutputTarget::Stderr);
    }
}
