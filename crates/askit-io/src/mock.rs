//! Mock console implementation for testing

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::{Console, ConsoleError, ConsoleResult, InputEvent};

/// Scripted console: replays queued events and captures everything written.
///
/// Clones share the same queue and output, so a test can keep one handle
/// while the prompts own another. Once the queue is drained every read
/// yields [`InputEvent::EndOfInput`].
#[derive(Debug, Clone, Default)]
pub struct MockConsole {
    events: Arc<Mutex<VecDeque<InputEvent>>>,
    output: Arc<Mutex<String>>,
    flushes: Arc<Mutex<usize>>,
}

impl MockConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a submitted line
    pub fn queue_line(&self, line: &str) {
        self.queue_event(InputEvent::Line(line.to_string()));
    }

    pub fn queue_lines<I, S>(&self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.queue_line(line.as_ref());
        }
    }

    /// Queue a Ctrl+C
    pub fn queue_interrupt(&self) {
        self.queue_event(InputEvent::Interrupt);
    }

    pub fn queue_event(&self, event: InputEvent) {
        if let Ok(mut queue) = self.events.lock() {
            queue.push_back(event);
        }
    }

    pub fn queued_event_count(&self) -> usize {
        self.events.lock().map(|q| q.len()).unwrap_or(0)
    }

    /// Everything written so far
    pub fn output(&self) -> String {
        self.output.lock().map(|o| o.clone()).unwrap_or_default()
    }

    /// Return and clear the captured output
    pub fn take_output(&self) -> String {
        self.output
            .lock()
            .map(|mut o| std::mem::take(&mut *o))
            .unwrap_or_default()
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.lock().map(|f| *f).unwrap_or(0)
    }
}

impl Console for MockConsole {
    fn read_event(&mut self) -> ConsoleResult<InputEvent> {
        let mut queue = self.events.lock().map_err(|_| ConsoleError::Poisoned)?;
        Ok(queue.pop_front().unwrap_or(InputEvent::EndOfInput))
    }

    fn write_text(&mut self, text: &str) -> ConsoleResult<()> {
        let mut output = self.output.lock().map_err(|_| ConsoleError::Poisoned)?;
        output.push_str(text);
        Ok(())
    }

    fn flush(&mut self) -> ConsoleResult<()> {
        let mut flushes = self.flushes.lock().map_err(|_| ConsoleError::Poisoned)?;
        *flushes += 1;
        Ok(())
    }
}
