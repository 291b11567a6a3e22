//! Rendering constants and the read loop shared by the line prompts.

use std::io::Write;

use askit_core::{Prompt, PromptError, PromptResult, Value};
use askit_io::{shared, Console, ConsoleError, InputEvent, SharedConsole, StdConsole};

/// Prefix displayed in front of questions
pub const QUESTION_PREFIX: &str = "?";

/// Instruction text for a confirmation question (yes is default)
pub const YES_OR_NO: &str = "(Y/n)";

/// Instruction text for a confirmation question (no is default)
pub const NO_OR_YES: &str = "(y/N)";

/// Marks the default entry of a select list
pub const SELECTED_POINTER: &str = "»";

pub const INDICATOR_SELECTED: &str = "●";
pub const INDICATOR_UNSELECTED: &str = "○";

pub(crate) fn default_console() -> SharedConsole {
    shared(StdConsole::stdout())
}

pub(crate) fn console_error(err: ConsoleError) -> PromptError {
    PromptError::IoError(err.to_string())
}

/// The question line: `"? <message> <instruction> "`.
pub fn question_line(message: &str, instruction: Option<&str>) -> String {
    match instruction {
        Some(instruction) if !instruction.is_empty() => {
            format!("{QUESTION_PREFIX} {message} {instruction} ")
        }
        _ => format!("{QUESTION_PREFIX} {message} "),
    }
}

/// Index of the choice named by `input`: a 1-based number or the exact text.
pub(crate) fn resolve_choice(choices: &[String], input: &str) -> Option<usize> {
    if let Ok(n) = input.parse::<usize>() {
        if (1..=choices.len()).contains(&n) {
            return Some(n - 1);
        }
    }
    choices.iter().position(|choice| choice == input)
}

/// Run a line prompt on tokio's blocking pool so the caller's runtime keeps
/// going while the console waits for input.
///
/// Must be awaited inside a tokio runtime.
pub(crate) async fn ask_blocking<P>(prompt: P, patch_stdout: bool) -> PromptResult<Value>
where
    P: Prompt + 'static,
{
    tokio::task::spawn_blocking(move || prompt.unsafe_ask(patch_stdout))
        .await
        .map_err(|err| PromptError::IoError(format!("prompt task failed: {err}")))?
}

/// What the user did with one question.
enum Outcome<T> {
    Answered(T),
    Cancelled,
}

/// Show `preamble` once, then `question` until `parse` accepts a line.
///
/// Rejected lines print the parser's message and ask again. Interrupts and
/// a closed input both cancel.
pub(crate) fn read_answer<T, F>(
    console: &SharedConsole,
    patch_stdout: bool,
    preamble: &str,
    question: &str,
    parse: F,
) -> PromptResult<T>
where
    F: FnMut(&str) -> Result<T, String>,
{
    if patch_stdout {
        std::io::stdout().flush()?;
    }

    let mut console = console
        .lock()
        .map_err(|_| console_error(ConsoleError::Poisoned))?;

    match session(&mut *console, preamble, question, parse).map_err(console_error)? {
        Outcome::Answered(value) => Ok(value),
        Outcome::Cancelled => {
            log::debug!("prompt cancelled: {}", question.trim_end());
            Err(PromptError::Interrupted)
        }
    }
}

fn session<T, F>(
    console: &mut dyn Console,
    preamble: &str,
    question: &str,
    mut parse: F,
) -> Result<Outcome<T>, ConsoleError>
where
    F: FnMut(&str) -> Result<T, String>,
{
    if !preamble.is_empty() {
        console.write_text(preamble)?;
    }

    loop {
        console.write_text(question)?;
        console.flush()?;

        match console.read_event()? {
            InputEvent::Line(line) => match parse(&line) {
                Ok(value) => return Ok(Outcome::Answered(value)),
                Err(reason) => {
                    log::trace!("rejected answer {line:?}: {reason}");
                    console.write_line(&format!("  {reason}"))?;
                }
            },
            InputEvent::Interrupt | InputEvent::EndOfInput => {
                console.write_text("\n")?;
                console.flush()?;
                return Ok(Outcome::Cancelled);
            }
        }
    }
}
