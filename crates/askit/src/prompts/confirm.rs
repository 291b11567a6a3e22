use askit_core::{Prompt, PromptResult, Question, Value};
use askit_io::SharedConsole;
use async_trait::async_trait;

use super::common::{
    ask_blocking, default_console, question_line, read_answer, NO_OR_YES, YES_OR_NO,
};

/// A yes/no question. Empty input takes the default, which starts as yes.
#[derive(Clone)]
pub struct ConfirmPrompt {
    message: String,
    default: bool,
    console: SharedConsole,
}

/// Create a confirmation prompt writing to stdout.
pub fn confirm(message: impl Into<String>) -> ConfirmPrompt {
    ConfirmPrompt {
        message: message.into(),
        default: true,
        console: default_console(),
    }
}

impl ConfirmPrompt {
    pub fn with_default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    pub fn with_console(mut self, console: SharedConsole) -> Self {
        self.console = console;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn parse(&self, line: &str) -> Result<bool, String> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" => Ok(self.default),
            "y" | "yes" => Ok(true),
            "n" | "no" => Ok(false),
            _ => Err("Please answer y(es) or n(o)".to_string()),
        }
    }
}

#[async_trait]
impl Prompt for ConfirmPrompt {
    fn unsafe_ask(&self, patch_stdout: bool) -> PromptResult<Value> {
        let instruction = if self.default { YES_OR_NO } else { NO_OR_YES };
        let question = question_line(&self.message, Some(instruction));
        read_answer(&self.console, patch_stdout, "", &question, |line| {
            self.parse(line).map(Value::Bool)
        })
    }

    async fn unsafe_ask_async(&self, patch_stdout: bool) -> PromptResult<Value> {
        ask_blocking(self.clone(), patch_stdout).await
    }

    fn default_value(&self) -> Value {
        Value::Bool(self.default)
    }
}

impl From<ConfirmPrompt> for Question {
    fn from(prompt: ConfirmPrompt) -> Self {
        Question::new(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askit_io::{shared, MockConsole};

    fn ask(prompt: ConfirmPrompt, lines: &[&str]) -> (PromptResult<Value>, String) {
        let mock = MockConsole::new();
        mock.queue_lines(lines.iter().copied());
        let answer = prompt.with_console(shared(mock.clone())).unsafe_ask(false);
        (answer, mock.output())
    }

    #[test]
    fn test_answers() {
        for (line, expected) in [("y", true), ("YES", true), ("n", false), (" No ", false)] {
            let (answer, _) = ask(confirm("Sure?"), &[line]);
            assert_eq!(answer.unwrap(), Value::Bool(expected), "input {line:?}");
        }
    }

    #[test]
    fn test_empty_takes_default() {
        let (answer, output) = ask(confirm("Sure?"), &[""]);
        assert_eq!(answer.unwrap(), Value::Bool(true));
        assert_eq!(output, "? Sure? (Y/n) ");

        let (answer, output) = ask(confirm("Sure?").with_default(false), &[""]);
        assert_eq!(answer.unwrap(), Value::Bool(false));
        assert_eq!(output, "? Sure? (y/N) ");
    }

    #[test]
    fn test_other_input_reprompts() {
        let (answer, output) = ask(confirm("Sure?"), &["maybe", "n"]);
        assert_eq!(answer.unwrap(), Value::Bool(false));
        assert_eq!(output.matches("? Sure? (Y/n) ").count(), 2);
    }

    #[test]
    fn test_default_value() {
        assert_eq!(confirm("x").default_value(), Value::Bool(true));
        assert_eq!(confirm("x").with_default(false).default_value(), Value::Bool(false));
    }
}
