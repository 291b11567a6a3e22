use std::sync::Arc;

use askit_core::{Prompt, PromptResult, Question, Value};
use askit_io::SharedConsole;
use async_trait::async_trait;

use super::common::{ask_blocking, default_console, question_line, read_answer};

type Validator = dyn Fn(&str) -> Result<(), String> + Send + Sync;

/// Free text input.
///
/// Empty input takes the default (when one is set). A validator can reject
/// the answer with a message, in which case the question is asked again.
#[derive(Clone)]
pub struct TextPrompt {
    message: String,
    default: Option<String>,
    instruction: Option<String>,
    validator: Option<Arc<Validator>>,
    console: SharedConsole,
}

/// Create a text prompt writing to stdout.
pub fn text(message: impl Into<String>) -> TextPrompt {
    TextPrompt {
        message: message.into(),
        default: None,
        instruction: None,
        validator: None,
        console: default_console(),
    }
}

impl TextPrompt {
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    /// Reject answers for which `validator` returns an error message.
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn with_console(mut self, console: SharedConsole) -> Self {
        self.console = console;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn instruction(&self) -> Option<String> {
        self.instruction
            .clone()
            .or_else(|| self.default.as_ref().map(|d| format!("({d})")))
    }

    fn parse(&self, line: &str) -> Result<Value, String> {
        let answer = match (&self.default, line.is_empty()) {
            (Some(default), true) => default.as_str(),
            _ => line,
        };
        if let Some(validator) = &self.validator {
            validator(answer)?;
        }
        Ok(Value::String(answer.to_string()))
    }
}

#[async_trait]
impl Prompt for TextPrompt {
    fn unsafe_ask(&self, patch_stdout: bool) -> PromptResult<Value> {
        let question = question_line(&self.message, self.instruction().as_deref());
        read_answer(&self.console, patch_stdout, "", &question, |line| {
            self.parse(line)
        })
    }

    async fn unsafe_ask_async(&self, patch_stdout: bool) -> PromptResult<Value> {
        ask_blocking(self.clone(), patch_stdout).await
    }

    fn default_value(&self) -> Value {
        self.default.clone().map(Value::String).unwrap_or(Value::Null)
    }
}

impl From<TextPrompt> for Question {
    fn from(prompt: TextPrompt) -> Self {
        Question::new(prompt)
    }
}
