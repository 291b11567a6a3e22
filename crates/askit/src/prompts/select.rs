use askit_core::{Prompt, PromptError, PromptResult, Question, Value};
use askit_io::SharedConsole;
use async_trait::async_trait;

use super::common::{
    ask_blocking, default_console, question_line, read_answer, resolve_choice, SELECTED_POINTER,
};

const SELECT_INSTRUCTION: &str = "(Use number or name)";

/// Pick one entry from a numbered list.
///
/// The answer is a 1-based index or the exact text of a choice. Empty input
/// picks the default, or the first choice when no default is set.
#[derive(Clone)]
pub struct SelectPrompt {
    message: String,
    choices: Vec<String>,
    default: Option<String>,
    instruction: Option<String>,
    console: SharedConsole,
}

/// Create a select prompt writing to stdout.
pub fn select<I, S>(message: impl Into<String>, choices: I) -> SelectPrompt
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    SelectPrompt {
        message: message.into(),
        choices: choices.into_iter().map(Into::into).collect(),
        default: None,
        instruction: None,
        console: default_console(),
    }
}

impl SelectPrompt {
    pub fn with_default(mut self, choice: impl Into<String>) -> Self {
        self.default = Some(choice.into());
        self
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    pub fn with_console(mut self, console: SharedConsole) -> Self {
        self.console = console;
        self
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Check the choices before anything is rendered.
    pub fn validate(&self) -> PromptResult<()> {
        if self.choices.is_empty() {
            return Err(PromptError::InvalidConfiguration(
                "A list of choices needs to be provided.".to_string(),
            ));
        }
        if let Some(default) = &self.default {
            if !self.choices.contains(default) {
                return Err(PromptError::InvalidConfiguration(format!(
                    "Default '{default}' is not one of the choices"
                )));
            }
        }
        Ok(())
    }

    fn render_choices(&self) -> String {
        self.choices
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let pointer = if self.default.as_ref() == Some(choice) {
                    SELECTED_POINTER
                } else {
                    " "
                };
                format!("{pointer} {}) {choice}\n", i + 1)
            })
            .collect()
    }

    fn parse(&self, line: &str) -> Result<Value, String> {
        let line = line.trim();
        let choice = if line.is_empty() {
            self.default.as_ref().or_else(|| self.choices.first())
        } else {
            resolve_choice(&self.choices, line).map(|i| &self.choices[i])
        };
        choice.map(|c| Value::String(c.clone())).ok_or_else(|| {
            format!(
                "Please enter a number between 1 and {} or one of the choices",
                self.choices.len()
            )
        })
    }
}

#[async_trait]
impl Prompt for SelectPrompt {
    fn unsafe_ask(&self, patch_stdout: bool) -> PromptResult<Value> {
        self.validate()?;
        let instruction = self.instruction.as_deref().unwrap_or(SELECT_INSTRUCTION);
        let question = question_line(&self.message, Some(instruction));
        read_answer(
            &self.console,
            patch_stdout,
            &self.render_choices(),
            &question,
            |line| self.parse(line),
        )
    }

    async fn unsafe_ask_async(&self, patch_stdout: bool) -> PromptResult<Value> {
        ask_blocking(self.clone(), patch_stdout).await
    }

    fn default_value(&self) -> Value {
        self.default.clone().map(Value::String).unwrap_or(Value::Null)
    }
}

impl From<SelectPrompt> for Question {
    fn from(prompt: SelectPrompt) -> Self {
        Question::new(prompt)
    }
}
