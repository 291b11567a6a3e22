use askit_core::{Prompt, PromptError, PromptResult, Question, Value};
use askit_io::SharedConsole;
use async_trait::async_trait;

use super::common::{
    ask_blocking, default_console, question_line, read_answer, resolve_choice, INDICATOR_SELECTED,
    INDICATOR_UNSELECTED,
};

const CHECKBOX_INSTRUCTION: &str = "(Comma-separated numbers or names)";

/// Pick any number of entries from a numbered list.
///
/// The answer is an array of the picked choices in list order. Empty input
/// keeps the default selection.
#[derive(Clone)]
pub struct CheckboxPrompt {
    message: String,
    choices: Vec<String>,
    default: Vec<String>,
    instruction: Option<String>,
    console: SharedConsole,
}

/// Create a checkbox prompt writing to stdout.
pub fn checkbox<I, S>(message: impl Into<String>, choices: I) -> CheckboxPrompt
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CheckboxPrompt {
        message: message.into(),
        choices: choices.into_iter().map(Into::into).collect(),
        default: Vec::new(),
        instruction: None,
        console: default_console(),
    }
}

impl CheckboxPrompt {
    /// Choices selected when the user just presses Enter.
    pub fn with_default<I, S>(mut self, selected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default = selected.into_iter().map(Into::into).collect();
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

    pub fn validate(&self) -> PromptResult<()> {
        if self.choices.is_empty() {
            return Err(PromptError::InvalidConfiguration(
                "A list of choices needs to be provided.".to_string(),
            ));
        }
        if let Some(unknown) = self.default.iter().find(|d| !self.choices.contains(d)) {
            return Err(PromptError::InvalidConfiguration(format!(
                "Default '{unknown}' is not one of the choices"
            )));
        }
        Ok(())
    }

    fn render_choices(&self) -> String {
        self.choices
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let indicator = if self.default.contains(choice) {
                    INDICATOR_SELECTED
                } else {
                    INDICATOR_UNSELECTED
                };
                format!("{indicator} {}) {choice}\n", i + 1)
            })
            .collect()
    }

    fn selection(&self, picked: impl Fn(usize, &String) -> bool) -> Value {
        Value::Array(
            self.choices
                .iter()
                .enumerate()
                .filter(|(i, choice)| picked(*i, *choice))
                .map(|(_, choice)| Value::String(choice.clone()))
                .collect(),
        )
    }

    fn parse(&self, line: &str) -> Result<Value, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(self.selection(|_, choice| self.default.contains(choice)));
        }

        let mut picked = vec![false; self.choices.len()];
        for part in line.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let index = resolve_choice(&self.choices, part)
                .ok_or_else(|| format!("Unknown choice '{part}'"))?;
            picked[index] = true;
        }
        Ok(self.selection(|i, _| picked[i]))
    }
}

#[async_trait]
impl Prompt for CheckboxPrompt {
    fn unsafe_ask(&self, patch_stdout: bool) -> PromptResult<Value> {
        self.validate()?;
        let instruction = self
            .instruction
            .as_deref()
            .unwrap_or(CHECKBOX_INSTRUCTION);
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
        self.selection(|_, choice| self.default.contains(choice))
    }
}

impl From<CheckboxPrompt> for Question {
    fn from(prompt: CheckboxPrompt) -> Self {
        Question::new(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askit_io::{shared, MockConsole};
    use serde_json::json;

    fn ask(prompt: CheckboxPrompt, lines: &[&str]) -> (PromptResult<Value>, String) {
        let mock = MockConsole::new();
        mock.queue_lines(lines.iter().copied());
        let answer = prompt.with_console(shared(mock.clone())).unsafe_ask(false);
        (answer, mock.output())
    }

    #[test]
    fn test_mixed_numbers_and_names_in_list_order() {
        let toppings = ["cheese", "olives", "ham"];
        let (answer, output) = ask(checkbox("Toppings", toppings), &["ham, 1"]);
        assert_eq!(answer.unwrap(), json!(["cheese", "ham"]));
        assert!(output.starts_with("○ 1) cheese\n○ 2) olives\n○ 3) ham\n? Toppings "));
    }

    #[test]
    fn test_empty_keeps_default() {
        let prompt = checkbox("Toppings", ["cheese", "olives"]).with_default(["olives"]);
        assert_eq!(prompt.default_value(), json!(["olives"]));
        let (answer, output) = ask(prompt, &[""]);
        assert_eq!(answer.unwrap(), json!(["olives"]));
        assert!(output.contains("● 2) olives"));

        let (answer, _) = ask(checkbox("Toppings", ["cheese"]), &[""]);
        assert_eq!(answer.unwrap(), json!([]));
    }

    #[test]
    fn test_unknown_choice_reprompts() {
        let (answer, output) = ask(checkbox("T", ["a", "b"]), &["a, z", "2,2"]);
        assert_eq!(answer.unwrap(), json!(["b"]));
        assert!(output.contains("Unknown choice 'z'"));
    }

    #[test]
    fn test_invalid_default_is_rejected() {
        let (answer, _) = ask(checkbox("T", ["a"]).with_default(["b"]), &[""]);
        assert!(matches!(answer, Err(PromptError::InvalidConfiguration(_))));
    }
}
