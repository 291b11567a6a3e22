//! Data-driven form definitions.
//!
//! A definition lists questions by name and type, much like the dict-style
//! `prompt()` API of other prompt libraries, but skip conditions are data:
//!
//! ```yaml
//! questions:
//!   - name: wants_pizza
//!     type: confirm
//!     message: Do you want pizza?
//!   - name: size
//!     type: select
//!     message: Which size?
//!     choices: [small, large]
//!     default: small
//!     skip_if: { field: wants_pizza, value: false }
//! ```
//!
//! Conditions compile to expressions over the named questions, so a
//! condition may refer to a field declared later and the form still asks
//! things in a workable order.
//!
//! Every declared question ends up in the answers: a question whose condition
//! holds is recorded with its default rather than left out, and there are no
//! per-question callables for filtering answers. Answers known up front can be
//! passed to [`prompt_with_answers`], which returns them alongside the asked
//! ones.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use askit_core::{AskOptions, Answers, Expr, Form, Operand, Question, Value};
use askit_io::SharedConsole;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::prompts::{checkbox, confirm, select, text};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormDefinition {
    pub questions: Vec<QuestionConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Text,
    Confirm,
    Select,
    Checkbox,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuestionConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_if: Option<Condition>,
    /// Recorded instead of the question's default when `skip_if` holds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_default: Option<Value>,
}

/// A skip condition tree.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Condition {
    All { all: Vec<Condition> },
    Any { any: Vec<Condition> },
    Compare {
        field: String,
        #[serde(default)]
        op: CompareOp,
        value: Value,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOp {
    #[default]
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

impl FormDefinition {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|_| ConfigError::DefinitionFileNotFound(path.as_ref().to_path_buf()))?;
        content.parse()
    }

    pub fn validate(&self) -> Result<()> {
        if self.questions.is_empty() {
            return Err(invalid("a form needs at least one question"));
        }

        let mut names = HashSet::new();
        for question in &self.questions {
            if question.name.is_empty() {
                return Err(invalid("question names cannot be empty"));
            }
            if !names.insert(question.name.as_str()) {
                return Err(invalid(format!("duplicate question name '{}'", question.name)));
            }
        }

        for question in &self.questions {
            question
                .validate()
                .map_err(|reason| invalid(format!("question '{}': {reason}", question.name)))?;
            if let Some(condition) = &question.skip_if {
                condition.validate(&names).map_err(|reason| {
                    invalid(format!("skip_if of '{}': {reason}", question.name))
                })?;
            }
        }

        Ok(())
    }

    /// Validate, then build a form whose prompts all use `console`.
    pub fn build(&self, console: SharedConsole) -> Result<Form> {
        self.validate()?;

        let questions: Vec<(String, Question)> = self
            .questions
            .iter()
            .map(|config| (config.name.clone(), config.to_question(console.clone())))
            .collect();
        let by_name: HashMap<&str, &Question> = questions
            .iter()
            .map(|(name, question)| (name.as_str(), question))
            .collect();

        let mut form = Form::new(questions.iter().cloned())?;
        for config in &self.questions {
            let Some(condition) = &config.skip_if else {
                continue;
            };
            let expr = condition.compile(&by_name)?;
            form = match &config.skip_default {
                Some(default) => form.skip_if_with_default(&config.name, expr, default.clone())?,
                None => form.skip_if(&config.name, expr)?,
            };
        }

        log::debug!("built form with {} questions", form.len());
        Ok(form)
    }
}

impl std::str::FromStr for FormDefinition {
    type Err = ConfigError;

    /// Parse YAML, falling back to JSON.
    fn from_str(content: &str) -> Result<Self> {
        match serde_yaml::from_str(content) {
            Ok(definition) => Ok(definition),
            Err(yaml_err) => serde_json::from_str(content)
                .map_err(|_| ConfigError::ParseError(yaml_err.to_string())),
        }
    }
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidDefinition(reason.into())
}

impl QuestionConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let needs_choices = matches!(self.kind, QuestionKind::Select | QuestionKind::Checkbox);
        if needs_choices && self.choices.is_empty() {
            return Err("a list of choices needs to be provided".to_string());
        }

        let Some(default) = &self.default else {
            return Ok(());
        };
        match (self.kind, default) {
            (QuestionKind::Text, Value::String(_)) => Ok(()),
            (QuestionKind::Confirm, Value::Bool(_)) => Ok(()),
            (QuestionKind::Select, Value::String(s)) if self.choices.contains(s) => Ok(()),
            (QuestionKind::Checkbox, Value::Array(items)) => {
                items.iter().try_for_each(|item| match item {
                    Value::String(s) if self.choices.contains(s) => Ok(()),
                    other => Err(format!("default entry {other} is not one of the choices")),
                })
            }
            (QuestionKind::Select, _) => {
                Err(format!("default {default} is not one of the choices"))
            }
            (kind, _) => Err(format!("default {default} does not fit a {kind:?} question")),
        }
    }

    fn to_question(&self, console: SharedConsole) -> Question {
        let default = self.default.as_ref();
        match self.kind {
            QuestionKind::Text => {
                let mut prompt = text(&self.message).with_console(console);
                if let Some(Value::String(d)) = default {
                    prompt = prompt.with_default(d);
                }
                if let Some(instruction) = &self.instruction {
                    prompt = prompt.with_instruction(instruction);
                }
                prompt.into()
            }
            QuestionKind::Confirm => {
                let mut prompt = confirm(&self.message).with_console(console);
                if let Some(Value::Bool(d)) = default {
                    prompt = prompt.with_default(*d);
                }
                prompt.into()
            }
            QuestionKind::Select => {
                let mut prompt = select(&self.message, &self.choices).with_console(console);
                if let Some(Value::String(d)) = default {
                    prompt = prompt.with_default(d);
                }
                if let Some(instruction) = &self.instruction {
                    prompt = prompt.with_instruction(instruction);
                }
                prompt.into()
            }
            QuestionKind::Checkbox => {
                let mut prompt = checkbox(&self.message, &self.choices).with_console(console);
                if let Some(Value::Array(items)) = default {
                    prompt = prompt.with_default(items.iter().filter_map(Value::as_str));
                }
                if let Some(instruction) = &self.instruction {
                    prompt = prompt.with_instruction(instruction);
                }
                prompt.into()
            }
        }
    }
}

impl Condition {
    /// Every field the condition reads, in the order written.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Condition::All { all: items } | Condition::Any { any: items } => {
                items.iter().flat_map(Condition::fields).collect()
            }
            Condition::Compare { field, .. } => vec![field.as_str()],
        }
    }

    fn validate(&self, names: &HashSet<&str>) -> std::result::Result<(), String> {
        match self.fields().into_iter().find(|field| !names.contains(field)) {
            Some(unknown) => Err(format!("unknown field '{unknown}'")),
            None => Ok(()),
        }
    }

    /// Compile into an expression over the given questions.
    ///
    /// An empty `all` is true and an empty `any` is false.
    pub fn compile(&self, questions: &HashMap<&str, &Question>) -> Result<Expr> {
        match self {
            Condition::All { all } => all.iter().try_fold(Expr::constant(true), |acc, c| {
                Ok(acc.and(c.compile(questions)?))
            }),
            Condition::Any { any } => any.iter().try_fold(Expr::constant(false), |acc, c| {
                Ok(acc.or(c.compile(questions)?))
            }),
            Condition::Compare { field, op, value } => {
                let question = *questions
                    .get(field.as_str())
                    .ok_or_else(|| invalid(format!("unknown field '{field}'")))?;
                let value = Expr::constant(value.clone());
                Ok(match op {
                    CompareOp::Eq => question.eq(value),
                    CompareOp::Ne => question.ne(value),
                    CompareOp::Gt => question.gt(value),
                    CompareOp::Lt => question.lt(value),
                    CompareOp::Ge => question.ge(value),
                    CompareOp::Le => question.le(value),
                })
            }
        }
    }
}

/// Build the form described by `definition` and ask it.
///
/// Cancellation prints the notice and yields empty answers, like
/// [`Form::ask`].
pub fn prompt(
    definition: &FormDefinition,
    console: SharedConsole,
    options: &AskOptions,
) -> Result<Answers> {
    Ok(definition.build(console)?.ask(options)?)
}

/// Like [`prompt`], starting from `seed`.
///
/// The seed entries come first in the result; a question with the same name
/// replaces the seeded value. A cancelled form still yields empty answers.
pub fn prompt_with_answers(
    definition: &FormDefinition,
    console: SharedConsole,
    options: &AskOptions,
    seed: Answers,
) -> Result<Answers> {
    let asked = prompt(definition, console, options)?;
    Ok(merge_answers(seed, asked))
}

fn merge_answers(mut seed: Answers, asked: Answers) -> Answers {
    // a validated definition has at least one question, so empty means cancelled
    if asked.is_empty() {
        return asked;
    }
    for (key, value) in asked.into_map() {
        seed.insert(key, value);
    }
    seed
}

pub async fn prompt_async(
    definition: &FormDefinition,
    console: SharedConsole,
    options: &AskOptions,
) -> Result<Answers> {
    Ok(definition.build(console)?.ask_async(options).await?)
}
