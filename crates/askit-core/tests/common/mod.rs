// Scripted prompts shared by the form integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use askit_core::{Prompt, PromptError, PromptResult, Question, Value};
use async_trait::async_trait;

/// Log of prompt invocations, in call order.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == name).count()
    }
}

/// A prompt that returns a fixed answer (or interrupts) and records each call.
pub struct ScriptedPrompt {
    name: String,
    answer: PromptResult<Value>,
    default: Value,
    log: CallLog,
}

impl ScriptedPrompt {
    pub fn answering(name: &str, answer: impl Into<Value>, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            answer: Ok(answer.into()),
            default: Value::Null,
            log: log.clone(),
        }
    }

    pub fn interrupting(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            answer: Err(PromptError::Interrupted),
            default: Value::Null,
            log: log.clone(),
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    pub fn question(self) -> Question {
        Question::new(self)
    }
}

#[async_trait]
impl Prompt for ScriptedPrompt {
    fn unsafe_ask(&self, _patch_stdout: bool) -> PromptResult<Value> {
        self.log.record(&self.name);
        self.answer.clone()
    }

    async fn unsafe_ask_async(&self, _patch_stdout: bool) -> PromptResult<Value> {
        tokio::task::yield_now().await;
        self.log.record(&self.name);
        self.answer.clone()
    }

    fn default_value(&self) -> Value {
        self.default.clone()
    }
}

/// Shorthand for a question answering `answer`.
pub fn answering(name: &str, answer: impl Into<Value>, log: &CallLog) -> Question {
    ScriptedPrompt::answering(name, answer, log).question()
}
