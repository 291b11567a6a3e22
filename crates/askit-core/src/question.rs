//! The question boundary: the opaque single-prompt capability forms invoke.
//!
//! A [`Prompt`] is whatever renders and reads one answer. The core never
//! looks inside it; it only asks it for an answer or for its default.
//! [`Question`] wraps a prompt in a cheaply cloneable handle with a stable
//! [`QuestionId`], which is how expressions and forms refer to it.

use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{PromptError, PromptResult};
use crate::value::Value;

/// Message shown when a user aborts a prompt using Ctrl+C
pub const DEFAULT_KBI_MESSAGE: &str = "Cancelled by user";

static NEXT_QUESTION_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a question, assigned once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionId(u64);

impl QuestionId {
    fn next() -> Self {
        QuestionId(NEXT_QUESTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single interactive prompt.
///
/// Implementations raise [`PromptError::Interrupted`] when the user cancels.
/// The async variant defaults to the blocking one; prompts that can suspend
/// on their input should override it.
///
/// Closures with the signature `Fn(bool) -> PromptResult<Value>` implement
/// this trait, which is handy for scripted answers:
///
/// ```
/// use askit_core::{Question, Value};
///
/// let question = Question::from_fn(|_patch_stdout| Ok(Value::from(3)));
/// assert_eq!(question.unsafe_ask(false).unwrap(), Value::from(3));
/// ```
#[async_trait]
pub trait Prompt: Send + Sync {
    /// Ask for an answer, propagating cancellation.
    fn unsafe_ask(&self, patch_stdout: bool) -> PromptResult<Value>;

    /// Ask for an answer without blocking the executor.
    async fn unsafe_ask_async(&self, patch_stdout: bool) -> PromptResult<Value> {
        self.unsafe_ask(patch_stdout)
    }

    /// The value recorded when a form skips this prompt.
    fn default_value(&self) -> Value {
        Value::Null
    }
}

#[async_trait]
impl<F> Prompt for F
where
    F: Fn(bool) -> PromptResult<Value> + Send + Sync,
{
    fn unsafe_ask(&self, patch_stdout: bool) -> PromptResult<Value> {
        self(patch_stdout)
    }
}

/// Options shared by the safe `ask` entry points.
#[derive(Debug, Clone, PartialEq)]
pub struct AskOptions {
    /// Keep concurrent writes to stdout from tearing the prompt line
    pub patch_stdout: bool,
    /// Notice printed when the user cancels
    pub cancel_message: String,
}

impl Default for AskOptions {
    fn default() -> Self {
        Self {
            patch_stdout: false,
            cancel_message: DEFAULT_KBI_MESSAGE.to_string(),
        }
    }
}

impl AskOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patch_stdout(mut self, patch_stdout: bool) -> Self {
        self.patch_stdout = patch_stdout;
        self
    }

    pub fn with_cancel_message<S: Into<String>>(mut self, message: S) -> Self {
        self.cancel_message = message.into();
        self
    }
}

/// Write the cancellation notice surrounded by blank lines.
pub(crate) fn write_cancel_notice<W: Write + ?Sized>(
    out: &mut W,
    message: &str,
) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{message}")?;
    writeln!(out)?;
    out.flush()
}

/// Handle to a prompt with a stable identity.
///
/// Cloning the handle keeps the identity, so a clone used inside a skip
/// condition still refers to the field the original was registered under.
#[derive(Clone)]
pub struct Question {
    id: QuestionId,
    prompt: Arc<dyn Prompt>,
}

impl Question {
    pub fn new<P: Prompt + 'static>(prompt: P) -> Self {
        Self {
            id: QuestionId::next(),
            prompt: Arc::new(prompt),
        }
    }

    /// Wrap a closure as a prompt with a `null` default.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(bool) -> PromptResult<Value> + Send + Sync + 'static,
    {
        Self::new(f)
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn default_value(&self) -> Value {
        self.prompt.default_value()
    }

    /// Ask the question, propagating cancellation.
    pub fn unsafe_ask(&self, patch_stdout: bool) -> PromptResult<Value> {
        log::trace!("asking question {}", self.id);
        self.prompt.unsafe_ask(patch_stdout)
    }

    pub async fn unsafe_ask_async(&self, patch_stdout: bool) -> PromptResult<Value> {
        log::trace!("asking question {} (async)", self.id);
        self.prompt.unsafe_ask_async(patch_stdout).await
    }

    /// Ask the question; a cancellation prints the notice to stdout and
    /// yields `null`.
    pub fn ask(&self, options: &AskOptions) -> PromptResult<Value> {
        self.ask_with_output(options, &mut std::io::stdout())
    }

    pub fn ask_with_output<W: Write + ?Sized>(
        &self,
        options: &AskOptions,
        out: &mut W,
    ) -> PromptResult<Value> {
        match self.unsafe_ask(options.patch_stdout) {
            Err(PromptError::Interrupted) => {
                write_cancel_notice(out, &options.cancel_message)?;
                Ok(Value::Null)
            }
            other => other,
        }
    }

    pub async fn ask_async(&self, options: &AskOptions) -> PromptResult<Value> {
        self.ask_async_with_output(options, &mut std::io::stdout())
            .await
    }

    pub async fn ask_async_with_output<W: Write + Send + ?Sized>(
        &self,
        options: &AskOptions,
        out: &mut W,
    ) -> PromptResult<Value> {
        match self.unsafe_ask_async(options.patch_stdout).await {
            Err(PromptError::Interrupted) => {
                write_cancel_notice(out, &options.cancel_message)?;
                Ok(Value::Null)
            }
            other => other,
        }
    }
}

impl fmt::Debug for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Question")
            .field("id", &self.id)
            .field("prompt", &"<prompt>")
            .finish()
    }
}
