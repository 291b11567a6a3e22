//! Error types for prompts, expression evaluation and form scheduling.

use thiserror::Error;

use crate::question::QuestionId;

/// Errors raised by a single prompt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PromptError {
    /// User interrupted the prompt (e.g., Ctrl+C)
    #[error("Prompt was interrupted")]
    Interrupted,

    /// I/O error occurred during prompt operation
    #[error("I/O error: {0}")]
    IoError(String),

    /// Invalid prompt configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<std::io::Error> for PromptError {
    fn from(err: std::io::Error) -> Self {
        PromptError::IoError(err.to_string())
    }
}

/// Errors raised while applying an operator to evaluated operands.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("unsupported operand types for '{op}': {left} and {right}")]
    UnsupportedOperands {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("unsupported operand type for '{op}': {operand}")]
    UnsupportedOperand {
        op: &'static str,
        operand: &'static str,
    },

    #[error("division by zero in '{op}'")]
    DivisionByZero { op: &'static str },

    #[error("integer overflow in '{op}'")]
    Overflow { op: &'static str },

    #[error("'{op}' produced a non-finite number")]
    NonFinite { op: &'static str },
}

/// The skip conditions of a form reference each other in a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("skip conditions form a dependency cycle; unresolved fields: {}", unresolved.join(", "))]
pub struct DependencyError {
    /// Fields that could not be scheduled, in declaration order.
    pub unresolved: Vec<String>,
}

/// Errors raised while building or asking a form.
#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Dependency(#[from] DependencyError),

    #[error("evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("duplicate field key '{0}'")]
    DuplicateKey(String),

    #[error("question {question} is registered under both '{first}' and '{second}'")]
    DuplicateQuestion {
        question: QuestionId,
        first: String,
        second: String,
    },

    #[error("no field named '{0}' in this form")]
    UnknownField(String),

    #[error("malformed skip condition for '{key}': {reason}")]
    MalformedPredicate { key: String, reason: String },

    #[error("question {0} has not been answered yet")]
    MissingAnswer(QuestionId),

    #[error("failed to write cancellation notice: {0}")]
    Io(#[from] std::io::Error),
}

impl FormError {
    /// Whether this error is the interactive cancellation signal.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, FormError::Prompt(PromptError::Interrupted))
    }
}

/// Result type for prompt operations
pub type PromptResult<T> = Result<T, PromptError>;

/// Result type for form operations
pub type FormResult<T> = Result<T, FormError>;
