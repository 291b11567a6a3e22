//! # Askit: Interactive Prompts and Forms
//!
//! Askit asks users questions on the terminal: free text, yes/no, pick one,
//! pick many. Questions compose into forms, and any field can be skipped
//! based on other answers. When a skip condition is written as an expression
//! over other questions, the form works out the order to ask things in.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use askit::prelude::*;
//!
//! let wants_pizza: Question = confirm("Do you want pizza?").into();
//! let size: Question = select("Which size?", ["small", "large"])
//!     .with_default("small")
//!     .into();
//!
//! let answers = form([("wants_pizza", wants_pizza.clone()), ("size", size)])?
//!     .skip_if("size", wants_pizza.eq(false))?
//!     .ask(&AskOptions::default())?;
//!
//! println!("{}", serde_json::to_string_pretty(&answers).unwrap());
//! # Ok::<(), askit::FormError>(())
//! ```
//!
//! ## Architecture
//!
//! - **Scheduling engine** (`askit-core`): expressions, predicates, the
//!   dependency graph, the scheduler and the form executor
//! - **Console I/O** (`askit-io`): line-oriented stdin/stdout backend and a mock
//! - **Prompts and definitions** (`askit`): this crate

// Re-export the scheduling engine from askit-core
pub use askit_core::{
    // Answers and values
    Answers, Truthy, Value,
    // Errors
    DependencyError, EvaluationError, FormError, FormResult, PromptError, PromptResult,
    // Questions
    AskOptions, Prompt, Question, QuestionId, DEFAULT_KBI_MESSAGE,
    // Expressions and predicates
    BinaryOp, Expr, IntoPredicate, LeafResolver, Operand, Predicate, Skip, UnaryOp,
    // Forms and scheduling
    form, DependencyGraph, Form, FormField,
};

// Re-export console backends from askit-io
pub use askit_io::{
    mock, shared, Console, ConsoleError, ConsoleResult, InputEvent, MockConsole, OutputTarget,
    SharedConsole, StdConsole,
};

pub mod config;
pub mod error;
pub mod prompts;

pub use config::{
    prompt, prompt_async, prompt_with_answers, CompareOp, Condition, FormDefinition,
    QuestionConfig, QuestionKind,
};
pub use error::ConfigError;
pub use prompts::{
    checkbox, confirm, select, text, CheckboxPrompt, ConfirmPrompt, SelectPrompt, TextPrompt,
};

/// Convenient re-exports for common usage patterns
///
/// Import everything you need with `use askit::prelude::*;`
pub mod prelude {
    pub use crate::prompts::{checkbox, confirm, select, text};
    pub use askit_core::prelude::*;
    pub use askit_io::{shared, MockConsole, SharedConsole, StdConsole};
}
