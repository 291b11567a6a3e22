//! Askit Core Library
//!
//! The scheduling engine behind askit forms. A form is an ordered set of
//! named questions; any field may carry a skip condition, either a closure
//! over the answers gathered so far or a deferred expression built from other
//! questions. Expressions make the dependencies explicit, so each invocation
//! builds a dependency graph, orders the fields topologically (declaration
//! order breaks ties) and then skips or prompts each field in turn.
//!
//! The crate knows nothing about terminals. A question is anything that
//! implements [`Prompt`]; the `askit` crate provides line-based prompts.
//!
//! ```
//! use askit_core::prelude::*;
//! use askit_core::Value;
//!
//! let size = Question::from_fn(|_| Ok(Value::from(12)));
//! let topping = Question::from_fn(|_| Ok(Value::from("olives")));
//!
//! // asked first although declared last, because "topping" reads it
//! let pizza = form([("topping", topping), ("size", size.clone())])?
//!     .skip_if("topping", size.lt(10))?;
//!
//! assert_eq!(pizza.execution_order()?, vec!["size", "topping"]);
//! let answers = pizza.unsafe_ask(false)?;
//! assert_eq!(answers.keys().collect::<Vec<_>>(), vec!["topping", "size"]);
//! # Ok::<(), askit_core::FormError>(())
//! ```

pub mod answers;
pub mod error;
pub mod eval;
pub mod expr;
pub mod question;
pub mod value;

// Form scheduling
pub mod form;
pub mod graph;
pub mod predicate;
pub mod schedule;

mod executor;

pub use answers::Answers;
pub use error::{
    DependencyError, EvaluationError, FormError, FormResult, PromptError, PromptResult,
};
pub use expr::{BinaryOp, Expr, LeafResolver, Operand, UnaryOp};
pub use form::{form, Form, FormField};
pub use graph::DependencyGraph;
pub use predicate::{IntoPredicate, Predicate, Skip};
pub use question::{AskOptions, Prompt, Question, QuestionId, DEFAULT_KBI_MESSAGE};
pub use schedule::{execution_order, schedule};
pub use value::{Truthy, Value};

/// Convenient re-exports for building and asking forms
///
/// Import everything you need with `use askit_core::prelude::*;`
pub mod prelude {
    pub use crate::answers::Answers;
    pub use crate::error::{FormError, FormResult, PromptError, PromptResult};
    pub use crate::expr::{Expr, Operand};
    pub use crate::form::{form, Form};
    pub use crate::predicate::IntoPredicate;
    pub use crate::question::{AskOptions, Prompt, Question};
    pub use crate::value::Truthy;
}
