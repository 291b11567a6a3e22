//! Skip conditions attached to form fields.

use std::fmt;
use std::sync::Arc;

use crate::answers::Answers;
use crate::error::FormResult;
use crate::expr::{Expr, LeafResolver};
use crate::question::Question;
use crate::value::{Truthy, Value};

type AnswerFn = dyn Fn(&Answers) -> bool + Send + Sync;

/// A skip condition: an opaque function of the answers, or an expression.
///
/// Only expressions expose which questions they read, so only expressions
/// contribute edges to the dependency graph. A function is expected to read
/// fields declared before the one it guards.
#[derive(Clone)]
pub enum Predicate {
    Function(Arc<AnswerFn>),
    Expression(Expr),
}

impl Predicate {
    pub fn function<F, R>(f: F) -> Self
    where
        F: Fn(&Answers) -> R + Send + Sync + 'static,
        R: Truthy,
    {
        Predicate::Function(Arc::new(move |answers: &Answers| f(answers).is_truthy()))
    }

    pub fn expression(expr: impl Into<Expr>) -> Self {
        Predicate::Expression(expr.into())
    }

    pub fn as_expression(&self) -> Option<&Expr> {
        match self {
            Predicate::Expression(expr) => Some(expr),
            Predicate::Function(_) => None,
        }
    }

    /// Decide whether the guarded field should be skipped.
    ///
    /// # Errors
    ///
    /// Expression predicates surface evaluation errors and answers that are
    /// not recorded yet. Function predicates cannot fail.
    pub fn evaluate<R: LeafResolver + ?Sized>(
        &self,
        answers: &Answers,
        resolver: &R,
    ) -> FormResult<bool> {
        match self {
            Predicate::Function(f) => Ok(f(answers)),
            Predicate::Expression(expr) => Ok(expr.evaluate(resolver)?.is_truthy()),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Function(_) => write!(f, "Function(<closure>)"),
            Predicate::Expression(expr) => f.debug_tuple("Expression").field(expr).finish(),
        }
    }
}

/// Conversion into a [`Predicate`], accepted by `Form::skip_if`.
///
/// Implemented for closures over [`Answers`] returning anything [`Truthy`],
/// for [`Expr`], and for `&Question` (skip when its answer is truthy).
pub trait IntoPredicate {
    fn into_predicate(self) -> Predicate;
}

impl IntoPredicate for Predicate {
    fn into_predicate(self) -> Predicate {
        self
    }
}

impl IntoPredicate for Expr {
    fn into_predicate(self) -> Predicate {
        Predicate::Expression(self)
    }
}

impl IntoPredicate for &Question {
    fn into_predicate(self) -> Predicate {
        Predicate::Expression(Expr::from(self))
    }
}

impl<F, R> IntoPredicate for F
where
    F: Fn(&Answers) -> R + Send + Sync + 'static,
    R: Truthy,
{
    fn into_predicate(self) -> Predicate {
        Predicate::function(self)
    }
}

/// A predicate together with the value recorded when it fires.
#[derive(Debug, Clone)]
pub struct Skip {
    pub predicate: Predicate,
    /// Overrides the question's own default when set
    pub default: Option<Value>,
}

impl Skip {
    pub fn new(predicate: impl IntoPredicate) -> Self {
        Self {
            predicate: predicate.into_predicate(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}
