//! Deferred expressions over questions and constants.
//!
//! Applying an operator to a [`Question`] or an [`Expr`] never evaluates
//! anything; it builds a new node. The tree is evaluated later, against
//! whatever answers exist at that moment, which is what lets a skip condition
//! be written up front and checked in the middle of a form.
//!
//! Comparisons go through the [`Operand`] builder methods because Rust's
//! comparison operators must return `bool`. Arithmetic and boolean operators
//! are also overloaded:
//!
//! ```
//! use std::collections::HashMap;
//! use askit_core::{Operand, Question, Value};
//!
//! let q1 = Question::from_fn(|_| Ok(Value::from(2)));
//! let q2 = Question::from_fn(|_| Ok(Value::from(3)));
//!
//! let sum = &q1 + &q2;
//! let big = (&q1 * 10).gt(15);
//!
//! let answers = HashMap::from([(q1.id(), Value::from(2)), (q2.id(), Value::from(3))]);
//! assert_eq!(sum.evaluate(&answers).unwrap(), Value::from(5));
//! assert_eq!(big.evaluate(&answers).unwrap(), Value::from(true));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Sub};

use crate::error::{FormError, FormResult};
use crate::eval;
use crate::question::{Question, QuestionId};
use crate::value::Value;

/// Single-operand operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Abs,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Abs => "abs",
        }
    }
}

/// Two-operand operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    And,
    Or,
    Xor,
    Add,
    Sub,
    Mul,
    DivMod,
    TrueDiv,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Gt => ">",
            BinaryOp::Lt => "<",
            BinaryOp::Ge => ">=",
            BinaryOp::Le => "<=",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::DivMod => "divmod",
            BinaryOp::TrueDiv => "/",
        }
    }
}

/// An immutable expression node.
#[derive(Debug, Clone)]
pub enum Expr {
    /// The answer of a question
    Leaf(QuestionId),
    /// A literal value
    Constant(Value),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

/// Source of answers for `Leaf` nodes.
pub trait LeafResolver {
    fn resolve(&self, question: QuestionId) -> Option<&Value>;
}

impl LeafResolver for HashMap<QuestionId, Value> {
    fn resolve(&self, question: QuestionId) -> Option<&Value> {
        self.get(&question)
    }
}

impl Expr {
    pub fn constant(value: impl Into<Value>) -> Self {
        Expr::Constant(value.into())
    }

    pub fn unary(op: UnaryOp, operand: impl Into<Expr>) -> Self {
        Expr::Unary(op, Box::new(operand.into()))
    }

    pub fn binary(op: BinaryOp, left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::Binary(op, Box::new(left.into()), Box::new(right.into()))
    }

    /// Evaluate the tree against a snapshot of answers.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingAnswer`] when a referenced question has no
    /// answer yet and [`FormError::Evaluation`] when an operator does not
    /// accept its operands.
    pub fn evaluate<R: LeafResolver + ?Sized>(&self, answers: &R) -> FormResult<Value> {
        match self {
            Expr::Leaf(id) => answers
                .resolve(*id)
                .cloned()
                .ok_or(FormError::MissingAnswer(*id)),
            Expr::Constant(value) => Ok(value.clone()),
            Expr::Unary(op, operand) => {
                let value = operand.evaluate(answers)?;
                Ok(eval::apply_unary(*op, &value)?)
            }
            Expr::Binary(op, left, right) => {
                let left = left.evaluate(answers)?;
                let right = right.evaluate(answers)?;
                Ok(eval::apply_binary(*op, &left, &right)?)
            }
        }
    }

    /// Questions referenced anywhere in the tree, in first-seen order.
    pub fn questions(&self) -> Vec<QuestionId> {
        let mut found = Vec::new();
        self.collect_questions(&mut found);
        found
    }

    fn collect_questions(&self, found: &mut Vec<QuestionId>) {
        match self {
            Expr::Leaf(id) => {
                if !found.contains(id) {
                    found.push(*id);
                }
            }
            Expr::Constant(_) => {}
            Expr::Unary(_, operand) => operand.collect_questions(found),
            Expr::Binary(_, left, right) => {
                left.collect_questions(found);
                right.collect_questions(found);
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Leaf(id) => write!(f, "question{id}"),
            Expr::Constant(value) => write!(f, "{value}"),
            Expr::Unary(op, operand) => write!(f, "{}({operand})", op.symbol()),
            Expr::Binary(BinaryOp::DivMod, left, right) => write!(f, "divmod({left}, {right})"),
            Expr::Binary(op, left, right) => write!(f, "({left} {} {right})", op.symbol()),
        }
    }
}

impl From<&Question> for Expr {
    fn from(question: &Question) -> Self {
        Expr::Leaf(question.id())
    }
}

impl From<Question> for Expr {
    fn from(question: Question) -> Self {
        Expr::Leaf(question.id())
    }
}

macro_rules! constant_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Expr {
                fn from(value: $ty) -> Self {
                    Expr::Constant(Value::from(value))
                }
            }
        )*
    };
}

constant_from!(bool, i32, i64, u32, u64, f64, &str, String, Value);

/// Builder methods shared by questions and expression nodes.
///
/// Every method returns a new [`Expr`]; nothing is evaluated.
pub trait Operand: Sized {
    fn into_expr(self) -> Expr;

    fn eq(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Eq, self.into_expr(), other)
    }

    fn ne(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Ne, self.into_expr(), other)
    }

    fn gt(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Gt, self.into_expr(), other)
    }

    fn lt(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Lt, self.into_expr(), other)
    }

    fn ge(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Ge, self.into_expr(), other)
    }

    fn le(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Le, self.into_expr(), other)
    }

    fn and(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::And, self.into_expr(), other)
    }

    fn or(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Or, self.into_expr(), other)
    }

    fn xor(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Xor, self.into_expr(), other)
    }

    fn plus(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Add, self.into_expr(), other)
    }

    fn minus(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Sub, self.into_expr(), other)
    }

    fn times(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Mul, self.into_expr(), other)
    }

    fn divmod(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::DivMod, self.into_expr(), other)
    }

    fn truediv(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::TrueDiv, self.into_expr(), other)
    }

    fn abs(self) -> Expr {
        Expr::unary(UnaryOp::Abs, self.into_expr())
    }
}

impl Operand for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

impl Operand for &Question {
    fn into_expr(self) -> Expr {
        Expr::from(self)
    }
}

macro_rules! overload_operators {
    ($($target:ty),* $(,)?) => {
        $(
            impl<R: Into<Expr>> Add<R> for $target {
                type Output = Expr;
                fn add(self, rhs: R) -> Expr {
                    Operand::plus(self, rhs)
                }
            }

            impl<R: Into<Expr>> Sub<R> for $target {
                type Output = Expr;
                fn sub(self, rhs: R) -> Expr {
                    Operand::minus(self, rhs)
                }
            }

            impl<R: Into<Expr>> Mul<R> for $target {
                type Output = Expr;
                fn mul(self, rhs: R) -> Expr {
                    Operand::times(self, rhs)
                }
            }

            impl<R: Into<Expr>> Div<R> for $target {
                type Output = Expr;
                fn div(self, rhs: R) -> Expr {
                    Operand::truediv(self, rhs)
                }
            }

            impl<R: Into<Expr>> BitAnd<R> for $target {
                type Output = Expr;
                fn bitand(self, rhs: R) -> Expr {
                    Operand::and(self, rhs)
                }
            }

            impl<R: Into<Expr>> BitOr<R> for $target {
                type Output = Expr;
                fn bitor(self, rhs: R) -> Expr {
                    Operand::or(self, rhs)
                }
            }

            impl<R: Into<Expr>> BitXor<R> for $target {
                type Output = Expr;
                fn bitxor(self, rhs: R) -> Expr {
                    Operand::xor(self, rhs)
                }
            }
        )*
    };
}

overload_operators!(Expr, &Question);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn answered(value: Value) -> (Question, HashMap<QuestionId, Value>) {
        let q = Question::from_fn(|_| Ok(Value::Null));
        let answers = HashMap::from([(q.id(), value)]);
        (q, answers)
    }

    #[test]
    fn test_comparisons_are_deferred() {
        let (q, answers) = answered(json!(3));
        let equals = q.eq(3);
        let greater = (&q).gt(5);
        assert!(matches!(equals, Expr::Binary(BinaryOp::Eq, _, _)));
        assert_eq!(equals.evaluate(&answers).unwrap(), json!(true));
        assert_eq!(greater.evaluate(&answers).unwrap(), json!(false));
    }

    #[test]
    fn test_question_plus_question() {
        let q1 = Question::from_fn(|_| Ok(Value::Null));
        let q2 = Question::from_fn(|_| Ok(Value::Null));
        let answers = HashMap::from([(q1.id(), json!(2)), (q2.id(), json!(3))]);
        assert_eq!((&q1 + &q2).evaluate(&answers).unwrap(), json!(5));
        assert_eq!(q1.plus(&q2).evaluate(&answers).unwrap(), json!(5));
    }

    #[test]
    fn test_nested_composition() {
        let (q, answers) = answered(json!(-7));
        let expr = ((&q * 2).abs() - 4).divmod(3);
        assert_eq!(expr.evaluate(&answers).unwrap(), json!([3, 1]));
        let expr = (q.ge(-10) & q.lt(0)) | false;
        assert_eq!(expr.evaluate(&answers).unwrap(), json!(true));
    }

    #[test]
    fn test_missing_answer_is_reported() {
        let q = Question::from_fn(|_| Ok(Value::Null));
        let none: HashMap<QuestionId, Value> = HashMap::new();
        let err = q.eq(1).evaluate(&none).unwrap_err();
        assert!(matches!(err, FormError::MissingAnswer(id) if id == q.id()));
    }

    #[test]
    fn test_incompatible_operands_surface() {
        let (q, answers) = answered(json!("text"));
        let err = (&q - 1).evaluate(&answers).unwrap_err();
        assert!(matches!(err, FormError::Evaluation(_)));
    }

    #[test]
    fn test_questions_collects_unique_leaves() {
        let q1 = Question::from_fn(|_| Ok(Value::Null));
        let q2 = Question::from_fn(|_| Ok(Value::Null));
        let expr = (&q1 + &q2).eq(&q1).or(Expr::constant(true));
        assert_eq!(expr.questions(), vec![q1.id(), q2.id()]);
        assert!(Expr::constant(1).questions().is_empty());
    }

    #[test]
    fn test_display() {
        let q = Question::from_fn(|_| Ok(Value::Null));
        let expr = (&q + 1).gt(5);
        assert_eq!(expr.to_string(), format!("((question{} + 1) > 5)", q.id()));
        assert_eq!(q.divmod(2).to_string(), format!("divmod(question{}, 2)", q.id()));
        assert_eq!(q.abs().to_string(), format!("abs(question{})", q.id()));
    }
}
