//! Operator semantics over answer values.

use std::cmp::Ordering;

use serde_json::Number;

use crate::error::EvaluationError;
use crate::expr::{BinaryOp, UnaryOp};
use crate::value::{type_name, Value};

type EvalResult = Result<Value, EvaluationError>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn of(value: &Value) -> Option<Num> {
        match value {
            Value::Bool(b) => Some(Num::Int(i64::from(*b))),
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => Num::Int(i),
                None => Num::Float(n.as_f64()?),
            }),
            _ => None,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Num::Int(i) => i as f64,
            Num::Float(f) => f,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Num::Int(i) => i == 0,
            Num::Float(f) => f == 0.0,
        }
    }
}

fn float_value(op: BinaryOp, f: f64) -> EvalResult {
    Number::from_f64(f)
        .map(Value::Number)
        .ok_or(EvaluationError::NonFinite { op: op.symbol() })
}

fn num_value(op: BinaryOp, n: Num) -> EvalResult {
    match n {
        Num::Int(i) => Ok(Value::from(i)),
        Num::Float(f) => float_value(op, f),
    }
}

fn unsupported(op: BinaryOp, left: &Value, right: &Value) -> EvaluationError {
    EvaluationError::UnsupportedOperands {
        op: op.symbol(),
        left: type_name(left),
        right: type_name(right),
    }
}

/// Apply a unary operator.
pub fn apply_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match op {
        UnaryOp::Abs => match Num::of(operand) {
            Some(Num::Int(i)) => i
                .checked_abs()
                .map(Value::from)
                .ok_or(EvaluationError::Overflow { op: op.symbol() }),
            Some(Num::Float(f)) => Ok(Value::from(f.abs())),
            None => Err(EvaluationError::UnsupportedOperand {
                op: op.symbol(),
                operand: type_name(operand),
            }),
        },
    }
}

/// Apply a binary operator.
pub fn apply_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(equals(left, right))),
        BinaryOp::Ne => Ok(Value::Bool(!equals(left, right))),
        BinaryOp::Gt | BinaryOp::Lt | BinaryOp::Ge | BinaryOp::Le => {
            let ordering = compare(left, right).ok_or_else(|| unsupported(op, left, right))?;
            let result = match op {
                BinaryOp::Gt => ordering == Ordering::Greater,
                BinaryOp::Lt => ordering == Ordering::Less,
                BinaryOp::Ge => ordering != Ordering::Less,
                _ => ordering != Ordering::Greater,
            };
            Ok(Value::Bool(result))
        }
        BinaryOp::And | BinaryOp::Or | BinaryOp::Xor => logical(op, left, right),
        BinaryOp::Add => add(op, left, right),
        BinaryOp::Sub => arithmetic(op, left, right, i64::checked_sub, |a, b| a - b),
        BinaryOp::Mul => multiply(op, left, right),
        BinaryOp::TrueDiv => true_divide(op, left, right),
        BinaryOp::DivMod => divmod(op, left, right),
    }
}

fn equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(_), _) | (_, Value::Number(_)) => match (Num::of(left), Num::of(right)) {
            (Some(a), Some(b)) => match (a, b) {
                (Num::Int(a), Num::Int(b)) => a == b,
                _ => a.as_f64() == b.as_f64(),
            },
            _ => false,
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| equals(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter().all(|(key, x)| b.get(key).is_some_and(|y| equals(x, y)))
        }
        _ => left == right,
    }
}

fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => match (Num::of(left)?, Num::of(right)?) {
            (Num::Int(a), Num::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        },
    }
}

fn logical(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    if let (Value::Bool(a), Value::Bool(b)) = (left, right) {
        let result = match op {
            BinaryOp::And => *a & *b,
            BinaryOp::Or => *a | *b,
            _ => *a ^ *b,
        };
        return Ok(Value::Bool(result));
    }
    match (Num::of(left), Num::of(right)) {
        (Some(Num::Int(a)), Some(Num::Int(b))) => {
            let result = match op {
                BinaryOp::And => a & b,
                BinaryOp::Or => a | b,
                _ => a ^ b,
            };
            Ok(Value::from(result))
        }
        _ => Err(unsupported(op, left, right)),
    }
}

fn arithmetic(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> EvalResult {
    match (Num::of(left), Num::of(right)) {
        (Some(Num::Int(a)), Some(Num::Int(b))) => int_op(a, b)
            .map(Value::from)
            .ok_or(EvaluationError::Overflow { op: op.symbol() }),
        (Some(a), Some(b)) => float_value(op, float_op(a.as_f64(), b.as_f64())),
        _ => Err(unsupported(op, left, right)),
    }
}

fn add(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
        (Value::Array(a), Value::Array(b)) => {
            Ok(Value::Array(a.iter().chain(b.iter()).cloned().collect()))
        }
        _ => arithmetic(op, left, right, i64::checked_add, |a, b| a + b),
    }
}

fn repeat_count(value: &Value) -> Option<usize> {
    match value {
        Value::Bool(_) | Value::Number(_) => match Num::of(value)? {
            Num::Int(n) => Some(usize::try_from(n.max(0)).unwrap_or(0)),
            Num::Float(_) => None,
        },
        _ => None,
    }
}

/// Longest string (in bytes) or array a repetition may produce.
const MAX_REPEAT_LEN: usize = 1 << 24;

fn repeated_len(op: BinaryOp, len: usize, count: usize) -> Result<usize, EvaluationError> {
    match len.checked_mul(count) {
        Some(total) if total <= MAX_REPEAT_LEN => Ok(total),
        _ => Err(EvaluationError::Overflow { op: op.symbol() }),
    }
}

fn multiply(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::String(s), n) | (n, Value::String(s)) => match repeat_count(n) {
            Some(count) => {
                repeated_len(op, s.len(), count)?;
                Ok(Value::String(s.repeat(count)))
            }
            None => Err(unsupported(op, left, right)),
        },
        (Value::Array(items), n) | (n, Value::Array(items)) => match repeat_count(n) {
            Some(count) => {
                let total = repeated_len(op, items.len(), count)?;
                Ok(Value::Array(items.iter().cloned().cycle().take(total).collect()))
            }
            None => Err(unsupported(op, left, right)),
        },
        _ => arithmetic(op, left, right, i64::checked_mul, |a, b| a * b),
    }
}

fn true_divide(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match (Num::of(left), Num::of(right)) {
        (Some(_), Some(b)) if b.is_zero() => Err(EvaluationError::DivisionByZero { op: op.symbol() }),
        (Some(a), Some(b)) => float_value(op, a.as_f64() / b.as_f64()),
        _ => Err(unsupported(op, left, right)),
    }
}

/// Floor division and remainder; the remainder takes the divisor's sign.
fn divmod(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    let (a, b) = match (Num::of(left), Num::of(right)) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(unsupported(op, left, right)),
    };
    if b.is_zero() {
        return Err(EvaluationError::DivisionByZero { op: op.symbol() });
    }
    let (quotient, remainder) = match (a, b) {
        (Num::Int(a), Num::Int(b)) => {
            let overflow = EvaluationError::Overflow { op: op.symbol() };
            let mut q = a.checked_div(b).ok_or(overflow.clone())?;
            let mut r = a.checked_rem(b).ok_or(overflow)?;
            if r != 0 && (r < 0) != (b < 0) {
                q -= 1;
                r += b;
            }
            (Num::Int(q), Num::Int(r))
        }
        (a, b) => {
            let (a, b) = (a.as_f64(), b.as_f64());
            let q = (a / b).floor();
            (Num::Float(q), Num::Float(a - q * b))
        }
    };
    Ok(Value::Array(vec![
        num_value(op, quotient)?,
        num_value(op, remainder)?,
    ]))
}
