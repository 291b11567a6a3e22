//! Answer values and their boolean coercion.
//!
//! Answers are plain [`serde_json::Value`]s so they serialize without any
//! conversion layer. This module adds the truthiness rules used when a skip
//! condition yields something other than a boolean.

pub use serde_json::Value;

/// Coercion of a predicate result into a skip decision.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i != 0
                } else if let Some(u) = n.as_u64() {
                    u != 0
                } else {
                    n.as_f64().is_some_and(|f| f != 0.0)
                }
            }
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
        }
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

/// Short type name used in evaluation error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!json!(false).is_truthy());
        assert!(json!(true).is_truthy());
        assert!(!json!(0).is_truthy());
        assert!(!json!(0.0).is_truthy());
        assert!(json!(-2).is_truthy());
        assert!(json!(0.5).is_truthy());
        assert!(!json!("").is_truthy());
        assert!(json!("foo").is_truthy());
        assert!(!json!([]).is_truthy());
        assert!(json!([1]).is_truthy());
        assert!(!json!({}).is_truthy());
        assert!(json!({"a": 1}).is_truthy());
    }

    #[test]
    fn test_option_truthiness() {
        assert!(!None::<bool>.is_truthy());
        assert!(Some(true).is_truthy());
        assert!(!Some(json!(0)).is_truthy());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(type_name(&json!(1)), "integer");
        assert_eq!(type_name(&json!(1.5)), "float");
        assert_eq!(type_name(&json!("x")), "string");
        assert_eq!(type_name(&Value::Null), "null");
    }
}
