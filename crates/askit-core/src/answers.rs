//! Ordered answer mapping produced by one form invocation.

use std::ops::Index;

use serde::Serialize;
use serde_json::Map;

use crate::value::Value;

static NULL: Value = Value::Null;

/// Answers keyed by field, iterated in insertion order.
///
/// Indexing with a key that has no answer yields `null`, mirroring
/// `serde_json::Value`, so skip conditions can read `answers["q1"]` without
/// checking presence first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Answers {
    entries: Map<String, Value>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, replacing any previous one for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Remove an answer, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.entries
    }
}

impl Index<&str> for Answers {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.entries.get(key).unwrap_or(&NULL)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Answers {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut answers = Answers::new();
        for (key, value) in iter {
            answers.insert(key, value);
        }
        answers
    }
}

impl IntoIterator for Answers {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<Answers> for Value {
    fn from(answers: Answers) -> Self {
        Value::Object(answers.entries)
    }
}
