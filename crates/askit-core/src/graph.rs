//! Dependency graph between form fields.
//!
//! A field whose skip condition is an expression depends on every field whose
//! question appears in that expression. Nodes are indices into the form's
//! declaration order; edges point from the dependent field to the field it
//! reads.

use std::collections::{BTreeSet, HashMap};

use crate::error::{FormError, FormResult};
use crate::form::FormField;
use crate::predicate::Skip;
use crate::question::QuestionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGraph {
    /// Field keys in declaration order
    keys: Vec<String>,
    /// `dependencies[i]` holds the fields that must be answered before field `i`
    dependencies: Vec<BTreeSet<usize>>,
}

impl DependencyGraph {
    /// Create a graph with one node per key and no edges.
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        let dependencies = vec![BTreeSet::new(); keys.len()];
        Self { keys, dependencies }
    }

    /// Build the graph for a form's fields and skip conditions.
    ///
    /// `owners` maps each registered question to the index of its field.
    /// Function predicates contribute no edges.
    pub fn build(
        fields: &[FormField],
        owners: &HashMap<QuestionId, usize>,
        skips: &HashMap<String, Skip>,
    ) -> FormResult<Self> {
        let mut graph = Self::new(fields.iter().map(|field| field.key()));

        for (index, field) in fields.iter().enumerate() {
            let Some(expr) = skips
                .get(field.key())
                .and_then(|skip| skip.predicate.as_expression())
            else {
                continue;
            };

            for question in expr.questions() {
                let owner = owners.get(&question).copied().ok_or_else(|| {
                    FormError::MalformedPredicate {
                        key: field.key().to_string(),
                        reason: format!("question {question} does not belong to this form"),
                    }
                })?;
                graph.add_dependency(index, owner);
            }
        }

        Ok(graph)
    }

    /// Record that field `dependent` reads the answer of field `dependency`.
    ///
    /// Indices out of range are ignored.
    pub fn add_dependency(&mut self, dependent: usize, dependency: usize) {
        if dependency < self.keys.len() {
            if let Some(set) = self.dependencies.get_mut(dependent) {
                set.insert(dependency);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn key(&self, index: usize) -> Option<&str> {
        self.keys.get(index).map(String::as_str)
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// Indices of the fields `index` depends on, ascending.
    pub fn dependencies(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.dependencies
            .get(index)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Keys of the fields `key` depends on, in declaration order.
    pub fn dependencies_of(&self, key: &str) -> Vec<&str> {
        self.index_of(key)
            .map(|index| {
                self.dependencies(index)
                    .map(|dep| self.keys[dep].as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All edges as `(dependent, dependency)` key pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.dependencies.iter().enumerate().flat_map(move |(from, deps)| {
            deps.iter()
                .map(move |&to| (self.keys[from].as_str(), self.keys[to].as_str()))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.dependencies.iter().map(BTreeSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Operand;
    use crate::predicate::IntoPredicate;
    use crate::question::Question;
    use crate::{Answers, Value};

    fn fields(keys: &[&str]) -> (Vec<FormField>, HashMap<QuestionId, usize>) {
        let fields: Vec<FormField> = keys
            .iter()
            .map(|key| FormField::new(*key, Question::from_fn(|_| Ok(Value::Null))))
            .collect();
        let owners = fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.question().id(), i))
            .collect();
        (fields, owners)
    }

    #[test]
    fn test_expression_predicates_add_edges() {
        let (fields, owners) = fields(&["a", "b", "c"]);
        let mut skips = HashMap::new();
        skips.insert(
            "a".to_string(),
            Skip::new((fields[2].question() + fields[1].question()).gt(1)),
        );
        skips.insert("b".to_string(), Skip::new(fields[2].question().eq(true)));

        let graph = DependencyGraph::build(&fields, &owners, &skips).unwrap();
        assert_eq!(graph.dependencies_of("a"), vec!["b", "c"]);
        assert_eq!(graph.dependencies_of("b"), vec!["c"]);
        assert!(graph.dependencies_of("c").is_empty());
        assert_eq!(
            graph.edges().collect::<Vec<_>>(),
            vec![("a", "b"), ("a", "c"), ("b", "c")]
        );
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_function_predicates_add_no_edges() {
        let (fields, owners) = fields(&["a", "b"]);
        let mut skips = HashMap::new();
        skips.insert("a".to_string(), Skip::new(|a: &Answers| a["b"].clone()));

        let graph = DependencyGraph::build(&fields, &owners, &skips).unwrap();
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_foreign_question_is_rejected() {
        let (fields, owners) = fields(&["a"]);
        let stranger = Question::from_fn(|_| Ok(Value::Null));
        let mut skips = HashMap::new();
        skips.insert("a".to_string(), Skip::new((&stranger).into_predicate()));

        let err = DependencyGraph::build(&fields, &owners, &skips).unwrap_err();
        assert!(matches!(err, FormError::MalformedPredicate { ref key, .. } if key == "a"));
    }

    #[test]
    fn test_manual_graph() {
        let mut graph = DependencyGraph::new(["x", "y"]);
        graph.add_dependency(0, 1);
        graph.add_dependency(0, 7);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.index_of("y"), Some(1));
        assert_eq!(graph.key(0), Some("x"));
        assert_eq!(graph.dependencies(0).collect::<Vec<_>>(), vec![1]);
        assert!(graph.dependencies_of("missing").is_empty());
    }
}
