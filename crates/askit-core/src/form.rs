//! Forms: named questions asked in sequence, with optional skip conditions.

use std::collections::HashMap;
use std::io::Write;

use crate::answers::Answers;
use crate::error::{FormError, FormResult};
use crate::executor::Executor;
use crate::graph::DependencyGraph;
use crate::predicate::{IntoPredicate, Predicate, Skip};
use crate::question::{write_cancel_notice, AskOptions, Question, QuestionId};
use crate::schedule::execution_order;
use crate::value::Value;

/// A question registered under a key.
#[derive(Debug, Clone)]
pub struct FormField {
    key: String,
    question: Question,
}

impl FormField {
    pub fn new(key: impl Into<String>, question: Question) -> Self {
        Self {
            key: key.into(),
            question,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn question(&self) -> &Question {
        &self.question
    }
}

/// Build a form from `(key, question)` pairs, asked in the given order
/// unless skip conditions require otherwise.
///
/// ```
/// use askit_core::{form, Answers, Question, Value};
///
/// let q1 = Question::from_fn(|_| Ok(Value::Bool(false)));
/// let q2 = Question::from_fn(|_| Ok(Value::from("asked")));
///
/// let answers = form([("q1", q1), ("q2", q2)])?
///     .skip_if("q2", |a: &Answers| a["q1"] == false)?
///     .unsafe_ask(false)?;
///
/// assert_eq!(answers["q2"], Value::Null);
/// # Ok::<(), askit_core::FormError>(())
/// ```
///
/// # Errors
///
/// [`FormError::DuplicateKey`] when a key repeats and
/// [`FormError::DuplicateQuestion`] when one question is registered twice.
pub fn form<I, K>(fields: I) -> FormResult<Form>
where
    I: IntoIterator<Item = (K, Question)>,
    K: Into<String>,
{
    Form::new(fields)
}

/// An ordered collection of questions.
///
/// The dependency graph and the execution order are recomputed on every
/// call to one of the ask methods; answers never outlive the call.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FormField>,
    owners: HashMap<QuestionId, usize>,
    skips: HashMap<String, Skip>,
}

impl Form {
    pub fn new<I, K>(fields: I) -> FormResult<Self>
    where
        I: IntoIterator<Item = (K, Question)>,
        K: Into<String>,
    {
        let mut form = Form {
            fields: Vec::new(),
            owners: HashMap::new(),
            skips: HashMap::new(),
        };

        for (key, question) in fields {
            let field = FormField::new(key, question);
            if form.field(field.key()).is_some() {
                return Err(FormError::DuplicateKey(field.key));
            }
            let id = field.question.id();
            if let Some(&existing) = form.owners.get(&id) {
                return Err(FormError::DuplicateQuestion {
                    question: id,
                    first: form.fields[existing].key.clone(),
                    second: field.key,
                });
            }
            form.owners.insert(id, form.fields.len());
            form.fields.push(field);
        }

        Ok(form)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The skip condition attached to `key`, if any.
    pub fn skip_for(&self, key: &str) -> Option<&Skip> {
        self.skips.get(key)
    }

    pub(crate) fn owners(&self) -> &HashMap<QuestionId, usize> {
        &self.owners
    }

    /// Skip the field `key` when `predicate` holds; the question's own
    /// default is recorded instead. Replaces any earlier condition on `key`.
    ///
    /// # Errors
    ///
    /// [`FormError::UnknownField`] when no field is named `key`, and
    /// [`FormError::MalformedPredicate`] when an expression reads a question
    /// that is not part of this form.
    pub fn skip_if(self, key: &str, predicate: impl IntoPredicate) -> FormResult<Self> {
        self.attach(key, Skip::new(predicate))
    }

    /// Like [`Form::skip_if`], recording `default` when the field is skipped.
    pub fn skip_if_with_default(
        self,
        key: &str,
        predicate: impl IntoPredicate,
        default: impl Into<Value>,
    ) -> FormResult<Self> {
        self.attach(key, Skip::new(predicate).with_default(default))
    }

    fn attach(mut self, key: &str, skip: Skip) -> FormResult<Self> {
        if self.field(key).is_none() {
            return Err(FormError::UnknownField(key.to_string()));
        }
        if let Predicate::Expression(expr) = &skip.predicate {
            if let Some(foreign) = expr
                .questions()
                .into_iter()
                .find(|id| !self.owners.contains_key(id))
            {
                return Err(FormError::MalformedPredicate {
                    key: key.to_string(),
                    reason: format!("question {foreign} does not belong to this form"),
                });
            }
        }
        log::trace!("attached skip condition to '{key}'");
        self.skips.insert(key.to_string(), skip);
        Ok(self)
    }

    /// Edges from each field to the fields its skip condition reads.
    pub fn dependency_graph(&self) -> FormResult<DependencyGraph> {
        DependencyGraph::build(&self.fields, &self.owners, &self.skips)
    }

    /// Keys in the order the next invocation would visit them.
    pub fn execution_order(&self) -> FormResult<Vec<String>> {
        Ok(execution_order(&self.dependency_graph()?)?)
    }

    /// Ask every field, propagating cancellation and dependency errors.
    pub fn unsafe_ask(&self, patch_stdout: bool) -> FormResult<Answers> {
        Executor::new(self)?.run(patch_stdout)
    }

    pub async fn unsafe_ask_async(&self, patch_stdout: bool) -> FormResult<Answers> {
        Executor::new(self)?.run_async(patch_stdout).await
    }

    /// Ask every field. When the user cancels, the notice is printed to
    /// stdout and the answers given so far are discarded: the result is
    /// empty. Every other error is returned.
    pub fn ask(&self, options: &AskOptions) -> FormResult<Answers> {
        self.ask_with_output(options, &mut std::io::stdout())
    }

    pub fn ask_with_output<W: Write + ?Sized>(
        &self,
        options: &AskOptions,
        out: &mut W,
    ) -> FormResult<Answers> {
        match self.unsafe_ask(options.patch_stdout) {
            Err(err) if err.is_interrupted() => {
                write_cancel_notice(out, &options.cancel_message)?;
                Ok(Answers::new())
            }
            other => other,
        }
    }

    pub async fn ask_async(&self, options: &AskOptions) -> FormResult<Answers> {
        self.ask_async_with_output(options, &mut std::io::stdout())
            .await
    }

    pub async fn ask_async_with_output<W: Write + Send + ?Sized>(
        &self,
        options: &AskOptions,
        out: &mut W,
    ) -> FormResult<Answers> {
        match self.unsafe_ask_async(options.patch_stdout).await {
            Err(err) if err.is_interrupted() => {
                write_cancel_notice(out, &options.cancel_message)?;
                Ok(Answers::new())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Operand;
    use serde_json::json;

    fn answering(value: Value) -> Question {
        Question::from_fn(move |_| Ok(value.clone()))
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = form([("a", answering(json!(1))), ("a", answering(json!(2)))]).unwrap_err();
        assert!(matches!(err, FormError::DuplicateKey(ref key) if key == "a"));
    }

    #[test]
    fn test_duplicate_question_rejected() {
        let q = answering(json!(1));
        let err = form([("a", q.clone()), ("b", q)]).unwrap_err();
        match err {
            FormError::DuplicateQuestion { first, second, .. } => {
                assert_eq!((first.as_str(), second.as_str()), ("a", "b"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_skip_if_unknown_field() {
        let f = form([("a", answering(json!(1)))]).unwrap();
        let err = f.skip_if("nope", |_: &Answers| true).unwrap_err();
        assert!(matches!(err, FormError::UnknownField(ref key) if key == "nope"));
    }

    #[test]
    fn test_skip_if_foreign_question() {
        let stranger = answering(json!(1));
        let f = form([("a", answering(json!(1)))]).unwrap();
        let err = f.skip_if("a", stranger.eq(1)).unwrap_err();
        assert!(matches!(err, FormError::MalformedPredicate { .. }));
    }

    #[test]
    fn test_skip_if_overwrites() {
        let f = form([("a", answering(json!(1)))])
            .unwrap()
            .skip_if("a", |_: &Answers| true)
            .unwrap()
            .skip_if("a", |_: &Answers| false)
            .unwrap();
        assert_eq!(f.unsafe_ask(false).unwrap()["a"], json!(1));
    }

    #[test]
    fn test_skip_default_override_wins() {
        let f = form([("a", answering(json!(1)))])
            .unwrap()
            .skip_if_with_default("a", |_: &Answers| true, "fallback")
            .unwrap();
        assert_eq!(f.unsafe_ask(false).unwrap()["a"], json!("fallback"));
    }

    #[test]
    fn test_execution_order_follows_expressions() {
        let b = answering(json!(5));
        let f = form([("a", answering(json!(1))), ("b", b.clone())])
            .unwrap()
            .skip_if("a", b.gt(3))
            .unwrap();
        assert_eq!(f.execution_order().unwrap(), vec!["b", "a"]);

        let answers = f.unsafe_ask(false).unwrap();
        assert_eq!(answers.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(answers["a"], Value::Null);
        assert_eq!(answers["b"], json!(5));
    }

    #[test]
    fn test_evaluation_error_surfaces_from_ask() {
        let b = answering(json!("text"));
        let f = form([("b", b.clone()), ("a", answering(json!(1)))])
            .unwrap()
            .skip_if("a", (&b - 1).gt(0))
            .unwrap();
        let err = f.ask_with_output(&AskOptions::default(), &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, FormError::Evaluation(_)));
    }
}
