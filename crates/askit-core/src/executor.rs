//! Runs a form: schedule, then skip or prompt each field in turn.

use std::collections::HashMap;

use crate::answers::Answers;
use crate::error::FormResult;
use crate::expr::LeafResolver;
use crate::form::{Form, FormField};
use crate::question::{Question, QuestionId};
use crate::schedule::schedule;
use crate::value::Value;

/// Resolves expression leaves against the answers recorded so far.
pub(crate) struct AnswerLookup<'a> {
    fields: &'a [FormField],
    owners: &'a HashMap<QuestionId, usize>,
    answers: &'a Answers,
}

impl LeafResolver for AnswerLookup<'_> {
    fn resolve(&self, question: QuestionId) -> Option<&Value> {
        let index = *self.owners.get(&question)?;
        self.answers.get(self.fields.get(index)?.key())
    }
}

enum Step<'f> {
    Skip(Value),
    Ask(&'f Question),
}

/// State of one invocation. Answers live only as long as the executor.
pub(crate) struct Executor<'f> {
    form: &'f Form,
    order: Vec<usize>,
    answers: Answers,
}

impl<'f> Executor<'f> {
    /// Build the dependency graph and compute the order afresh.
    pub(crate) fn new(form: &'f Form) -> FormResult<Self> {
        let graph = form.dependency_graph()?;
        let order = schedule(&graph)?;
        log::debug!(
            "execution order: {:?}",
            order
                .iter()
                .filter_map(|&i| graph.key(i))
                .collect::<Vec<_>>()
        );
        Ok(Self {
            form,
            order,
            answers: Answers::new(),
        })
    }

    fn step(&self, index: usize) -> FormResult<Option<Step<'f>>> {
        let form = self.form;
        let Some(field) = form.fields().get(index) else {
            return Ok(None);
        };

        if let Some(skip) = form.skip_for(field.key()) {
            let lookup = AnswerLookup {
                fields: form.fields(),
                owners: form.owners(),
                answers: &self.answers,
            };
            let skipped = skip.predicate.evaluate(&self.answers, &lookup)?;
            log::trace!("skip condition for '{}' evaluated to {skipped}", field.key());
            if skipped {
                let value = skip
                    .default
                    .clone()
                    .unwrap_or_else(|| field.question().default_value());
                log::debug!("skipping '{}', recording {value}", field.key());
                return Ok(Some(Step::Skip(value)));
            }
        }

        Ok(Some(Step::Ask(field.question())))
    }

    fn record(&mut self, index: usize, value: Value) {
        if let Some(field) = self.form.fields().get(index) {
            self.answers.insert(field.key(), value);
        }
    }

    /// Answers re-keyed in declaration order.
    fn finish(mut self) -> Answers {
        self.form
            .fields()
            .iter()
            .filter_map(|field| {
                self.answers
                    .remove(field.key())
                    .map(|value| (field.key().to_string(), value))
            })
            .collect()
    }

    pub(crate) fn run(mut self, patch_stdout: bool) -> FormResult<Answers> {
        for index in std::mem::take(&mut self.order) {
            let value = match self.step(index)? {
                Some(Step::Skip(value)) => value,
                Some(Step::Ask(question)) => question.unsafe_ask(patch_stdout)?,
                None => continue,
            };
            self.record(index, value);
        }
        Ok(self.finish())
    }

    pub(crate) async fn run_async(mut self, patch_stdout: bool) -> FormResult<Answers> {
        for index in std::mem::take(&mut self.order) {
            let value = match self.step(index)? {
                Some(Step::Skip(value)) => value,
                Some(Step::Ask(question)) => question.unsafe_ask_async(patch_stdout).await?,
                None => continue,
            };
            self.record(index, value);
        }
        Ok(self.finish())
    }
}
