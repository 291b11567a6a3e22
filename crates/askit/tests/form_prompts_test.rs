//! Forms built from the line prompts, driven through a mock console

mod common;

use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

use askit::prelude::*;
use askit::{Console, ConsoleResult, InputEvent, MockConsole, Value};
use common::{scripted, times_asked};
use serde_json::json;

fn pizza_form(console: &SharedConsole) -> Form {
    let q1: Question = confirm("Do you want pizza?")
        .with_console(console.clone())
        .into();
    let q2: Question = select("Which one?", ["foo", "bar"])
        .with_default("foo")
        .with_console(console.clone())
        .into();

    form([("q1", q1), ("q2", q2)])
        .unwrap()
        .skip_if("q2", |answers: &Answers| !answers["q1"].is_truthy())
        .unwrap()
}

#[test]
fn test_declining_skips_the_select() {
    let (mock, console) = scripted(&["no"]);
    let answers = pizza_form(&console).unsafe_ask(false).unwrap();

    assert_eq!(Value::from(answers), json!({"q1": false, "q2": "foo"}));
    assert_eq!(times_asked(&mock, "Which one?"), 0);
}

#[test]
fn test_accepting_asks_the_select() {
    let (mock, console) = scripted(&["yes", "bar"]);
    let answers = pizza_form(&console).unsafe_ask(false).unwrap();

    assert_eq!(Value::from(answers), json!({"q1": true, "q2": "bar"}));
    assert_eq!(times_asked(&mock, "Do you want pizza?"), 1);
    assert_eq!(times_asked(&mock, "Which one?"), 1);
}

#[test]
fn test_interrupt_mid_form_discards_answers() {
    let mock = MockConsole::new();
    mock.queue_line("y");
    mock.queue_interrupt();
    let console = shared(mock.clone());

    let mut out = Vec::<u8>::new();
    let answers = pizza_form(&console)
        .ask_with_output(&AskOptions::default(), &mut out)
        .unwrap();

    assert!(answers.is_empty());
    assert_eq!(String::from_utf8(out).unwrap(), "\nCancelled by user\n\n");
}

#[test]
fn test_end_of_input_counts_as_cancel() {
    let (_mock, console) = scripted(&[]);
    let err = pizza_form(&console).unsafe_ask(false).unwrap_err();
    assert!(err.is_interrupted());
}

#[test]
fn test_expression_reads_a_later_question() {
    // "extra" is declared first but depends on "count"
    let (mock, console) = scripted(&["7"]);
    let count: Question = text("How many?").with_console(console.clone()).into();
    let extra: Question = confirm("Anything else?")
        .with_default(false)
        .with_console(console.clone())
        .into();

    let f = form([("extra", extra), ("count", count.clone())])
        .unwrap()
        .skip_if("extra", count.ne("0"))
        .unwrap();
    assert_eq!(f.execution_order().unwrap(), vec!["count", "extra"]);

    let answers = f.unsafe_ask(false).unwrap();
    assert_eq!(answers.keys().collect::<Vec<_>>(), vec!["extra", "count"]);
    assert_eq!(answers["extra"], json!(false));
    assert_eq!(answers["count"], json!("7"));
    assert_eq!(times_asked(&mock, "Anything else?"), 0);
}

#[test]
fn test_single_question_ask_swallows_interrupt() {
    let (mock, console) = scripted(&[]);
    let q: Question = checkbox("Toppings", ["ham"]).with_console(console).into();

    let mut out = Vec::<u8>::new();
    let answer = q
        .ask_with_output(&AskOptions::new().with_cancel_message("bye"), &mut out)
        .unwrap();
    assert_eq!(answer, Value::Null);
    assert_eq!(String::from_utf8(out).unwrap(), "\nbye\n\n");
    assert!(mock.output().starts_with("○ 1) ham\n"));
}

#[tokio::test]
async fn test_async_form_with_prompts() {
    let (_mock, console) = scripted(&["", "2"]);
    let answers = pizza_form(&console)
        .unsafe_ask_async(false)
        .await
        .unwrap();
    assert_eq!(Value::from(answers), json!({"q1": true, "q2": "bar"}));
}

/// Blocks on `read_event` until a line is sent from the test.
struct GatedConsole {
    lines: Receiver<String>,
}

impl Console for GatedConsole {
    fn read_event(&mut self) -> ConsoleResult<InputEvent> {
        Ok(match self.lines.recv() {
            Ok(line) => InputEvent::Line(line),
            Err(_) => InputEvent::EndOfInput,
        })
    }

    fn write_text(&mut self, _text: &str) -> ConsoleResult<()> {
        Ok(())
    }

    fn flush(&mut self) -> ConsoleResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_async_prompt_leaves_runtime_free_while_waiting() {
    let (tx, rx) = channel();
    let console = shared(GatedConsole { lines: rx });
    let name: Question = text("Name?").with_console(console).into();
    let f = form([("name", name)]).unwrap();

    // single-threaded runtime: the form must not hold it while input is pending
    let asking = tokio::spawn(async move { f.unsafe_ask_async(false).await });
    for _ in 0..3 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(!asking.is_finished());

    tx.send("Ada".to_string()).unwrap();
    let answers = asking.await.unwrap().unwrap();
    assert_eq!(answers["name"], json!("Ada"));
}
