use std::io::{self, Write};

use askit::{shared, Answers, FormDefinition, MockConsole, SharedConsole};

use crate::cli::RunConfig;
use crate::error::Result;

/// Ask the form on `console` according to `config`.
///
/// In the catching mode a cancellation prints the notice to stderr and
/// yields empty answers.
pub async fn run_form(config: &RunConfig, console: SharedConsole) -> Result<Answers> {
    let definition = FormDefinition::from_file(&config.definition_file)?;
    let form = definition.build(console)?;
    tracing::debug!(
        file = %config.definition_file.display(),
        questions = form.len(),
        "loaded form definition"
    );

    let patch_stdout = config.options.patch_stdout;
    let answers = match (config.use_async, config.catch_interrupt) {
        (false, true) => form.ask_with_output(&config.options, &mut io::stderr())?,
        (false, false) => form.unsafe_ask(patch_stdout)?,
        (true, true) => {
            form.ask_async_with_output(&config.options, &mut io::stderr())
                .await?
        }
        (true, false) => form.unsafe_ask_async(patch_stdout).await?,
    };
    Ok(answers)
}

/// Print answers as pretty JSON followed by a newline.
pub fn print_answers<W: Write>(answers: &Answers, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, answers)?;
    writeln!(out)?;
    Ok(())
}

/// Print the execution order, then the dependency edges.
pub fn print_plan<W: Write>(definition: &FormDefinition, out: &mut W) -> Result<()> {
    // building never reads input
    let form = definition.build(shared(MockConsole::new()))?;
    let order = form.execution_order()?;
    let graph = form.dependency_graph()?;

    for key in &order {
        writeln!(out, "{key}")?;
    }
    if graph.edge_count() > 0 {
        writeln!(out)?;
        for (dependent, dependency) in graph.edges() {
            writeln!(out, "{dependent} -> {dependency}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use askit::{AskOptions, FormError};
    use std::path::PathBuf;

    const COFFEE: &str = r#"
questions:
  - name: sugar
    type: confirm
    message: Sugar?
    skip_if: { field: drink, op: ne, value: coffee }
  - name: drink
    type: select
    message: Drink?
    choices: [tea, coffee]
"#;

    fn plan_of(yaml: &str) -> Result<String> {
        let definition: FormDefinition = yaml.parse()?;
        let mut out = Vec::new();
        print_plan(&definition, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn test_plan_lists_order_and_edges() {
        assert_eq!(plan_of(COFFEE).unwrap(), "drink\nsugar\n\nsugar -> drink\n");
    }

    #[test]
    fn test_plan_without_conditions_has_no_edges() {
        let yaml = "questions: [{ name: a, type: text, message: A? }]";
        assert_eq!(plan_of(yaml).unwrap(), "a\n");
    }

    #[test]
    fn test_plan_reports_cycles() {
        let yaml = r#"
questions:
  - { name: a, type: confirm, message: A?, skip_if: { field: a, value: true } }
"#;
        let err = plan_of(yaml).unwrap_err();
        assert!(matches!(err, CliError::FormError(FormError::Dependency(_))));
        assert!(err.to_string().contains("unresolved fields: a"));
    }

    #[test]
    fn test_print_answers() {
        let answers: Answers = [("drink", serde_json::json!("tea"))].into_iter().collect();
        let mut out = Vec::new();
        print_answers(&answers, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"drink\": \"tea\"\n}\n");
    }

    #[tokio::test]
    async fn test_run_form_with_mock_console() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("coffee.yaml");
        std::fs::write(&file, COFFEE).unwrap();

        let mock = MockConsole::new();
        mock.queue_lines(["2", "n"]);
        let config = RunConfig {
            definition_file: file,
            use_async: true,
            catch_interrupt: false,
            options: AskOptions::default(),
        };
        let answers = run_form(&config, shared(mock.clone())).await.unwrap();
        assert_eq!(answers["drink"], "coffee");
        assert_eq!(answers["sugar"], false);
    }

    #[tokio::test]
    async fn test_run_form_missing_file() {
        let config = RunConfig {
            definition_file: PathBuf::from("/no/such/form.yaml"),
            use_async: false,
            catch_interrupt: true,
            options: AskOptions::default(),
        };
        let err = run_form(&config, shared(MockConsole::new())).await.unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: Form definition file not found"));
    }
}
