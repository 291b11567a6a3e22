use std::io;
use std::process;

use askit::{shared, FormDefinition, StdConsole};
use askit_cli::{log_filter, print_answers, print_plan, run_form, Cli, Commands, RunConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> askit_cli::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_filter(cli.verbose))),
        )
        .with_writer(io::stderr)
        .init();

    match &cli.command {
        Commands::Plan { file } => {
            let definition = FormDefinition::from_file(file)?;
            print_plan(&definition, &mut io::stdout())?;
        }
        run => {
            if let Some(config) = RunConfig::from_cli_args(run) {
                // prompts go to stderr so stdout carries only the answers
                let answers = run_form(&config, shared(StdConsole::stderr())).await?;
                print_answers(&answers, &mut io::stdout())?;
            }
        }
    }
    Ok(())
}
