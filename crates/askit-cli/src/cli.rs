use std::path::PathBuf;

use askit::{AskOptions, DEFAULT_KBI_MESSAGE};
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "askit")]
#[command(about = "Ask the questions of a form definition and print the answers as JSON")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a form on the terminal
    Run {
        /// Form definition file (YAML or JSON)
        file: PathBuf,

        /// Drive the form through the async executor
        #[arg(long = "async")]
        use_async: bool,

        /// Fail on Ctrl+C instead of printing empty answers
        #[arg(long = "unsafe")]
        no_catch: bool,

        /// Flush pending stdout output before each prompt
        #[arg(long)]
        patch_stdout: bool,

        /// Message printed when the user cancels
        #[arg(long, default_value = DEFAULT_KBI_MESSAGE)]
        cancel_message: String,
    },

    /// Print the order the questions would be asked in
    Plan {
        /// Form definition file (YAML or JSON)
        file: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub definition_file: PathBuf,
    pub use_async: bool,
    pub catch_interrupt: bool,
    pub options: AskOptions,
}

impl RunConfig {
    /// Extract the run settings; `None` for other subcommands.
    pub fn from_cli_args(args: &Commands) -> Option<Self> {
        match args {
            Commands::Run {
                file,
                use_async,
                no_catch,
                patch_stdout,
                cancel_message,
            } => Some(Self {
                definition_file: file.clone(),
                use_async: *use_async,
                catch_interrupt: !*no_catch,
                options: AskOptions::new()
                    .with_patch_stdout(*patch_stdout)
                    .with_cancel_message(cancel_message.as_str()),
            }),
            Commands::Plan { .. } => None,
        }
    }
}

/// Default log filter for the given number of `-v` flags.
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}
