//! Command-line front end for askit form definitions.

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::{log_filter, Cli, Commands, RunConfig};
pub use commands::{print_answers, print_plan, run_form};
pub use error::{CliError, Result};
