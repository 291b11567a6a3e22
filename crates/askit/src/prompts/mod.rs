//! Line-based prompts.
//!
//! Each constructor returns a builder; convert it into a [`Question`] to use
//! it in a form or to ask it on its own. Prompts write to stdout unless given
//! another console with `with_console`.
//!
//! [`Question`]: askit_core::Question

mod checkbox;
pub mod common;
mod confirm;
mod select;
mod text;

pub use checkbox::{checkbox, CheckboxPrompt};
pub use confirm::{confirm, ConfirmPrompt};
pub use select::{select, SelectPrompt};
pub use text::{text, TextPrompt};
