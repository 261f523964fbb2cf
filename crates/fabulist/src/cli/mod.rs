//! Command-line interface.

mod commands;
mod generate;
mod info;
mod interactive;
mod output;

pub use commands::{Action, Cli};
pub use generate::{generate_chapter, generate_complete};
pub use info::{show_help, show_samples, show_tips, show_troubleshooting};
pub use interactive::run_interactive;
