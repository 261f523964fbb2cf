//! Informational output: sample prompts, tips, troubleshooting.

use clap::CommandFactory;
use fabulist::{sample_prompts, troubleshooting_info, usage_tips};

use super::Cli;

/// Print the numbered sample prompts.
pub fn show_samples() {
    println!("Sample Story Prompts:");
    println!("{}", "=".repeat(50));
    for (i, prompt) in sample_prompts().iter().enumerate() {
        println!("{:2}. {}", i + 1, prompt);
    }
}

/// Print usage tips.
pub fn show_tips() {
    println!("{}", usage_tips());
}

/// Print troubleshooting information.
pub fn show_troubleshooting() {
    println!("{}", troubleshooting_info());
}

/// Print help followed by a quick start.
pub fn show_help() -> std::io::Result<()> {
    Cli::command().print_help()?;
    println!();
    println!("Quick start:");
    println!("  fabulist --interactive    # Launch the interactive session");
    println!("  fabulist --samples        # Show sample prompts");
    println!("  fabulist --tips           # Show usage tips");
    Ok(())
}
