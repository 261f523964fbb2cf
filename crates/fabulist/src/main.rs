//! Fabulist CLI binary.
//!
//! Generates illustrated stories from the command line:
//! - Single chapters and complete multi-chapter stories
//! - An interactive session for building a story chapter by chapter
//! - Sample prompts, tips and troubleshooting help

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

use cli::{Action, Cli};
use fabulist::observability::{LoggingConfig, init_logging};
use fabulist::{FabulistConfig, FabulistResult};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before anything reads the token
    dotenvy::dotenv().ok();

    let args = Cli::parse();

    let logging = LoggingConfig::new()
        .with_verbose(args.verbose)
        .with_json_logs(args.json_logs);
    if let Err(e) = init_logging(&logging) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Cli) -> FabulistResult<()> {
    match args.action() {
        Action::Samples => cli::show_samples(),
        Action::Tips => cli::show_tips(),
        Action::Troubleshooting => cli::show_troubleshooting(),
        Action::Help => {
            if let Err(e) = cli::show_help() {
                tracing::warn!(error = %e, "Failed to print help");
            }
        }
        Action::Interactive => {
            let config = FabulistConfig::load_with(args.config.as_deref())?;
            let output = output_dir(args, &config);
            cli::run_interactive(&config, args.settings()?, args.with_images(), &output).await?;
        }
        Action::Generate(prompt) => {
            let config = FabulistConfig::load_with(args.config.as_deref())?;
            let output = output_dir(args, &config);
            cli::generate_chapter(&config, &prompt, &args.settings()?, args.with_images(), &output)
                .await?;
        }
        Action::Complete(prompt) => {
            let config = FabulistConfig::load_with(args.config.as_deref())?;
            let output = output_dir(args, &config);
            cli::generate_complete(
                &config,
                &prompt,
                args.chapters,
                &args.settings()?,
                args.with_images(),
                &output,
            )
            .await?;
        }
    }
    Ok(())
}

fn output_dir(args: &Cli, config: &FabulistConfig) -> PathBuf {
    args.output
        .clone()
        .unwrap_or_else(|| config.output.directory.clone())
}
