//! CLI flag definitions.

use clap::Parser;
use fabulist::{ArtStyle, GenerationSettings, StoryError};
use std::path::PathBuf;

/// Fabulist - illustrated short stories from a text model and a diffusion model
#[derive(Parser, Debug)]
#[command(name = "fabulist")]
#[command(about = "Generate illustrated short stories with HuggingFace models", long_about = None)]
#[command(version)]
#[command(after_help = "Examples:
  fabulist --interactive                     Launch the interactive session
  fabulist --generate \"Once upon a time\"     Generate a single chapter
  fabulist --complete \"Magic kingdom\" -n 3   Generate a complete story
  fabulist --samples                         Show sample prompts")]
pub struct Cli {
    /// Launch the interactive story session
    #[arg(short, long)]
    pub interactive: bool,

    /// Generate a single chapter from a prompt
    #[arg(short, long, value_name = "PROMPT")]
    pub generate: Option<String>,

    /// Generate a complete multi-chapter story from a prompt
    #[arg(short, long, value_name = "PROMPT")]
    pub complete: Option<String>,

    /// Number of chapters for a complete story
    #[arg(short = 'n', long, default_value_t = 3)]
    pub chapters: u32,

    /// Chapter length in tokens (50-300)
    #[arg(short, long, value_name = "TOKENS", default_value_t = 150)]
    pub length: u32,

    /// Creativity / sampling temperature (0.1-1.5)
    #[arg(short = 't', long, default_value_t = 0.8)]
    pub creativity: f32,

    /// Art style for image generation: a preset name or a free-form style
    #[arg(short, long, default_value = "fantasy art, detailed, high quality")]
    pub style: String,

    /// Skip image generation (text only)
    #[arg(long)]
    pub no_images: bool,

    /// Show sample story prompts
    #[arg(long)]
    pub samples: bool,

    /// Show usage tips
    #[arg(long)]
    pub tips: bool,

    /// Show troubleshooting information
    #[arg(long)]
    pub troubleshooting: bool,

    /// Directory story artifacts are written under
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Configuration file used instead of the user configuration files
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

/// What the invocation asks for, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print sample prompts
    Samples,
    /// Print usage tips
    Tips,
    /// Print troubleshooting information
    Troubleshooting,
    /// Run the interactive session
    Interactive,
    /// Generate one chapter
    Generate(String),
    /// Generate a complete story
    Complete(String),
    /// Print help and a quick start
    Help,
}

impl Cli {
    /// Resolve the flags to a single action.
    pub fn action(&self) -> Action {
        if self.samples {
            Action::Samples
        } else if self.tips {
            Action::Tips
        } else if self.troubleshooting {
            Action::Troubleshooting
        } else if self.interactive {
            Action::Interactive
        } else if let Some(prompt) = &self.generate {
            Action::Generate(prompt.clone())
        } else if let Some(prompt) = &self.complete {
            Action::Complete(prompt.clone())
        } else {
            Action::Help
        }
    }

    /// Generation settings from the length, creativity and style flags.
    ///
    /// # Errors
    ///
    /// Returns `StoryErrorKind::InvalidSetting` for out-of-range values.
    pub fn settings(&self) -> Result<GenerationSettings, StoryError> {
        let Ok(style) = self.style.parse::<ArtStyle>();
        let settings = GenerationSettings::default()
            .with_chapter_length(self.length)
            .with_creativity(self.creativity)
            .with_art_style(style);
        settings.validate()?;
        Ok(settings)
    }

    /// Whether illustrations were requested.
    pub fn with_images(&self) -> bool {
        !self.no_images
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cli = Cli::parse_from(["fabulist"]);
        assert_eq!(cli.chapters, 3);
        assert_eq!(cli.length, 150);
        assert_eq!(cli.creativity, 0.8);
        assert_eq!(cli.action(), Action::Help);
        assert!(cli.with_images());

        let settings = cli.settings().unwrap();
        assert_eq!(settings.art_style(), &ArtStyle::Fantasy);
    }

    #[test]
    fn short_flags() {
        let cli = Cli::parse_from([
            "fabulist", "-c", "Magic kingdom", "-n", "5", "-l", "200", "-t", "1.2", "-s", "anime",
            "--no-images",
        ]);
        assert_eq!(cli.action(), Action::Complete("Magic kingdom".to_string()));
        assert_eq!(cli.chapters, 5);
        assert!(!cli.with_images());

        let settings = cli.settings().unwrap();
        assert_eq!(*settings.chapter_length(), 200);
        assert_eq!(settings.art_style(), &ArtStyle::Anime);
    }

    #[test]
    fn info_flags_take_precedence() {
        let cli = Cli::parse_from(["fabulist", "--samples", "-i", "-g", "x"]);
        assert_eq!(cli.action(), Action::Samples);

        let cli = Cli::parse_from(["fabulist", "-i", "-g", "x"]);
        assert_eq!(cli.action(), Action::Interactive);

        let cli = Cli::parse_from(["fabulist", "-g", "x", "-c", "y"]);
        assert_eq!(cli.action(), Action::Generate("x".to_string()));
    }

    #[test]
    fn custom_style_is_kept() {
        let cli = Cli::parse_from(["fabulist", "-s", "steampunk art, detailed, Victorian era"]);
        assert_eq!(
            cli.settings().unwrap().art_style().prompt(),
            "steampunk art, detailed, Victorian era"
        );
    }

    #[test]
    fn out_of_range_creativity_is_rejected() {
        let cli = Cli::parse_from(["fabulist", "-t", "2.5"]);
        assert!(cli.settings().is_err());
    }
}
