//! Line-oriented interactive story session.

use fabulist::{
    ArtStyle, FabulistConfig, FabulistResult, GenerationSettings, HuggingFaceImageDriver,
    HuggingFaceTextDriver, StoryError, StoryErrorKind, StorySession,
};
use std::path::Path;
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, instrument};

use super::generate::build_app;
use super::output::{print_chapter, print_images, save_story};

type HuggingFaceSession = StorySession<HuggingFaceTextDriver, HuggingFaceImageDriver>;

/// A command typed at the session prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Generate a chapter from the current prompt
    Generate,
    /// Generate the next chapter of the current story
    Continue,
    /// Start over with the default prompt
    Reset,
    /// Replace the current prompt
    Prompt(String),
    /// Set the chapter length in tokens
    Length(u32),
    /// Set the sampling temperature
    Creativity(f32),
    /// Set the art style
    Style(ArtStyle),
    /// List the art style presets
    Styles,
    /// Show prompt, settings and progress
    Status,
    /// Write the story to disk
    Save,
    /// List commands
    Help,
    /// Leave the session
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let require = |what: &str| {
            if rest.is_empty() {
                Err(format!("'{}' needs {}", word, what))
            } else {
                Ok(rest)
            }
        };

        match word.to_lowercase().as_str() {
            "generate" | "g" => Ok(Self::Generate),
            "continue" | "c" => Ok(Self::Continue),
            "reset" | "new" => Ok(Self::Reset),
            "prompt" | "p" => Ok(Self::Prompt(require("some text")?.to_string())),
            "length" | "l" => require("a number of tokens")?
                .parse()
                .map(Self::Length)
                .map_err(|e| format!("Invalid length: {}", e)),
            "creativity" | "t" => require("a temperature")?
                .parse()
                .map(Self::Creativity)
                .map_err(|e| format!("Invalid creativity: {}", e)),
            "style" | "s" => {
                let Ok(style) = require("a preset name or style text")?.parse::<ArtStyle>();
                Ok(Self::Style(style))
            }
            "styles" => Ok(Self::Styles),
            "status" => Ok(Self::Status),
            "save" => Ok(Self::Save),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            "" => Err("Type 'help' for a list of commands".to_string()),
            other => Err(format!(
                "Unknown command '{}'. Type 'help' for a list of commands",
                other
            )),
        }
    }
}

const COMMANDS: &str = "Commands:
  generate | g            Generate a chapter from the current prompt
  continue | c            Continue the story from the last chapter
  prompt <text>           Replace the current prompt
  length <tokens>         Chapter length (50-300)
  creativity <temp>       Creativity / temperature (0.1-1.5)
  style <preset|text>     Art style for illustrations
  styles                  List art style presets
  status                  Show prompt, settings and progress
  save                    Write the story to disk
  reset | new             Start a new story
  help                    Show this list
  quit | exit             Leave the session";

/// Run the interactive session until `quit` or end of input.
///
/// Command failures are printed and the session continues.
///
/// # Errors
///
/// Returns error if the drivers cannot be built, the text model fails to
/// load, or stdin cannot be read.
#[instrument(skip_all)]
pub async fn run_interactive(
    config: &FabulistConfig,
    settings: GenerationSettings,
    with_images: bool,
    output: &Path,
) -> FabulistResult<()> {
    let mut app = build_app(config)?;
    println!("Loading models...");
    app.load(with_images).await?;

    let mut session = app
        .into_session()
        .with_settings(settings)?
        .with_images(with_images);

    println!("Fabulist interactive story session");
    print_status(&session);
    println!();
    println!("{}", COMMANDS);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt_marker();
        let Some(line) = lines.next_line().await.map_err(input_error)? else {
            break;
        };

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };
        debug!(?command, "Session command");

        if command == SessionCommand::Quit {
            break;
        }
        if let Err(e) = execute(&mut session, command, output).await {
            println!("Error: {}", e);
        }
    }

    println!("Goodbye!");
    Ok(())
}

async fn execute(
    session: &mut HuggingFaceSession,
    command: SessionCommand,
    output: &Path,
) -> FabulistResult<()> {
    match command {
        SessionCommand::Generate => {
            println!("Generating chapter...");
            let number = session.generate().await?.number;
            show_chapter(session, number);
        }
        SessionCommand::Continue => {
            println!("Continuing story...");
            let number = session.continue_story().await?.number;
            show_chapter(session, number);
        }
        SessionCommand::Reset => {
            session.reset();
            println!("Started a new story. Prompt: {}", session.prompt());
        }
        SessionCommand::Prompt(text) => {
            session.set_prompt(text);
            println!("Prompt set");
        }
        SessionCommand::Length(tokens) => {
            session.set_chapter_length(tokens)?;
            println!("Chapter length set to {} tokens", tokens);
        }
        SessionCommand::Creativity(temperature) => {
            session.set_creativity(temperature)?;
            println!("Creativity set to {}", temperature);
        }
        SessionCommand::Style(style) => {
            session.set_art_style(style)?;
            println!("Art style set to {}", session.settings().art_style());
        }
        SessionCommand::Styles => {
            for style in ArtStyle::presets() {
                println!("  {:<14} {}", style.name(), style.prompt());
            }
        }
        SessionCommand::Status => print_status(session),
        SessionCommand::Save => {
            let story = session.to_story()?;
            save_story(&story, output).await?;
        }
        SessionCommand::Help => println!("{}", COMMANDS),
        SessionCommand::Quit => {}
    }
    Ok(())
}

fn input_error(e: std::io::Error) -> StoryError {
    StoryError::new(StoryErrorKind::SessionInput(e.to_string()))
}

fn show_chapter(session: &HuggingFaceSession, number: u32) {
    if let Some(chapter) = session.chapters().iter().find(|c| c.number == number) {
        print_chapter(chapter);
    }
    print_images(session.images().iter().filter(|i| i.chapter == number));
    println!();
    println!("Story so far: {} chapters", session.chapter_count());
}

fn print_status(session: &HuggingFaceSession) {
    let settings = session.settings();
    println!("Prompt: {}", session.prompt());
    println!(
        "Length: {} tokens | Creativity: {} | Style: {}",
        settings.chapter_length(),
        settings.creativity(),
        settings.art_style()
    );
    match (session.images_enabled(), session.active_image_model()) {
        (false, _) => println!("Images: disabled"),
        (true, Some(model)) => println!("Images: {}", model),
        (true, None) => println!("Images: placeholders (no image model loaded)"),
    }
    println!(
        "Chapters: {} | Images: {}",
        session.chapter_count(),
        session.images().len()
    );
}

fn print_prompt_marker() {
    use std::io::Write;
    print!("fabulist> ");
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_forms() {
        assert_eq!("g".parse::<SessionCommand>(), Ok(SessionCommand::Generate));
        assert_eq!("generate".parse::<SessionCommand>(), Ok(SessionCommand::Generate));
        assert_eq!("  Continue ".parse::<SessionCommand>(), Ok(SessionCommand::Continue));
        assert_eq!("new".parse::<SessionCommand>(), Ok(SessionCommand::Reset));
        assert_eq!("exit".parse::<SessionCommand>(), Ok(SessionCommand::Quit));
        assert_eq!("q".parse::<SessionCommand>(), Ok(SessionCommand::Quit));
    }

    #[test]
    fn prompt_keeps_the_whole_text() {
        assert_eq!(
            "prompt In a world where books come to life".parse::<SessionCommand>(),
            Ok(SessionCommand::Prompt(
                "In a world where books come to life".to_string()
            ))
        );
    }

    #[test]
    fn numeric_arguments() {
        assert_eq!("length 200".parse::<SessionCommand>(), Ok(SessionCommand::Length(200)));
        assert_eq!(
            "creativity 1.2".parse::<SessionCommand>(),
            Ok(SessionCommand::Creativity(1.2))
        );
        assert!("length lots".parse::<SessionCommand>().is_err());
        assert!("length".parse::<SessionCommand>().is_err());
    }

    #[test]
    fn style_accepts_presets_and_free_text() {
        assert_eq!(
            "style anime".parse::<SessionCommand>(),
            Ok(SessionCommand::Style(ArtStyle::Anime))
        );
        let Ok(SessionCommand::Style(style)) = "style steampunk, brass".parse::<SessionCommand>()
        else {
            panic!("expected a style command");
        };
        assert_eq!(style.prompt(), "steampunk, brass");
    }

    #[test]
    fn unreadable_input_is_a_session_error() {
        let err = input_error(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "stream did not contain valid UTF-8",
        ));
        assert!(matches!(err.kind, StoryErrorKind::SessionInput(ref msg) if msg.contains("UTF-8")));
        assert!(err.to_string().contains("Failed to read session input"));
    }

    #[test]
    fn unknown_and_blank_lines_are_errors() {
        assert!("dance".parse::<SessionCommand>().is_err());
        assert!("   ".parse::<SessionCommand>().is_err());
    }
}
