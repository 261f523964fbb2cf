//! Single-chapter and complete-story commands.

use fabulist::{
    FabulistConfig, FabulistResult, GenerationSettings, HuggingFaceImageDriver,
    HuggingFaceTextDriver, Illustrator, StoryApp, StoryGenerator,
};
use std::path::Path;
use tracing::{info, instrument};

use super::output::{print_story, print_summary, save_story};

/// Story app backed by the HuggingFace drivers.
pub type HuggingFaceApp = StoryApp<HuggingFaceTextDriver, HuggingFaceImageDriver>;

/// Build the HuggingFace-backed app from configuration.
///
/// # Errors
///
/// Returns error if an HTTP client cannot be built.
pub fn build_app(config: &FabulistConfig) -> FabulistResult<HuggingFaceApp> {
    let text = HuggingFaceTextDriver::from_config(config)?;
    let image = HuggingFaceImageDriver::from_config(config)?;
    Ok(StoryApp::new(
        StoryGenerator::new(text),
        Illustrator::from_config(image, &config.image),
    ))
}

/// Generate, print and save a single chapter.
#[instrument(skip_all)]
pub async fn generate_chapter(
    config: &FabulistConfig,
    prompt: &str,
    settings: &GenerationSettings,
    with_images: bool,
    output: &Path,
) -> FabulistResult<()> {
    println!("Generating single chapter from: '{}'", prompt);

    let mut app = build_app(config)?;
    app.load(with_images).await?;

    let story = app
        .generate_single_chapter(prompt, settings, with_images)
        .await?;

    print_story(&story);
    if with_images {
        match story.images.len() {
            0 => println!("No visual scenes detected for image generation"),
            n => println!("Generated {} images", n),
        }
    }

    save_story(&story, output).await?;
    Ok(())
}

/// Generate, print and save a complete multi-chapter story.
#[instrument(skip_all, fields(chapters = num_chapters))]
pub async fn generate_complete(
    config: &FabulistConfig,
    prompt: &str,
    num_chapters: u32,
    settings: &GenerationSettings,
    with_images: bool,
    output: &Path,
) -> FabulistResult<()> {
    println!("Generating {}-chapter story from: '{}'", num_chapters, prompt);

    let mut app = build_app(config)?;
    app.load(with_images).await?;

    let story = app
        .generate_complete_story(prompt, num_chapters, settings, with_images)
        .await?;

    print_story(&story);
    print_summary(&story);
    info!(
        chapters = story.chapters.len(),
        images = story.images.len(),
        "Complete story generated"
    );

    save_story(&story, output).await?;
    Ok(())
}
