//! Generate a three-chapter illustrated story and save it.
//!
//! ```bash
//! cargo run --example complete_story
//! ```

use fabulist::{
    FabulistConfig, FileSystemStorage, GenerationSettings, HuggingFaceImageDriver,
    HuggingFaceTextDriver, Illustrator, StoryApp, StoryGenerator, StoryStorage,
};

const PROMPT: &str = "In a steampunk city where gears and magic coexisted";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_target(false).init();

    let config = FabulistConfig::load()?;
    let mut app = StoryApp::new(
        StoryGenerator::new(HuggingFaceTextDriver::from_config(&config)?),
        Illustrator::from_config(HuggingFaceImageDriver::from_config(&config)?, &config.image),
    );
    app.load(true).await?;

    let settings = GenerationSettings::default().with_chapter_length(180);
    let story = app
        .generate_complete_story(PROMPT, 3, &settings, true)
        .await?;

    for chapter in &story.chapters {
        println!("{}", chapter.render());
        for image in story.images_for(chapter.number) {
            println!("  [{}] {}", image.file_name(), image.caption());
        }
    }
    println!(
        "{} chapters, {} images, ~{} words",
        story.chapters.len(),
        story.images.len(),
        story.word_count()
    );

    let stored = FileSystemStorage::new(&config.output.directory)?
        .store_story(&story)
        .await?;
    println!("Saved to {}", stored.directory.display());
    Ok(())
}
