//! Generate one chapter, extract its scenes and save everything to disk.
//!
//! ```bash
//! cargo run --example simple_story
//! ```

use fabulist::{
    ArtStyle, FabulistConfig, FileSystemStorage, GenerationSettings, HuggingFaceImageDriver,
    HuggingFaceTextDriver, Illustrator, StoryApp, StoryGenerator, StoryStorage,
};

const PROMPT: &str = "In a mystical forest where ancient trees whispered secrets";

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

    let settings = GenerationSettings::default()
        .with_chapter_length(200)
        .with_art_style(ArtStyle::Fantasy);
    let story = app.generate_single_chapter(PROMPT, &settings, true).await?;

    for chapter in &story.chapters {
        println!("{}", chapter.render());
        println!("Found {} visual scenes:", chapter.scene_descriptions.len());
        for (i, scene) in chapter.scene_descriptions.iter().enumerate() {
            println!("  {}. {}", i + 1, scene);
        }
    }

    let storage = FileSystemStorage::new(&config.output.directory)?;
    let stored = storage.store_story(&story).await?;
    println!(
        "Saved {} images and the story text to {}",
        story.images.len(),
        stored.directory.display()
    );
    Ok(())
}
