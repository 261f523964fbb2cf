//! Render one scene in every art style preset, then try a few custom
//! style and negative-prompt combinations.
//!
//! ```bash
//! cargo run --example custom_style
//! ```

use fabulist::{
    ArtStyle, FabulistConfig, FileSystemStorage, HuggingFaceImageDriver, Illustrator,
    StoryStorage,
};

const SCENE: &str = "A majestic dragon soaring over a medieval castle at sunset";

const ADVANCED: [(&str, &str, &str); 3] = [
    (
        "A cyberpunk street market at night",
        "cyberpunk art, neon lights, futuristic, detailed",
        "blurry, low quality, daylight",
    ),
    (
        "A peaceful zen garden with cherry blossoms",
        "japanese art, minimalist, serene, soft colors",
        "cluttered, chaotic, dark",
    ),
    (
        "An underwater palace with glowing coral",
        "fantasy art, ethereal, blue tones, magical",
        "dry, desert, harsh lighting",
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_target(false).init();

    let config = FabulistConfig::load()?;
    let mut illustrator =
        Illustrator::from_config(HuggingFaceImageDriver::from_config(&config)?, &config.image);
    match illustrator.load_model().await {
        Some(model) => println!("Using image model {}", model),
        None => println!("No image model available, rendering placeholders"),
    }

    let storage = FileSystemStorage::new(&config.output.directory)?;

    println!("Scene: {}", SCENE);
    for (idx, style) in ArtStyle::presets().iter().enumerate() {
        println!("  {} ({})", style.name(), style.prompt());
        let image = illustrator
            .generate_image(1, idx as u32 + 1, SCENE, style.prompt())
            .await?;
        storage.store_image(&image).await?;
    }

    for (idx, (scene, style, negative)) in ADVANCED.iter().enumerate() {
        println!("  {} [{}] avoiding: {}", scene, style, negative);
        illustrator.set_negative_prompt(*negative);
        let image = illustrator
            .generate_image(2, idx as u32 + 1, scene, style)
            .await?;
        storage.store_image(&image).await?;
    }

    println!("Images written to {}", storage.directory().display());
    Ok(())
}
