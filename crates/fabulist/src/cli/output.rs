//! Printing and saving generated stories.

use fabulist::{
    Chapter, FabulistResult, FileSystemStorage, Story, StoryImage, StoryStorage, StoredStory,
};
use std::path::Path;

/// Print a chapter with its heading.
pub fn print_chapter(chapter: &Chapter) {
    println!();
    println!("Chapter {}", chapter.number);
    println!("{}", "-".repeat(50));
    println!("{}", chapter.text);
}

/// Print one caption line per image.
pub fn print_images<'a>(images: impl IntoIterator<Item = &'a StoryImage>) {
    for image in images {
        let marker = if image.placeholder { " (placeholder)" } else { "" };
        println!("  [{}]{} {}", image.file_name(), marker, image.caption());
    }
}

/// Print every chapter followed by its images.
pub fn print_story(story: &Story) {
    for chapter in &story.chapters {
        print_chapter(chapter);
        print_images(story.images_for(chapter.number));
    }
}

/// Print the closing summary.
pub fn print_summary(story: &Story) {
    println!();
    println!("{}", "=".repeat(60));
    println!("Chapters generated: {}", story.chapters.len());
    println!("Images generated: {}", story.images.len());
    println!("Total words: ~{}", story.word_count());
}

/// Write all artifacts into a fresh run directory under `output`.
pub async fn save_story(story: &Story, output: &Path) -> FabulistResult<StoredStory> {
    let storage = FileSystemStorage::new(output)?;
    let stored = storage.store_story(story).await?;
    println!(
        "Saved {} files to {}",
        stored.artifacts.len(),
        stored.directory.display()
    );
    Ok(stored)
}
