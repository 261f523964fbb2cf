//! Story records.

use crate::{Chapter, StoryImage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parameters a story was generated with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryMetadata {
    /// Prompt of the first chapter
    pub initial_prompt: String,
    /// Number of chapters requested
    pub num_chapters: u32,
    /// Token budget per chapter
    pub chapter_length: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// When generation started
    pub created_at: DateTime<Utc>,
}

impl StoryMetadata {
    /// Metadata stamped with the current time.
    pub fn new(
        initial_prompt: impl Into<String>,
        num_chapters: u32,
        chapter_length: u32,
        temperature: f32,
    ) -> Self {
        Self {
            initial_prompt: initial_prompt.into(),
            num_chapters,
            chapter_length,
            temperature,
            created_at: Utc::now(),
        }
    }
}

/// A multi-chapter story and its illustrations.
///
/// Chapters and images are kept in generation order.
///
/// # Examples
///
/// ```
/// use fabulist_core::{Chapter, Story, StoryMetadata};
///
/// let mut story = Story::new(StoryMetadata::new("A dark forest", 2, 150, 0.8));
/// story.push_chapter(Chapter::new(1, "Trees loomed.", "A dark forest", vec![]));
/// story.push_chapter(Chapter::new(2, "Dawn came.", "Trees loomed. Meanwhile,", vec![]));
///
/// assert_eq!(
///     story.full_text(),
///     "\n\n**Chapter 1**\nTrees loomed.\n\n**Chapter 2**\nDawn came."
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    /// Generation parameters
    pub metadata: StoryMetadata,
    /// Chapters in order
    pub chapters: Vec<Chapter>,
    /// Illustrations in order
    pub images: Vec<StoryImage>,
}

impl Story {
    /// Empty story with the given metadata.
    pub fn new(metadata: StoryMetadata) -> Self {
        Self {
            metadata,
            chapters: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Append a chapter.
    pub fn push_chapter(&mut self, chapter: Chapter) {
        self.chapters.push(chapter);
    }

    /// Append illustrations.
    pub fn extend_images(&mut self, images: impl IntoIterator<Item = StoryImage>) {
        self.images.extend(images);
    }

    /// All chapters rendered with their headings.
    pub fn full_text(&self) -> String {
        self.chapters.iter().map(Chapter::render).collect()
    }

    /// Rough word count of the full text.
    pub fn word_count(&self) -> usize {
        self.chapters
            .iter()
            .map(|c| c.text.split_whitespace().count())
            .sum()
    }

    /// Images generated for a given chapter.
    pub fn images_for(&self, chapter: u32) -> impl Iterator<Item = &StoryImage> {
        self.images.iter().filter(move |img| img.chapter == chapter)
    }
}
