//! Serializable renderings of a story.

use fabulist_core::{Chapter, Story, StoryMetadata};
use serde::{Deserialize, Serialize};

/// One line of the image index in `story.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Chapter the image belongs to
    pub chapter: u32,
    /// Scene index within the chapter
    pub scene: u32,
    /// Prompt the image was generated from
    pub description: String,
    /// File name next to `story.json`
    pub file: String,
    /// Whether the file is a placeholder
    pub placeholder: bool,
}

/// Contents of `story.json`: the story without bitmaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryDocument {
    /// Generation parameters
    pub metadata: StoryMetadata,
    /// Chapters in order
    pub chapters: Vec<Chapter>,
    /// Image index in order
    pub images: Vec<ImageEntry>,
    /// Rendered full text
    pub full_text: String,
    /// Rough word count
    pub word_count: usize,
}

impl From<&Story> for StoryDocument {
    fn from(story: &Story) -> Self {
        Self {
            metadata: story.metadata.clone(),
            chapters: story.chapters.clone(),
            images: story
                .images
                .iter()
                .map(|img| ImageEntry {
                    chapter: img.chapter,
                    scene: img.scene,
                    description: img.description.clone(),
                    file: img.file_name(),
                    placeholder: img.placeholder,
                })
                .collect(),
            full_text: story.full_text(),
            word_count: story.word_count(),
        }
    }
}

/// Contents of `story.md`.
///
/// # Examples
///
/// ```
/// use fabulist_core::{Chapter, Story, StoryMetadata};
/// use fabulist_storage::render_markdown;
///
/// let mut story = Story::new(StoryMetadata::new("A dark forest", 1, 150, 0.8));
/// story.push_chapter(Chapter::new(1, "Trees loomed.", "A dark forest", vec![]));
///
/// let md = render_markdown(&story);
/// assert!(md.starts_with("# AI Generated Story"));
/// assert!(md.contains("**Prompt:** A dark forest"));
/// assert!(md.ends_with("--- Generated 1 chapters with 0 images ---\n"));
/// ```
pub fn render_markdown(story: &Story) -> String {
    format!(
        "# AI Generated Story\n\n**Prompt:** {}\n{}\n\n--- Generated {} chapters with {} images ---\n",
        story.metadata.initial_prompt,
        story.full_text(),
        story.chapters.len(),
        story.images.len()
    )
}
