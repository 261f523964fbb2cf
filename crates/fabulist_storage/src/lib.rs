//! Story artifact storage for Fabulist.
//!
//! A finished story is written out as plain files:
//!
//! - `chapter_<N>.txt` per chapter
//! - `story.md` with the prompt, full text and a summary footer
//! - `story.json` with chapters, metadata and an image index
//! - `chapter_<N>_scene_<M>.png` per illustration
//!
//! Every write returns an [`ArtifactReference`] carrying the SHA-256 of
//! the bytes written.
//!
//! # Example
//!
//! ```rust
//! use fabulist_core::{Chapter, Story, StoryMetadata};
//! use fabulist_storage::{FileSystemStorage, StoryStorage};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = FileSystemStorage::new("/tmp/stories")?;
//!
//! let mut story = Story::new(StoryMetadata::new("A dark forest", 1, 150, 0.8));
//! story.push_chapter(Chapter::new(1, "Trees loomed.", "A dark forest", vec![]));
//!
//! let stored = storage.store_story(&story).await?;
//! let text = storage.retrieve(&stored.artifacts[0]).await?;
//! assert_eq!(text, b"Trees loomed.");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use fabulist_core::{Chapter, Story, StoryImage};
use fabulist_error::FabulistResult;
use std::path::PathBuf;
use uuid::Uuid;

mod document;
mod filesystem;

pub use document::{ImageEntry, StoryDocument, render_markdown};
pub use fabulist_error::{StorageError, StorageErrorKind};
pub use filesystem::{FileSystemStorage, JSON_FILE, MARKDOWN_FILE};

/// Trait for story artifact backends.
#[async_trait::async_trait]
pub trait StoryStorage: Send + Sync {
    /// Write one chapter's text.
    async fn store_chapter(&self, chapter: &Chapter) -> FabulistResult<ArtifactReference>;

    /// Write one illustration as PNG.
    async fn store_image(&self, image: &StoryImage) -> FabulistResult<ArtifactReference>;

    /// Write every artifact of a story.
    ///
    /// Chapters come first, then `story.md`, `story.json` and the images,
    /// each in generation order.
    async fn store_story(&self, story: &Story) -> FabulistResult<StoredStory>;

    /// Read an artifact back, verifying its content hash.
    async fn retrieve(&self, reference: &ArtifactReference) -> FabulistResult<Vec<u8>>;

    /// Check if an artifact exists.
    async fn exists(&self, reference: &ArtifactReference) -> FabulistResult<bool>;
}

/// Kind of artifact written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ArtifactKind {
    /// Plain text of one chapter
    ChapterText,
    /// Whole story as markdown
    Markdown,
    /// Whole story as JSON
    Json,
    /// PNG illustration
    Image,
}

/// Reference to a written artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactReference {
    /// Unique identifier for this write
    pub id: Uuid,
    /// What was written
    pub kind: ArtifactKind,
    /// Where it was written
    pub path: PathBuf,
    /// SHA-256 of the bytes written, lowercase hex
    pub content_hash: String,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Everything written for one story.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredStory {
    /// Run directory the artifacts live in
    pub directory: PathBuf,
    /// Artifacts in write order
    pub artifacts: Vec<ArtifactReference>,
}

impl StoredStory {
    /// Artifacts of one kind.
    pub fn of_kind(&self, kind: ArtifactKind) -> impl Iterator<Item = &ArtifactReference> {
        self.artifacts.iter().filter(move |a| a.kind == kind)
    }

    /// Total bytes written.
    pub fn total_bytes(&self) -> u64 {
        self.artifacts.iter().map(|a| a.size_bytes).sum()
    }
}
