//! Filesystem-based artifact storage.
//!
//! Each run gets its own directory:
//!
//! ```text
//! stories/
//! └── story-5f0c.../
//!     ├── chapter_1.txt
//!     ├── chapter_2.txt
//!     ├── story.md
//!     ├── story.json
//!     ├── chapter_1_scene_1.png
//!     └── chapter_2_scene_1.png
//! ```

use crate::{
    ArtifactKind, ArtifactReference, StoredStory, StoryDocument, StoryStorage, render_markdown,
};
use fabulist_core::{Chapter, Story, StoryImage};
use fabulist_error::{
    FabulistResult, ImageError, ImageErrorKind, JsonError, StorageError, StorageErrorKind,
};
use image::ImageFormat;
use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File name of the markdown rendering.
pub const MARKDOWN_FILE: &str = "story.md";

/// File name of the JSON rendering.
pub const JSON_FILE: &str = "story.json";

/// Filesystem storage backend writing into one run directory.
///
/// Writes go to a temp file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    directory: PathBuf,
}

impl FileSystemStorage {
    /// Create a fresh `story-<uuid>` run directory under `base_path`.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> FabulistResult<Self> {
        let directory = base_path.into().join(format!("story-{}", Uuid::new_v4()));
        Self::at(directory)
    }

    /// Write directly into `directory`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(directory))]
    pub fn at(directory: impl Into<PathBuf>) -> FabulistResult<Self> {
        let directory = directory.into();

        std::fs::create_dir_all(&directory).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                directory.display(),
                e
            )))
        })?;

        tracing::info!(path = %directory.display(), "Created story directory");
        Ok(Self { directory })
    }

    /// Run directory artifacts are written to.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Compute SHA-256 hash of data.
    fn compute_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    /// Verify content hash matches expected hash.
    fn verify_hash(data: &[u8], reference: &ArtifactReference) -> FabulistResult<()> {
        let actual_hash = Self::compute_hash(data);
        if actual_hash != reference.content_hash {
            return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: hash mismatch, expected {}, got {}",
                reference.path.display(),
                reference.content_hash,
                actual_hash
            )))
            .into());
        }
        Ok(())
    }

    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    async fn write(
        &self,
        file_name: &str,
        kind: ArtifactKind,
        data: &[u8],
    ) -> FabulistResult<ArtifactReference> {
        let path = self.directory.join(file_name);
        let temp_path = path.with_extension("tmp");

        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        let content_hash = Self::compute_hash(data);
        tracing::debug!(
            hash = %content_hash,
            path = %path.display(),
            kind = %kind,
            "Wrote artifact"
        );

        Ok(ArtifactReference {
            id: Uuid::new_v4(),
            kind,
            path,
            content_hash,
            size_bytes: data.len() as u64,
        })
    }
}

/// Chapter text file name.
fn chapter_file_name(chapter: &Chapter) -> String {
    format!("chapter_{}.txt", chapter.number)
}

fn encode_png(image: &StoryImage) -> Result<Vec<u8>, ImageError> {
    let mut bytes = Cursor::new(Vec::new());
    image
        .image
        .write_to(&mut bytes, ImageFormat::Png)
        .map_err(|e| ImageError::new(ImageErrorKind::Encode(e.to_string())))?;
    Ok(bytes.into_inner())
}

#[async_trait::async_trait]
impl StoryStorage for FileSystemStorage {
    #[tracing::instrument(skip(self, chapter), fields(chapter = chapter.number))]
    async fn store_chapter(&self, chapter: &Chapter) -> FabulistResult<ArtifactReference> {
        self.write(
            &chapter_file_name(chapter),
            ArtifactKind::ChapterText,
            chapter.text.as_bytes(),
        )
        .await
    }

    #[tracing::instrument(skip(self, image), fields(chapter = image.chapter, scene = image.scene))]
    async fn store_image(&self, image: &StoryImage) -> FabulistResult<ArtifactReference> {
        let bytes = encode_png(image)?;
        self.write(&image.file_name(), ArtifactKind::Image, &bytes)
            .await
    }

    #[tracing::instrument(
        skip(self, story),
        fields(chapters = story.chapters.len(), images = story.images.len())
    )]
    async fn store_story(&self, story: &Story) -> FabulistResult<StoredStory> {
        let mut artifacts = Vec::new();

        for chapter in &story.chapters {
            artifacts.push(self.store_chapter(chapter).await?);
        }

        let markdown = render_markdown(story);
        artifacts.push(
            self.write(MARKDOWN_FILE, ArtifactKind::Markdown, markdown.as_bytes())
                .await?,
        );

        let json = serde_json::to_vec_pretty(&StoryDocument::from(story))
            .map_err(|e| JsonError::new(format!("Failed to serialize story: {}", e)))?;
        artifacts.push(self.write(JSON_FILE, ArtifactKind::Json, &json).await?);

        for image in &story.images {
            artifacts.push(self.store_image(image).await?);
        }

        let stored = StoredStory {
            directory: self.directory.clone(),
            artifacts,
        };

        tracing::info!(
            path = %stored.directory.display(),
            artifacts = stored.artifacts.len(),
            bytes = stored.total_bytes(),
            "Stored story"
        );
        Ok(stored)
    }

    #[tracing::instrument(
        skip(self, reference),
        fields(hash = %reference.content_hash, path = %reference.path.display())
    )]
    async fn retrieve(&self, reference: &ArtifactReference) -> FabulistResult<Vec<u8>> {
        let data = tokio::fs::read(&reference.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(
                    reference.path.display().to_string(),
                ))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    reference.path.display(),
                    e
                )))
            }
        })?;

        Self::verify_hash(&data, reference)?;
        Ok(data)
    }

    #[tracing::instrument(skip(self, reference), fields(path = %reference.path.display()))]
    async fn exists(&self, reference: &ArtifactReference) -> FabulistResult<bool> {
        tokio::fs::try_exists(&reference.path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "check {}: {}",
                reference.path.display(),
                e
            )))
            .into()
        })
    }
}
