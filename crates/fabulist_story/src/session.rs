//! Interactive story session state.

use crate::{Illustrator, StoryGenerator, continuation_prompt, extract_scene_descriptions};
use fabulist_core::{
    ArtStyle, Chapter, DEFAULT_PROMPT, GenerationSettings, Story, StoryImage, StoryMetadata,
};
use fabulist_error::{FabulistResult, StoryError, StoryErrorKind};
use fabulist_interface::{ImageDriver, TextDriver};
use tracing::{info, instrument};

/// One interactive story in progress.
///
/// Each generated chapter is numbered after the previous one and leaves
/// the prompt set to its last complete sentence, so repeated `generate`
/// calls keep the story going.
///
/// # Examples
///
/// ```ignore
/// let mut session = StorySession::new(generator, illustrator);
/// session.set_prompt("A lighthouse keeper found a map");
/// let chapter = session.generate().await?;
/// println!("{}", chapter.text);
/// session.continue_story().await?;
/// ```
#[derive(Debug)]
pub struct StorySession<T, D> {
    generator: StoryGenerator<T>,
    illustrator: Illustrator<D>,
    settings: GenerationSettings,
    prompt: String,
    images_enabled: bool,
    chapters: Vec<Chapter>,
    images: Vec<StoryImage>,
}

impl<T: TextDriver, D: ImageDriver> StorySession<T, D> {
    /// Fresh session with default settings and the default prompt.
    pub fn new(generator: StoryGenerator<T>, illustrator: Illustrator<D>) -> Self {
        Self {
            generator,
            illustrator,
            settings: GenerationSettings::default(),
            prompt: DEFAULT_PROMPT.to_string(),
            images_enabled: true,
            chapters: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Start from the given settings instead of the defaults.
    ///
    /// # Errors
    ///
    /// Returns `StoryErrorKind::InvalidSetting` if `settings` is out of range.
    pub fn with_settings(mut self, settings: GenerationSettings) -> Result<Self, StoryError> {
        settings.validate()?;
        self.settings = settings;
        Ok(self)
    }

    /// Enable or disable illustrations.
    pub fn with_images(mut self, enabled: bool) -> Self {
        self.images_enabled = enabled;
        self
    }

    /// Prompt the next chapter will be generated from.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replace the prompt.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Current settings.
    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Change the chapter length.
    ///
    /// # Errors
    ///
    /// Returns `StoryErrorKind::InvalidSetting` outside 50..=300; the old
    /// value is kept.
    pub fn set_chapter_length(&mut self, chapter_length: u32) -> Result<(), StoryError> {
        self.apply(self.settings.clone().with_chapter_length(chapter_length))
    }

    /// Change the sampling temperature.
    ///
    /// # Errors
    ///
    /// Returns `StoryErrorKind::InvalidSetting` outside 0.1..=1.5; the old
    /// value is kept.
    pub fn set_creativity(&mut self, creativity: f32) -> Result<(), StoryError> {
        self.apply(self.settings.clone().with_creativity(creativity))
    }

    /// Change the art style.
    ///
    /// # Errors
    ///
    /// Returns `StoryErrorKind::InvalidSetting` for a blank custom style.
    pub fn set_art_style(&mut self, art_style: ArtStyle) -> Result<(), StoryError> {
        self.apply(self.settings.clone().with_art_style(art_style))
    }

    fn apply(&mut self, settings: GenerationSettings) -> Result<(), StoryError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Whether illustrations are generated.
    pub fn images_enabled(&self) -> bool {
        self.images_enabled
    }

    /// Image model in use, if any.
    pub fn active_image_model(&self) -> Option<&str> {
        self.illustrator.active_model()
    }

    /// Chapters generated so far.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Number of chapters generated so far.
    pub fn chapter_count(&self) -> u32 {
        self.chapters.len() as u32
    }

    /// Illustrations generated so far.
    pub fn images(&self) -> &[StoryImage] {
        &self.images
    }

    /// Whether nothing has been generated yet.
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Every chapter rendered with its heading.
    pub fn full_text(&self) -> String {
        self.chapters.iter().map(Chapter::render).collect()
    }

    /// Generate the next chapter from the current prompt.
    ///
    /// # Errors
    ///
    /// Returns `StoryErrorKind::EmptyPrompt` for a blank prompt, or the text
    /// generation error. The session is unchanged on error.
    #[instrument(skip(self), fields(chapter = self.chapters.len() + 1))]
    pub async fn generate(&mut self) -> FabulistResult<&Chapter> {
        if self.prompt.trim().is_empty() {
            return Err(StoryError::new(StoryErrorKind::EmptyPrompt).into());
        }

        let text = self
            .generator
            .generate_chapter(
                &self.prompt,
                *self.settings.chapter_length(),
                *self.settings.creativity(),
            )
            .await?;

        let number = self.chapter_count() + 1;
        let scenes = extract_scene_descriptions(&text);

        if self.images_enabled && !scenes.is_empty() {
            let images = self
                .illustrator
                .generate_story_images(&scenes, self.settings.art_style().prompt(), number)
                .await;
            self.images.extend(images);
        }

        let next_prompt = continuation_prompt(&text);
        let prompt = std::mem::replace(&mut self.prompt, next_prompt);
        self.chapters.push(Chapter::new(number, text, prompt, scenes));
        info!(chapter = number, "Chapter generated");

        let idx = self.chapters.len() - 1;
        Ok(&self.chapters[idx])
    }

    /// Generate the next chapter of an existing story.
    ///
    /// # Errors
    ///
    /// Returns `StoryErrorKind::NothingToContinue` before the first chapter,
    /// otherwise as [`generate`](Self::generate).
    pub async fn continue_story(&mut self) -> FabulistResult<&Chapter> {
        if self.is_empty() {
            return Err(StoryError::new(StoryErrorKind::NothingToContinue).into());
        }
        self.generate().await
    }

    /// Drop all chapters and images and restore the default prompt.
    ///
    /// Settings are kept.
    pub fn reset(&mut self) {
        self.chapters.clear();
        self.images.clear();
        self.prompt = DEFAULT_PROMPT.to_string();
        info!("Story reset");
    }

    /// Snapshot of the session as a story record.
    ///
    /// # Errors
    ///
    /// Returns `StoryErrorKind::NoChapters` when nothing has been generated.
    pub fn to_story(&self) -> Result<Story, StoryError> {
        let first = self
            .chapters
            .first()
            .ok_or_else(|| StoryError::new(StoryErrorKind::NoChapters))?;

        let mut story = Story::new(StoryMetadata::new(
            first.prompt.clone(),
            self.chapter_count(),
            *self.settings.chapter_length(),
            *self.settings.creativity(),
        ));
        for chapter in &self.chapters {
            story.push_chapter(chapter.clone());
        }
        story.extend_images(self.images.iter().cloned());
        Ok(story)
    }
}
