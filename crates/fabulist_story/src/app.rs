//! Text and image generation wired together.

use crate::{Illustrator, StoryGenerator, StorySession, extract_scene_descriptions};
use fabulist_core::{Chapter, GenerationSettings, Story, StoryMetadata};
use fabulist_error::FabulistResult;
use fabulist_interface::{ImageDriver, TextDriver};
use tracing::{info, instrument};

/// Illustrated story generation.
///
/// Owns a [`StoryGenerator`] and an [`Illustrator`]; text failures are
/// returned, image failures degrade to placeholders.
#[derive(Debug)]
pub struct StoryApp<T, D> {
    generator: StoryGenerator<T>,
    illustrator: Illustrator<D>,
}

impl<T: TextDriver, D: ImageDriver> StoryApp<T, D> {
    /// Combine a generator and an illustrator.
    pub fn new(generator: StoryGenerator<T>, illustrator: Illustrator<D>) -> Self {
        Self {
            generator,
            illustrator,
        }
    }

    /// The text side.
    pub fn generator(&self) -> &StoryGenerator<T> {
        &self.generator
    }

    /// The image side.
    pub fn illustrator(&self) -> &Illustrator<D> {
        &self.illustrator
    }

    /// Load the text model and, when `with_images` is set, the first
    /// image model that loads.
    ///
    /// # Errors
    ///
    /// Returns the text model error. Image model failures only leave the
    /// illustrator in placeholder mode.
    #[instrument(skip(self))]
    pub async fn load(&mut self, with_images: bool) -> FabulistResult<()> {
        self.generator.load().await?;
        if with_images {
            self.illustrator.load_model().await;
        }
        Ok(())
    }

    /// Generate a single illustrated chapter.
    ///
    /// # Errors
    ///
    /// Returns invalid settings or the text generation error.
    #[instrument(skip(self, prompt, settings))]
    pub async fn generate_single_chapter(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
        with_images: bool,
    ) -> FabulistResult<Story> {
        settings.validate()?;

        let text = self
            .generator
            .generate_chapter(prompt, *settings.chapter_length(), *settings.creativity())
            .await?;
        let scenes = extract_scene_descriptions(&text);

        let mut story = Story::new(StoryMetadata::new(
            prompt,
            1,
            *settings.chapter_length(),
            *settings.creativity(),
        ));
        story.push_chapter(Chapter::new(1, text, prompt, scenes));

        if with_images {
            self.illustrate(&mut story, settings).await;
        }
        Ok(story)
    }

    /// Generate a chained multi-chapter story and illustrate every chapter.
    ///
    /// # Errors
    ///
    /// Returns invalid settings, a zero chapter count, or the text
    /// generation error.
    #[instrument(skip(self, initial_prompt, settings))]
    pub async fn generate_complete_story(
        &self,
        initial_prompt: &str,
        num_chapters: u32,
        settings: &GenerationSettings,
        with_images: bool,
    ) -> FabulistResult<Story> {
        settings.validate()?;

        let mut story = self
            .generator
            .generate_complete_story(
                initial_prompt,
                num_chapters,
                *settings.chapter_length(),
                *settings.creativity(),
            )
            .await?;

        if with_images {
            self.illustrate(&mut story, settings).await;
        }
        Ok(story)
    }

    async fn illustrate(&self, story: &mut Story, settings: &GenerationSettings) {
        let style = settings.art_style().prompt();
        let mut images = Vec::new();

        for chapter in &story.chapters {
            if chapter.scene_descriptions.is_empty() {
                continue;
            }
            info!(chapter = chapter.number, "Generating images for chapter");
            images.extend(
                self.illustrator
                    .generate_story_images(&chapter.scene_descriptions, style, chapter.number)
                    .await,
            );
        }

        info!(total = images.len(), "Total images generated");
        story.extend_images(images);
    }

    /// Hand both halves to an interactive session.
    pub fn into_session(self) -> StorySession<T, D> {
        StorySession::new(self.generator, self.illustrator)
    }
}
