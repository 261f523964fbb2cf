//! Chapter and multi-chapter story generation.

use crate::{extract_scene_descriptions, transition_prompt};
use fabulist_core::{Chapter, Story, StoryMetadata, TextRequest};
use fabulist_error::{FabulistResult, ModelsError, ModelsErrorKind, StoryError, StoryErrorKind};
use fabulist_interface::TextDriver;
use tracing::{debug, info, instrument};

/// Drives a text backend to produce chapters.
#[derive(Debug)]
pub struct StoryGenerator<T> {
    driver: T,
}

impl<T: TextDriver> StoryGenerator<T> {
    /// Wrap a text backend.
    pub fn new(driver: T) -> Self {
        Self { driver }
    }

    /// The wrapped backend.
    pub fn driver(&self) -> &T {
        &self.driver
    }

    /// Make sure the text model is reachable.
    ///
    /// # Errors
    ///
    /// Propagates the backend error; text generation cannot degrade.
    #[instrument(
        skip(self),
        fields(provider = self.driver.provider_name(), model = self.driver.model_name())
    )]
    pub async fn load(&self) -> FabulistResult<()> {
        info!("Loading text generation model");
        self.driver.load().await?;
        info!("Text generation model loaded");
        Ok(())
    }

    /// Generate one chapter's text from `prompt`.
    ///
    /// An echoed prompt at the start of the output is stripped and the
    /// result is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `StoryErrorKind::EmptyPrompt` for a blank prompt,
    /// `StoryErrorKind::EmptyChapter` when nothing is left after cleanup,
    /// or the backend error.
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn generate_chapter(
        &self,
        prompt: &str,
        max_new_tokens: u32,
        temperature: f32,
    ) -> FabulistResult<String> {
        if prompt.trim().is_empty() {
            return Err(StoryError::new(StoryErrorKind::EmptyPrompt).into());
        }

        let request = TextRequest::builder()
            .prompt(prompt)
            .max_new_tokens(max_new_tokens)
            .temperature(temperature)
            .build()
            .map_err(|e| ModelsError::new(ModelsErrorKind::Builder(e.to_string())))?;

        let generated = self.driver.generate(&request).await?;
        let text = generated
            .strip_prefix(prompt)
            .unwrap_or(&generated)
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(StoryError::new(StoryErrorKind::EmptyChapter(prompt.to_string())).into());
        }

        debug!(chapter_len = text.len(), "Generated chapter text");
        Ok(text)
    }

    /// Generate `num_chapters` chained chapters.
    ///
    /// Every chapter after the first is prompted with the last two sentences
    /// of the previous one followed by `Meanwhile,`.
    ///
    /// # Errors
    ///
    /// Returns `StoryErrorKind::NoChapters` when `num_chapters` is zero, or
    /// the first chapter error.
    #[instrument(skip(self, initial_prompt))]
    pub async fn generate_complete_story(
        &self,
        initial_prompt: &str,
        num_chapters: u32,
        chapter_length: u32,
        temperature: f32,
    ) -> FabulistResult<Story> {
        if num_chapters == 0 {
            return Err(StoryError::new(StoryErrorKind::NoChapters).into());
        }

        info!("Generating a {}-chapter story", num_chapters);
        let mut story = Story::new(StoryMetadata::new(
            initial_prompt,
            num_chapters,
            chapter_length,
            temperature,
        ));

        let mut prompt = initial_prompt.to_string();
        for number in 1..=num_chapters {
            info!(chapter = number, "Generating chapter");
            let text = self
                .generate_chapter(&prompt, chapter_length, temperature)
                .await?;
            let scenes = extract_scene_descriptions(&text);
            let next_prompt = transition_prompt(&text);

            story.push_chapter(Chapter::new(number, text, prompt, scenes));
            info!(chapter = number, "Chapter completed");

            prompt = next_prompt;
        }

        info!(
            chapters = story.chapters.len(),
            words = story.word_count(),
            "Complete story generated"
        );
        Ok(story)
    }
}
