//! User-tunable generation settings.

use crate::ArtStyle;
use derive_getters::Getters;
use fabulist_error::{StoryError, StoryErrorKind};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Default chapter length in tokens.
pub const DEFAULT_CHAPTER_LENGTH: u32 = 150;

/// Default sampling temperature.
pub const DEFAULT_CREATIVITY: f32 = 0.8;

/// Accepted chapter lengths in tokens.
pub const CHAPTER_LENGTH_RANGE: RangeInclusive<u32> = 50..=300;

/// Accepted sampling temperatures.
pub const CREATIVITY_RANGE: RangeInclusive<f32> = 0.1..=1.5;

/// Knobs that shape each generated chapter and its illustrations.
///
/// # Examples
///
/// ```
/// use fabulist_core::{ArtStyle, GenerationSettings};
///
/// let settings = GenerationSettings::default()
///     .with_chapter_length(200)
///     .with_art_style(ArtStyle::Watercolor);
///
/// assert!(settings.validate().is_ok());
/// assert_eq!(*settings.chapter_length(), 200);
/// assert!(GenerationSettings::default().with_creativity(3.0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct GenerationSettings {
    /// Token budget per chapter
    chapter_length: u32,
    /// Sampling temperature
    creativity: f32,
    /// Style appended to image prompts
    art_style: ArtStyle,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            chapter_length: DEFAULT_CHAPTER_LENGTH,
            creativity: DEFAULT_CREATIVITY,
            art_style: ArtStyle::default(),
        }
    }
}

impl GenerationSettings {
    /// Set the chapter length.
    pub fn with_chapter_length(mut self, chapter_length: u32) -> Self {
        self.chapter_length = chapter_length;
        self
    }

    /// Set the sampling temperature.
    pub fn with_creativity(mut self, creativity: f32) -> Self {
        self.creativity = creativity;
        self
    }

    /// Set the art style.
    pub fn with_art_style(mut self, art_style: ArtStyle) -> Self {
        self.art_style = art_style;
        self
    }

    /// Check every setting against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns `StoryErrorKind::InvalidSetting` naming the first offending setting.
    pub fn validate(&self) -> Result<(), StoryError> {
        if !CHAPTER_LENGTH_RANGE.contains(&self.chapter_length) {
            return Err(StoryError::new(StoryErrorKind::InvalidSetting {
                name: "chapter_length".to_string(),
                message: format!(
                    "{} is outside {}..={}",
                    self.chapter_length,
                    CHAPTER_LENGTH_RANGE.start(),
                    CHAPTER_LENGTH_RANGE.end()
                ),
            }));
        }

        if !CREATIVITY_RANGE.contains(&self.creativity) {
            return Err(StoryError::new(StoryErrorKind::InvalidSetting {
                name: "creativity".to_string(),
                message: format!(
                    "{} is outside {}..={}",
                    self.creativity,
                    CREATIVITY_RANGE.start(),
                    CREATIVITY_RANGE.end()
                ),
            }));
        }

        if self.art_style.prompt().trim().is_empty() {
            return Err(StoryError::new(StoryErrorKind::InvalidSetting {
                name: "art_style".to_string(),
                message: "style must not be empty".to_string(),
            }));
        }

        Ok(())
    }
}
