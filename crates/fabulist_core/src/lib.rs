//! Core data types for the Fabulist story generator.
//!
//! This crate provides the records every other Fabulist crate passes around:
//! chapters, stories, illustrated scenes, generation requests and the
//! user-facing settings that shape them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chapter;
mod guide;
mod illustration;
mod request;
mod settings;
mod story;
mod style;

pub use chapter::Chapter;
pub use guide::{DEFAULT_PROMPT, sample_prompts, troubleshooting_info, usage_tips};
pub use illustration::StoryImage;
pub use request::{ImageRequest, ImageRequestBuilder, TextRequest, TextRequestBuilder};
pub use settings::{
    CHAPTER_LENGTH_RANGE, CREATIVITY_RANGE, DEFAULT_CHAPTER_LENGTH, DEFAULT_CREATIVITY,
    GenerationSettings,
};
pub use story::{Story, StoryMetadata};
pub use style::{ArtStyle, DEFAULT_NEGATIVE_PROMPT};
