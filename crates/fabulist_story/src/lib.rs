//! Story orchestration for Fabulist.
//!
//! This crate sequences the text and image backends into illustrated
//! stories:
//!
//! - [`StoryGenerator`] produces chapters and chains them into a story.
//! - [`extract_scene_descriptions`] picks the sentences worth illustrating.
//! - [`Illustrator`] loads the first available diffusion model and renders
//!   placeholders when it cannot.
//! - [`StoryApp`] runs single chapters and complete stories end to end.
//! - [`StorySession`] holds an interactive story between commands.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod chaining;
mod generator;
mod illustrator;
mod placeholder;
mod scenes;
mod sentences;
mod session;

pub use app::StoryApp;
pub use chaining::{TAIL_CHARS, TRANSITION_PHRASE, continuation_prompt, transition_prompt};
pub use generator::StoryGenerator;
pub use illustrator::{DEFAULT_IMAGE_MODELS, Illustrator};
pub use placeholder::{BACKGROUND, INK, PLACEHOLDER_HEADING, SHADOW, render_placeholder};
pub use scenes::{MAX_SCENES, VISUAL_KEYWORDS, extract_scene_descriptions};
pub use sentences::SENTENCE_TERMINATOR;
pub use session::StorySession;
