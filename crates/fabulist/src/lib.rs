//! Fabulist - illustrated short stories from pre-trained models.
//!
//! Fabulist asks a text-generation model for story chapters, picks the
//! sentences that describe something visible, and asks a diffusion model to
//! illustrate them. Both models are reached over the HuggingFace Inference
//! API; when no image model is available, placeholder images are drawn
//! instead.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fabulist::{
//!     FabulistConfig, GenerationSettings, HuggingFaceImageDriver, HuggingFaceTextDriver,
//!     Illustrator, StoryApp, StoryGenerator,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FabulistConfig::load()?;
//!     let mut app = StoryApp::new(
//!         StoryGenerator::new(HuggingFaceTextDriver::from_config(&config)?),
//!         Illustrator::from_config(HuggingFaceImageDriver::from_config(&config)?, &config.image),
//!     );
//!     app.load(true).await?;
//!
//!     let story = app
//!         .generate_complete_story("Once upon a time", 3, &GenerationSettings::default(), true)
//!         .await?;
//!     println!("{}", story.full_text());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Fabulist is organized as a workspace with focused crates:
//!
//! - `fabulist_error` - Error types
//! - `fabulist_core` - Chapters, stories, settings and art styles
//! - `fabulist_interface` - `TextDriver` and `ImageDriver` traits
//! - `fabulist_config` - Layered TOML configuration
//! - `fabulist_models` - HuggingFace Inference API drivers
//! - `fabulist_story` - Scene extraction, chaining, illustration and sessions
//! - `fabulist_storage` - Writes story artifacts to disk
//!
//! This crate (`fabulist`) re-exports everything for convenience.

pub use fabulist_config::*;
pub use fabulist_core::*;
pub use fabulist_error::*;
pub use fabulist_interface::*;
pub use fabulist_models::*;
pub use fabulist_storage::*;
pub use fabulist_story::*;

pub mod observability;
