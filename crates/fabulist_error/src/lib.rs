//! Error types for the Fabulist story generator.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use fabulist_error::{FabulistResult, StoryError, StoryErrorKind};
//!
//! fn check_prompt(prompt: &str) -> FabulistResult<()> {
//!     if prompt.trim().is_empty() {
//!         Err(StoryError::new(StoryErrorKind::EmptyPrompt))?
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_prompt("   ").is_err());
//! assert!(check_prompt("Once upon a time").is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;
mod image;
mod json;
mod models;
mod storage;
mod story;

pub use config::ConfigError;
pub use error::{FabulistError, FabulistErrorKind, FabulistResult};
pub use http::HttpError;
pub use image::{ImageError, ImageErrorKind};
pub use json::JsonError;
pub use models::{HuggingFaceErrorKind, ModelsError, ModelsErrorKind, ModelsResult};
pub use storage::{StorageError, StorageErrorKind};
pub use story::{StoryError, StoryErrorKind};
