//! Trait definitions for Fabulist text and image backends.
//!
//! Story orchestration only ever talks to these traits, so the HTTP drivers
//! in `fabulist_models` and the in-memory fakes used by tests are
//! interchangeable.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ImageDriver, TextDriver};
