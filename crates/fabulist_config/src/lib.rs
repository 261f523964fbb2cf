//! Layered TOML configuration for Fabulist.
//!
//! Configuration sources in order of precedence (later sources override earlier):
//! 1. Bundled defaults (`fabulist.toml` shipped with the workspace)
//! 2. `~/.config/fabulist/fabulist.toml`
//! 3. `./fabulist.toml`
//!
//! An explicit file passed to [`FabulistConfig::load_with`] replaces layers 2 and 3.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;

pub use config::{
    FabulistConfig, HttpConfig, ImageConfig, OutputConfig, RetryConfig, TextConfig,
};
