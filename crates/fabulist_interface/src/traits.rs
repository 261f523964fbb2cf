//! Trait definitions for generation backends.

use async_trait::async_trait;
use fabulist_core::{ImageRequest, TextRequest};
use fabulist_error::FabulistResult;

/// Backend that continues a prompt with generated text.
#[async_trait]
pub trait TextDriver: Send + Sync {
    /// Make sure the backing model is reachable before the first chapter.
    async fn load(&self) -> FabulistResult<()>;

    /// Generate a continuation.
    ///
    /// The returned text may or may not echo the prompt; callers strip it.
    async fn generate(&self, req: &TextRequest) -> FabulistResult<String>;

    /// Provider name (e.g., "huggingface").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt2-medium").
    fn model_name(&self) -> &str;
}

/// Backend that turns a scene description into an encoded image.
///
/// The same driver may serve several model identifiers; the caller picks
/// one with `load` and passes it back on every `generate` call.
#[async_trait]
pub trait ImageDriver: Send + Sync {
    /// Try to make `model_id` available.
    async fn load(&self, model_id: &str) -> FabulistResult<()>;

    /// Generate an image with `model_id`, returning the encoded bytes (PNG, JPEG, ...).
    async fn generate(&self, model_id: &str, req: &ImageRequest) -> FabulistResult<Vec<u8>>;

    /// Provider name (e.g., "huggingface").
    fn provider_name(&self) -> &'static str;
}
