//! Provider-neutral generation requests.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use crate::DEFAULT_NEGATIVE_PROMPT;

/// Request for one text continuation.
///
/// # Examples
///
/// ```
/// use fabulist_core::TextRequest;
///
/// let request = TextRequest::builder()
///     .prompt("Once upon a time")
///     .max_new_tokens(150u32)
///     .temperature(0.8f32)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.prompt(), "Once upon a time");
/// assert_eq!(*request.top_p(), 0.9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct TextRequest {
    /// Text the model continues from
    prompt: String,
    /// Token budget for the continuation
    #[builder(default = "150")]
    max_new_tokens: u32,
    /// Sampling temperature
    #[builder(default = "0.8")]
    temperature: f32,
    /// Nucleus sampling threshold
    #[builder(default = "0.9")]
    top_p: f32,
    /// Penalty applied to repeated tokens
    #[builder(default = "1.1")]
    repetition_penalty: f32,
}

impl TextRequest {
    /// Creates a new builder for `TextRequest`.
    pub fn builder() -> TextRequestBuilder {
        TextRequestBuilder::default()
    }
}

/// Request for one diffusion image.
///
/// # Examples
///
/// ```
/// use fabulist_core::ImageRequest;
///
/// let request = ImageRequest::builder()
///     .prompt("A silver moon over the forest")
///     .style("watercolor painting, artistic")
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     request.enhanced_prompt(),
///     "A silver moon over the forest, watercolor painting, artistic"
/// );
/// assert_eq!(*request.width(), 512);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ImageRequest {
    /// Scene description
    prompt: String,
    /// Art style appended to the description
    #[builder(default = "crate::ArtStyle::Fantasy.prompt().to_string()")]
    style: String,
    /// What the model should avoid
    #[builder(default = "DEFAULT_NEGATIVE_PROMPT.to_string()")]
    negative_prompt: String,
    /// Denoising steps
    #[builder(default = "20")]
    inference_steps: u32,
    /// Classifier-free guidance scale
    #[builder(default = "7.5")]
    guidance_scale: f32,
    /// Output width in pixels
    #[builder(default = "512")]
    width: u32,
    /// Output height in pixels
    #[builder(default = "512")]
    height: u32,
}

impl ImageRequest {
    /// Creates a new builder for `ImageRequest`.
    pub fn builder() -> ImageRequestBuilder {
        ImageRequestBuilder::default()
    }

    /// Scene description with the art style appended.
    pub fn enhanced_prompt(&self) -> String {
        format!("{}, {}", self.prompt, self.style)
    }
}
