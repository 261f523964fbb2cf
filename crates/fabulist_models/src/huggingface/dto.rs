//! HuggingFace Inference API data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use fabulist_core::ImageRequest;
use fabulist_error::{HuggingFaceErrorKind, ModelsError, ModelsResult};
use serde::{Deserialize, Serialize};

/// Sampling parameters for the text-generation task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct TextParameters {
    /// Maximum tokens to generate
    max_new_tokens: u32,
    /// Temperature for sampling
    temperature: f32,
    /// Top-p sampling
    top_p: f32,
    /// Penalty for repeated tokens
    repetition_penalty: f32,
    /// Sample instead of greedy decoding
    #[builder(default = "true")]
    do_sample: bool,
    /// Number of continuations to return
    #[builder(default = "1")]
    num_return_sequences: u32,
}

impl TextParameters {
    /// Creates a new builder for `TextParameters`.
    pub fn builder() -> TextParametersBuilder {
        TextParametersBuilder::default()
    }
}

/// Body of a text-generation request.
///
/// # Examples
///
/// ```
/// use fabulist_models::{TextGenerationBody, TextParameters};
///
/// let parameters = TextParameters::builder()
///     .max_new_tokens(150u32)
///     .temperature(0.8f32)
///     .top_p(0.9f32)
///     .repetition_penalty(1.1f32)
///     .build()
///     .unwrap();
/// let body = TextGenerationBody::builder()
///     .inputs("The tower")
///     .parameters(parameters)
///     .build()
///     .unwrap();
/// let json = serde_json::to_value(&body).unwrap();
///
/// assert_eq!(json["inputs"], "The tower");
/// assert_eq!(json["parameters"]["do_sample"], true);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct TextGenerationBody {
    /// Prompt text
    inputs: String,
    /// Sampling parameters
    parameters: TextParameters,
}

impl TextGenerationBody {
    /// Creates a new builder for `TextGenerationBody`.
    pub fn builder() -> TextGenerationBodyBuilder {
        TextGenerationBodyBuilder::default()
    }
}

/// Diffusion parameters for the text-to-image task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ImageParameters {
    /// What the model should avoid
    negative_prompt: String,
    /// Denoising steps
    num_inference_steps: u32,
    /// Classifier-free guidance scale
    guidance_scale: f32,
    /// Output height in pixels
    height: u32,
    /// Output width in pixels
    width: u32,
}

/// Body of a text-to-image request.
///
/// The scene description and the art style are sent as one prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ImageGenerationBody {
    /// Styled prompt
    inputs: String,
    /// Diffusion parameters
    parameters: ImageParameters,
}

impl From<&ImageRequest> for ImageGenerationBody {
    fn from(req: &ImageRequest) -> Self {
        Self {
            inputs: req.enhanced_prompt(),
            parameters: ImageParameters {
                negative_prompt: req.negative_prompt().clone(),
                num_inference_steps: *req.inference_steps(),
                guidance_scale: *req.guidance_scale(),
                height: *req.height(),
                width: *req.width(),
            },
        }
    }
}

/// Pull the generated text out of a text-generation response.
///
/// The endpoint answers either `[{"generated_text": ...}]` or
/// `{"generated_text": ...}` depending on the deployment.
pub(crate) fn generated_text(response: &serde_json::Value) -> ModelsResult<String> {
    let text = match response.as_array() {
        Some(array) => array
            .first()
            .and_then(|v| v.get("generated_text"))
            .and_then(|v| v.as_str()),
        None => response.get("generated_text").and_then(|v| v.as_str()),
    };

    text.map(str::to_string).ok_or_else(|| {
        ModelsError::from(HuggingFaceErrorKind::ResponseConversion(format!(
            "Missing generated_text in response: {}",
            response
        )))
    })
}
