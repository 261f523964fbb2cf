//! Scene illustration with model fallback and placeholders.

use crate::render_placeholder;
use fabulist_config::ImageConfig;
use fabulist_core::{DEFAULT_NEGATIVE_PROMPT, ImageRequest, StoryImage};
use fabulist_error::{FabulistResult, ImageError, ImageErrorKind, ModelsError, ModelsErrorKind};
use fabulist_interface::ImageDriver;
use image::RgbImage;
use tracing::{debug, error, info, instrument, warn};

/// Diffusion models tried in order when no configuration is given.
pub const DEFAULT_IMAGE_MODELS: [&str; 3] = [
    "runwayml/stable-diffusion-v1-5",
    "CompVis/stable-diffusion-v1-4",
    "stabilityai/stable-diffusion-2-1-base",
];

/// Turns scene descriptions into bitmaps.
///
/// [`load_model`](Self::load_model) walks the candidate list and records the
/// first model that loads. Without an active model, or when a generation
/// fails, a placeholder bitmap is returned instead of an error.
#[derive(Debug)]
pub struct Illustrator<D> {
    driver: D,
    candidates: Vec<String>,
    active_model: Option<String>,
    negative_prompt: String,
    inference_steps: u32,
    guidance_scale: f32,
    width: u32,
    height: u32,
}

impl<D: ImageDriver> Illustrator<D> {
    /// Illustrator with the default candidates and 512x512 output.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            candidates: DEFAULT_IMAGE_MODELS.iter().map(|m| m.to_string()).collect(),
            active_model: None,
            negative_prompt: DEFAULT_NEGATIVE_PROMPT.to_string(),
            inference_steps: 20,
            guidance_scale: 7.5,
            width: 512,
            height: 512,
        }
    }

    /// Illustrator using the candidates and diffusion settings from configuration.
    pub fn from_config(driver: D, config: &ImageConfig) -> Self {
        Self {
            driver,
            candidates: config.candidates.clone(),
            active_model: None,
            negative_prompt: config.negative_prompt.clone(),
            inference_steps: config.inference_steps,
            guidance_scale: config.guidance_scale,
            width: config.width,
            height: config.height,
        }
    }

    /// What the model is asked to avoid.
    pub fn negative_prompt(&self) -> &str {
        &self.negative_prompt
    }

    /// Replace the negative prompt sent with every later request.
    pub fn set_negative_prompt(&mut self, negative_prompt: impl Into<String>) {
        self.negative_prompt = negative_prompt.into();
    }

    /// Candidate model identifiers, in the order they are tried.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Model that loaded, if any.
    pub fn active_model(&self) -> Option<&str> {
        self.active_model.as_deref()
    }

    /// Whether a model is available for generation.
    pub fn is_model_loaded(&self) -> bool {
        self.active_model.is_some()
    }

    /// Output dimensions in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Load the first candidate that the backend accepts.
    ///
    /// Failures are logged and the next candidate is tried. If none loads,
    /// every later request renders a placeholder.
    #[instrument(skip(self), fields(provider = self.driver.provider_name()))]
    pub async fn load_model(&mut self) -> Option<&str> {
        info!("Loading image generation model");
        self.active_model = None;

        for model_id in &self.candidates {
            debug!(model = %model_id, "Attempting to load");
            match self.driver.load(model_id).await {
                Ok(()) => {
                    info!(model = %model_id, "Image generation model loaded");
                    self.active_model = Some(model_id.clone());
                    break;
                }
                Err(e) => {
                    warn!(model = %model_id, error = %e, "Failed to load image model");
                }
            }
        }

        if self.active_model.is_none() {
            let tried =
                ModelsError::new(ModelsErrorKind::NoModelLoaded(self.candidates.join(", ")));
            warn!(error = %tried, "Image generation will use placeholder images");
        }

        self.active_model.as_deref()
    }

    /// Generate one scene image, falling back to a placeholder.
    ///
    /// # Errors
    ///
    /// Only fails when the placeholder itself cannot be rendered.
    #[instrument(skip(self, description, style))]
    pub async fn generate_image(
        &self,
        chapter: u32,
        scene: u32,
        description: &str,
        style: &str,
    ) -> FabulistResult<StoryImage> {
        let (image, placeholder) = match self.render(description, style).await {
            Some(image) => (image, false),
            None => (render_placeholder(description, self.width, self.height)?, true),
        };

        Ok(StoryImage {
            chapter,
            scene,
            description: description.to_string(),
            image,
            placeholder,
        })
    }

    /// Generate images for every scene of a chapter.
    ///
    /// Scenes whose image cannot be produced at all are logged and skipped.
    #[instrument(skip(self, scenes, style), fields(count = scenes.len()))]
    pub async fn generate_story_images(
        &self,
        scenes: &[String],
        style: &str,
        chapter: u32,
    ) -> Vec<StoryImage> {
        info!("Generating {} image(s)", scenes.len());

        let mut images = Vec::with_capacity(scenes.len());
        for (idx, scene) in scenes.iter().enumerate() {
            let number = idx as u32 + 1;
            match self.generate_image(chapter, number, scene, style).await {
                Ok(image) => images.push(image),
                Err(e) => error!(scene = number, error = %e, "Error generating image for scene"),
            }
        }
        images
    }

    /// Model output decoded to RGB, or `None` when a placeholder is needed.
    async fn render(&self, description: &str, style: &str) -> Option<RgbImage> {
        let Some(model_id) = self.active_model.as_deref() else {
            warn!("Image generator not available, creating placeholder image");
            return None;
        };

        let request = match ImageRequest::builder()
            .prompt(description)
            .style(style)
            .negative_prompt(self.negative_prompt.clone())
            .inference_steps(self.inference_steps)
            .guidance_scale(self.guidance_scale)
            .width(self.width)
            .height(self.height)
            .build()
        {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Invalid image request, creating placeholder image");
                return None;
            }
        };

        let bytes = match self.driver.generate(model_id, &request).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(
                    model = %model_id,
                    error = %e,
                    "Error generating image, creating placeholder image"
                );
                return None;
            }
        };

        match decode(&bytes) {
            Ok(image) => Some(image),
            Err(e) => {
                warn!(error = %e, "Could not decode image, creating placeholder image");
                None
            }
        }
    }
}

fn decode(bytes: &[u8]) -> Result<RgbImage, ImageError> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgb8())
        .map_err(|e| ImageError::new(ImageErrorKind::Decode(e.to_string())))
}
