//! In-memory text and image drivers for testing.

use async_trait::async_trait;
use fabulist_core::{ImageRequest, TextRequest};
use fabulist_error::{FabulistResult, HuggingFaceErrorKind, ModelsError};
use fabulist_interface::{ImageDriver, TextDriver};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

/// A single scripted text response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return the text as-is
    Text(String),
    /// Return the prompt followed by the text
    Echo(String),
    /// Fail with the given error
    Error(HuggingFaceErrorKind),
}

/// Mock text driver that replays scripted responses and records prompts.
#[derive(Debug, Clone)]
pub struct MockTextDriver {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    requests: Arc<Mutex<Vec<TextRequest>>>,
    load_error: Option<HuggingFaceErrorKind>,
}

impl MockTextDriver {
    /// Replay `responses` in order; fails once they run out.
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
            load_error: None,
        }
    }

    /// Replay plain texts in order.
    pub fn new_texts(texts: &[&str]) -> Self {
        Self::new_sequence(
            texts
                .iter()
                .map(|t| MockResponse::Text(t.to_string()))
                .collect(),
        )
    }

    /// Make `load` fail.
    pub fn with_load_error(mut self, error: HuggingFaceErrorKind) -> Self {
        self.load_error = Some(error);
        self
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.prompt().clone())
            .collect()
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<TextRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextDriver for MockTextDriver {
    async fn load(&self) -> FabulistResult<()> {
        match &self.load_error {
            Some(error) => Err(ModelsError::from(error.clone()).into()),
            None => Ok(()),
        }
    }

    async fn generate(&self, req: &TextRequest) -> FabulistResult<String> {
        self.requests.lock().unwrap().push(req.clone());

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(MockResponse::Text(text)) => Ok(text),
            Some(MockResponse::Echo(text)) => Ok(format!("{}{}", req.prompt(), text)),
            Some(MockResponse::Error(error)) => Err(ModelsError::from(error).into()),
            None => Err(ModelsError::from(HuggingFaceErrorKind::Api {
                status: 500,
                message: "mock responses exhausted".to_string(),
            })
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-text"
    }
}

/// What the mock image driver returns from `generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageBehavior {
    /// A small solid-red PNG
    Png,
    /// Bytes that are not an image
    Garbage,
    /// An API error
    Error,
}

/// Solid red, used to tell model output apart from placeholders.
pub const MOCK_PIXEL: Rgb<u8> = Rgb([255, 0, 0]);

/// Mock image driver with a configurable set of loadable models.
#[derive(Debug, Clone)]
pub struct MockImageDriver {
    loadable: Vec<String>,
    behavior: ImageBehavior,
    load_attempts: Arc<Mutex<Vec<String>>>,
    generate_calls: Arc<Mutex<Vec<(String, ImageRequest)>>>,
}

impl MockImageDriver {
    /// Only the listed models load.
    pub fn new(loadable: &[&str], behavior: ImageBehavior) -> Self {
        Self {
            loadable: loadable.iter().map(|m| m.to_string()).collect(),
            behavior,
            load_attempts: Arc::new(Mutex::new(Vec::new())),
            generate_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Model ids `load` was called with, in order.
    pub fn load_attempts(&self) -> Vec<String> {
        self.load_attempts.lock().unwrap().clone()
    }

    /// `(model_id, request)` pairs `generate` was called with.
    pub fn generate_calls(&self) -> Vec<(String, ImageRequest)> {
        self.generate_calls.lock().unwrap().clone()
    }
}

fn png_bytes() -> Vec<u8> {
    let img = RgbImage::from_pixel(4, 4, MOCK_PIXEL);
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut bytes, ImageFormat::Png)
        .unwrap();
    bytes.into_inner()
}

#[async_trait]
impl ImageDriver for MockImageDriver {
    async fn load(&self, model_id: &str) -> FabulistResult<()> {
        self.load_attempts.lock().unwrap().push(model_id.to_string());
        if self.loadable.iter().any(|m| m == model_id) {
            Ok(())
        } else {
            Err(
                ModelsError::from(HuggingFaceErrorKind::ModelUnavailable(model_id.to_string()))
                    .into(),
            )
        }
    }

    async fn generate(&self, model_id: &str, req: &ImageRequest) -> FabulistResult<Vec<u8>> {
        self.generate_calls
            .lock()
            .unwrap()
            .push((model_id.to_string(), req.clone()));

        match self.behavior {
            ImageBehavior::Png => Ok(png_bytes()),
            ImageBehavior::Garbage => Ok(b"not an image".to_vec()),
            ImageBehavior::Error => Err(ModelsError::from(HuggingFaceErrorKind::Api {
                status: 400,
                message: "bad request".to_string(),
            })
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
