//! HuggingFace Inference API integration.

mod dto;
mod image;
mod text;
mod transport;

pub use dto::{ImageGenerationBody, ImageParameters, TextGenerationBody, TextParameters};
pub use image::HuggingFaceImageDriver;
pub use text::HuggingFaceTextDriver;
pub use transport::{API_TOKEN_ENV, HuggingFaceTransport};
