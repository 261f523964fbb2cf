//! HuggingFace Inference API drivers for Fabulist.
//!
//! Two drivers share one retrying HTTP transport:
//!
//! - [`HuggingFaceTextDriver`] implements `TextDriver` against the
//!   text-generation task.
//! - [`HuggingFaceImageDriver`] implements `ImageDriver` against the
//!   text-to-image task and can serve any of the configured diffusion models.
//!
//! # Example
//!
//! ```no_run
//! use fabulist_config::FabulistConfig;
//! use fabulist_core::TextRequest;
//! use fabulist_interface::TextDriver;
//! use fabulist_models::HuggingFaceTextDriver;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FabulistConfig::load()?;
//! let driver = HuggingFaceTextDriver::from_config(&config)?;
//! let request = TextRequest::builder().prompt("Once upon a time").build()?;
//! let text = driver.generate(&request).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod huggingface;

pub use huggingface::{
    API_TOKEN_ENV, HuggingFaceImageDriver, HuggingFaceTextDriver, HuggingFaceTransport,
    ImageGenerationBody, ImageParameters, TextGenerationBody, TextParameters,
};
