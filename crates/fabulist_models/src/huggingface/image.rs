//! HuggingFace text-to-image driver.

use crate::huggingface::{HuggingFaceTransport, ImageGenerationBody};
use async_trait::async_trait;
use fabulist_config::FabulistConfig;
use fabulist_core::ImageRequest;
use fabulist_error::{FabulistResult, HuggingFaceErrorKind, ModelsError, ModelsResult};
use fabulist_interface::ImageDriver;
use tracing::{debug, instrument};

/// HuggingFace Inference API driver for the text-to-image task.
///
/// One driver serves every diffusion model in the candidate list; the
/// model identifier travels with each call.
#[derive(Debug, Clone)]
pub struct HuggingFaceImageDriver {
    transport: HuggingFaceTransport,
    api_base: String,
    hub_base: String,
}

impl HuggingFaceImageDriver {
    /// Creates a driver from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialized.
    #[instrument(skip_all)]
    pub fn from_config(config: &FabulistConfig) -> ModelsResult<Self> {
        let transport = HuggingFaceTransport::new(
            &config.http,
            config.retry,
            HuggingFaceTransport::token_from_env(),
        )?;

        Ok(Self::with_transport(
            transport,
            config.image.api_base.clone(),
            config.image.hub_base.clone(),
        ))
    }

    /// Creates a driver with an explicit transport and endpoints.
    pub fn with_transport(
        transport: HuggingFaceTransport,
        api_base: String,
        hub_base: String,
    ) -> Self {
        Self {
            transport,
            api_base: api_base.trim_end_matches('/').to_string(),
            hub_base: hub_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ImageDriver for HuggingFaceImageDriver {
    #[instrument(skip(self))]
    async fn load(&self, model_id: &str) -> FabulistResult<()> {
        let url = format!("{}/api/models/{}", self.hub_base, model_id);
        self.transport.get(&url).await?;
        Ok(())
    }

    #[instrument(skip(self, req), fields(prompt_len = req.prompt().len()))]
    async fn generate(&self, model_id: &str, req: &ImageRequest) -> FabulistResult<Vec<u8>> {
        let body = ImageGenerationBody::from(req);
        let url = format!("{}/{}", self.api_base, model_id);

        let bytes = self.transport.post_json(&url, &body).await?;
        if bytes.is_empty() {
            return Err(ModelsError::from(HuggingFaceErrorKind::ResponseConversion(
                "Empty image body".to_string(),
            ))
            .into());
        }

        debug!(len = bytes.len(), "Received image bytes");
        Ok(bytes)
    }

    fn provider_name(&self) -> &'static str {
        "huggingface"
    }
}
