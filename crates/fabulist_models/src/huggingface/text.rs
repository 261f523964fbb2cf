//! HuggingFace text-generation driver.

use crate::huggingface::{HuggingFaceTransport, TextGenerationBody, TextParameters, dto};
use async_trait::async_trait;
use fabulist_config::FabulistConfig;
use fabulist_core::TextRequest;
use fabulist_error::{
    FabulistResult, HuggingFaceErrorKind, ModelsError, ModelsErrorKind, ModelsResult,
};
use fabulist_interface::TextDriver;
use tracing::{debug, error, info, instrument};

/// HuggingFace Inference API driver for the text-generation task.
#[derive(Debug, Clone)]
pub struct HuggingFaceTextDriver {
    transport: HuggingFaceTransport,
    model: String,
    api_base: String,
    hub_base: String,
    top_p: Option<f32>,
    repetition_penalty: Option<f32>,
}

impl HuggingFaceTextDriver {
    /// Creates a driver from loaded configuration.
    ///
    /// Reads the API token from `HUGGINGFACE_API_TOKEN` if set.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialized.
    #[instrument(skip_all, fields(model = %config.text.model))]
    pub fn from_config(config: &FabulistConfig) -> ModelsResult<Self> {
        let transport = HuggingFaceTransport::new(
            &config.http,
            config.retry,
            HuggingFaceTransport::token_from_env(),
        )?;

        Ok(Self::with_transport(
            transport,
            config.text.model.clone(),
            config.text.api_base.clone(),
            config.text.hub_base.clone(),
        )
        .with_sampling(config.text.top_p, config.text.repetition_penalty))
    }

    /// Creates a driver with an explicit transport and endpoints.
    pub fn with_transport(
        transport: HuggingFaceTransport,
        model: String,
        api_base: String,
        hub_base: String,
    ) -> Self {
        debug!(model = %model, "Created HuggingFace text driver");
        Self {
            transport,
            model,
            api_base: api_base.trim_end_matches('/').to_string(),
            hub_base: hub_base.trim_end_matches('/').to_string(),
            top_p: None,
            repetition_penalty: None,
        }
    }

    /// Pin sampling parameters, overriding whatever each request carries.
    pub fn with_sampling(mut self, top_p: f32, repetition_penalty: f32) -> Self {
        self.top_p = Some(top_p);
        self.repetition_penalty = Some(repetition_penalty);
        self
    }

    /// Build the request body, applying pinned sampling parameters.
    fn body(&self, req: &TextRequest) -> ModelsResult<TextGenerationBody> {
        let parameters = TextParameters::builder()
            .max_new_tokens(*req.max_new_tokens())
            .temperature(*req.temperature())
            .top_p(self.top_p.unwrap_or(*req.top_p()))
            .repetition_penalty(self.repetition_penalty.unwrap_or(*req.repetition_penalty()))
            .build()
            .map_err(|e| ModelsError::new(ModelsErrorKind::Builder(e.to_string())))?;

        TextGenerationBody::builder()
            .inputs(req.prompt().clone())
            .parameters(parameters)
            .build()
            .map_err(|e| ModelsError::new(ModelsErrorKind::Builder(e.to_string())))
    }

    fn inference_url(&self) -> String {
        format!("{}/{}", self.api_base, self.model)
    }
}

#[async_trait]
impl TextDriver for HuggingFaceTextDriver {
    #[instrument(skip(self), fields(model = %self.model))]
    async fn load(&self) -> FabulistResult<()> {
        info!("Loading text generation model");
        let url = format!("{}/api/models/{}", self.hub_base, self.model);
        self.transport.get(&url).await.map_err(|e| {
            error!(error = %e, "Error loading text model");
            e
        })?;
        info!(authenticated = self.transport.is_authenticated(), "Text generation model loaded");
        Ok(())
    }

    #[instrument(
        skip(self, req),
        fields(model = %self.model, max_new_tokens = *req.max_new_tokens())
    )]
    async fn generate(&self, req: &TextRequest) -> FabulistResult<String> {
        let body = self.body(req)?;

        debug!(inputs_len = body.inputs().len(), "Sending request to HuggingFace");
        let bytes = self.transport.post_json(&self.inference_url(), &body).await?;

        let response: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| {
            error!(error = ?e, "Failed to parse JSON");
            ModelsError::from(HuggingFaceErrorKind::ResponseConversion(format!(
                "Failed to parse JSON: {}",
                e
            )))
        })?;

        let text = dto::generated_text(&response)?;
        debug!(response_len = text.len(), "Received generated text");
        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "huggingface"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabulist_config::{HttpConfig, RetryConfig};

    fn driver() -> HuggingFaceTextDriver {
        let transport = HuggingFaceTransport::new(
            &HttpConfig { timeout_secs: 5 },
            RetryConfig {
                max_retries: 0,
                initial_backoff_ms: 10,
                max_delay_secs: 1,
            },
            None,
        )
        .unwrap();
        HuggingFaceTextDriver::with_transport(
            transport,
            "gpt2-medium".to_string(),
            "https://example.invalid/models/".to_string(),
            "https://example.invalid".to_string(),
        )
    }

    #[test]
    fn inference_url_joins_model() {
        assert_eq!(driver().inference_url(), "https://example.invalid/models/gpt2-medium");
    }

    #[test]
    fn pinned_sampling_overrides_request() {
        let request = TextRequest::builder()
            .prompt("The knight")
            .top_p(0.5f32)
            .build()
            .unwrap();

        let body = driver().with_sampling(0.95, 1.3).body(&request).unwrap();
        assert_eq!(*body.parameters().top_p(), 0.95);
        assert_eq!(*body.parameters().repetition_penalty(), 1.3);

        let body = driver().body(&request).unwrap();
        assert_eq!(*body.parameters().top_p(), 0.5);
        assert!(*body.parameters().do_sample());
    }

    #[test]
    fn body_carries_prompt_and_request_sampling() {
        let request = TextRequest::builder()
            .prompt("The lighthouse")
            .max_new_tokens(200u32)
            .temperature(1.2f32)
            .build()
            .unwrap();

        let body = driver().with_sampling(0.9, 1.1).body(&request).unwrap();
        assert_eq!(body.inputs(), "The lighthouse");
        assert_eq!(*body.parameters().max_new_tokens(), 200);
        assert_eq!(*body.parameters().temperature(), 1.2);
        assert_eq!(*body.parameters().num_return_sequences(), 1);
    }
}
