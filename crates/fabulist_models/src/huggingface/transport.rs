//! Shared HTTP transport for the HuggingFace drivers.

use fabulist_config::{HttpConfig, RetryConfig};
use fabulist_error::{HttpError, HuggingFaceErrorKind, ModelsError, ModelsErrorKind, ModelsResult};
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, instrument, warn};

/// Environment variable holding the API token.
pub const API_TOKEN_ENV: &str = "HUGGINGFACE_API_TOKEN";

/// Retrying HTTP client with optional bearer authentication.
///
/// Transient failures (connection errors, 429 and 5xx while a model cold-loads)
/// are retried with exponential backoff and jitter; everything else fails on
/// the first attempt.
#[derive(Debug, Clone)]
pub struct HuggingFaceTransport {
    client: Client,
    api_token: Option<String>,
    retry: RetryConfig,
}

impl HuggingFaceTransport {
    /// Build a transport from HTTP and retry settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip(api_token))]
    pub fn new(
        http: &HttpConfig,
        retry: RetryConfig,
        api_token: Option<String>,
    ) -> ModelsResult<Self> {
        let client = Client::builder()
            .timeout(http.timeout())
            .build()
            .map_err(|e| {
                ModelsError::new(ModelsErrorKind::Http(HttpError::new(format!(
                    "Failed to build HTTP client: {}",
                    e
                ))))
            })?;

        if api_token.is_none() {
            debug!("No {} set, sending unauthenticated requests", API_TOKEN_ENV);
        }

        Ok(Self {
            client,
            api_token,
            retry,
        })
    }

    /// Read the API token from the environment, treating blank values as unset.
    pub fn token_from_env() -> Option<String> {
        std::env::var(API_TOKEN_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }

    /// Whether requests carry a bearer token.
    pub fn is_authenticated(&self) -> bool {
        self.api_token.is_some()
    }

    /// POST a JSON body and return the raw response body.
    ///
    /// # Errors
    ///
    /// Returns the last error once retries are exhausted, or the first
    /// permanent error.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn post_json<B>(&self, url: &str, body: &B) -> ModelsResult<Vec<u8>>
    where
        B: serde::Serialize + Sync,
    {
        let body = serde_json::to_value(body).map_err(|e| {
            ModelsError::from(HuggingFaceErrorKind::InvalidConfiguration(format!(
                "Failed to serialize request body: {}",
                e
            )))
        })?;

        self.with_retry(|| self.authorized(self.client.post(url)).json(&body))
            .await
    }

    /// GET a URL and return the raw response body.
    ///
    /// # Errors
    ///
    /// Returns the last error once retries are exhausted, or the first
    /// permanent error.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get(&self, url: &str) -> ModelsResult<Vec<u8>> {
        self.with_retry(|| self.authorized(self.client.get(url))).await
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Delays grow as `initial, 2 * initial, 4 * initial, ...` capped at `max_delay_secs`.
    fn strategy(&self) -> impl Iterator<Item = Duration> + use<> {
        let factor = (self.retry.initial_backoff_ms / 2).max(1);
        ExponentialBackoff::from_millis(2)
            .factor(factor)
            .max_delay(Duration::from_secs(self.retry.max_delay_secs))
            .map(jitter)
            .take(self.retry.max_retries)
    }

    async fn with_retry<F>(&self, build: F) -> ModelsResult<Vec<u8>>
    where
        F: Fn() -> RequestBuilder,
    {
        let build = &build;
        Retry::spawn(self.strategy(), move || {
            let request = build();
            async move {
                match send_once(request).await {
                    Ok(bytes) => Ok(bytes),
                    Err(e) if e.is_retryable() => {
                        warn!(error = %e, "Transient HuggingFace error, will retry");
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => Err(RetryError::Permanent(e)),
                }
            }
        })
        .await
    }
}

async fn send_once(request: RequestBuilder) -> ModelsResult<Vec<u8>> {
    let response = request.send().await.map_err(|e| {
        ModelsError::from(HuggingFaceErrorKind::Request(format!("Request failed: {}", e)))
    })?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(status_error(status, message));
    }

    let bytes = response.bytes().await.map_err(|e| {
        ModelsError::from(HuggingFaceErrorKind::Request(format!(
            "Failed to read response body: {}",
            e
        )))
    })?;

    debug!(status = %status, len = bytes.len(), "Received response");
    Ok(bytes.to_vec())
}

fn status_error(status: StatusCode, message: String) -> ModelsError {
    if status == StatusCode::NOT_FOUND {
        return ModelsError::from(HuggingFaceErrorKind::ModelUnavailable(message));
    }

    ModelsError::from(HuggingFaceErrorKind::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Local server answering every request with `status`, counting requests.
    async fn serve(status: &'static str, body: &'static str) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(async move {
                    let mut buf = [0u8; 4096];
                    let _ = socket.read(&mut buf).await;
                    let response = format!(
                        "HTTP/1.1 {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        (format!("http://{}/models/gpt2", addr), hits)
    }

    fn fast_transport(max_retries: usize) -> HuggingFaceTransport {
        HuggingFaceTransport::new(
            &HttpConfig { timeout_secs: 5 },
            RetryConfig {
                max_retries,
                initial_backoff_ms: 2,
                max_delay_secs: 1,
            },
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn service_unavailable_is_retried_until_budget_runs_out() {
        let (url, hits) = serve("503 Service Unavailable", "model is loading").await;

        let err = fast_transport(2).get(&url).await.unwrap_err();

        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert!(matches!(
            err.kind,
            fabulist_error::ModelsErrorKind::HuggingFace(HuggingFaceErrorKind::Api {
                status: 503,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn unauthorized_fails_on_first_attempt() {
        let (url, hits) = serve("401 Unauthorized", "invalid token").await;

        let err = fast_transport(3)
            .post_json(&url, &serde_json::json!({"inputs": "x"}))
            .await
            .unwrap_err();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn success_returns_body() {
        let (url, hits) = serve("200 OK", "[{\"generated_text\":\"hi\"}]").await;

        let bytes = fast_transport(3).get(&url).await.unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(bytes, br#"[{"generated_text":"hi"}]"#);
    }

    #[test]
    fn not_found_maps_to_model_unavailable() {
        let err = status_error(StatusCode::NOT_FOUND, "no such model".to_string());
        assert!(matches!(
            err.kind,
            fabulist_error::ModelsErrorKind::HuggingFace(HuggingFaceErrorKind::ModelUnavailable(_))
        ));
        assert!(!err.is_retryable());
    }

    #[test]
    fn loading_model_is_retryable() {
        let err = status_error(StatusCode::SERVICE_UNAVAILABLE, "loading".to_string());
        assert!(err.is_retryable());
    }

    #[test]
    fn unauthorized_is_permanent() {
        let err = status_error(StatusCode::UNAUTHORIZED, "bad token".to_string());
        assert!(!err.is_retryable());
    }

    #[test]
    fn strategy_respects_retry_budget() {
        let transport = HuggingFaceTransport::new(
            &HttpConfig { timeout_secs: 5 },
            RetryConfig {
                max_retries: 3,
                initial_backoff_ms: 1000,
                max_delay_secs: 30,
            },
            None,
        )
        .unwrap();

        let delays: Vec<Duration> = transport.strategy().collect();
        assert_eq!(delays.len(), 3);
        assert!(delays.iter().all(|d| *d <= Duration::from_secs(30)));
    }
}
