//! Model provider errors.

use crate::HttpError;

/// HuggingFace Inference API error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum HuggingFaceErrorKind {
    /// The HTTP request could not be sent or completed
    #[display("Request failed: {}", _0)]
    Request(String),

    /// The API answered with a non-success status
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// The model identifier could not be resolved on the hub
    #[display("Model unavailable: {}", _0)]
    ModelUnavailable(String),

    /// The response body did not have the expected shape
    #[display("Response conversion failed: {}", _0)]
    ResponseConversion(String),

    /// Driver configuration is unusable
    #[display("Invalid configuration: {}", _0)]
    InvalidConfiguration(String),
}

impl HuggingFaceErrorKind {
    /// Check if this error should be retried.
    ///
    /// Matches the statuses the inference endpoints return while a model
    /// is cold-loading or the service is throttling.
    pub fn is_retryable(&self) -> bool {
        match self {
            HuggingFaceErrorKind::Api { status, .. } => {
                matches!(*status, 429 | 500 | 502 | 503 | 504)
            }
            HuggingFaceErrorKind::Request(_) => true,
            _ => false,
        }
    }
}

/// Model provider-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display, derive_more::From)]
pub enum ModelsErrorKind {
    /// HuggingFace-specific error
    #[display("HuggingFace: {}", _0)]
    HuggingFace(HuggingFaceErrorKind),

    /// HTTP client could not be set up
    #[display("{}", _0)]
    Http(HttpError),

    /// Builder error (derive_builder failures)
    #[from(ignore)]
    #[display("Builder error: {}", _0)]
    Builder(String),

    /// No model in the candidate list could be loaded
    #[from(ignore)]
    #[display("No model could be loaded (tried {})", _0)]
    NoModelLoaded(String),
}

/// Model provider error with location tracking.
///
/// # Examples
///
/// ```
/// use fabulist_error::{HuggingFaceErrorKind, ModelsError, ModelsErrorKind};
///
/// let err = ModelsError::new(ModelsErrorKind::HuggingFace(HuggingFaceErrorKind::Api {
///     status: 503,
///     message: "loading".to_string(),
/// }));
/// assert!(err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Models Error: {} at {}:{}", kind, file, line)]
pub struct ModelsError {
    /// The specific error kind
    pub kind: ModelsErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ModelsError {
    /// Create a new models error.
    #[track_caller]
    pub fn new(kind: ModelsErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match &self.kind {
            ModelsErrorKind::HuggingFace(kind) => kind.is_retryable(),
            _ => false,
        }
    }
}

impl From<HuggingFaceErrorKind> for ModelsError {
    #[track_caller]
    fn from(kind: HuggingFaceErrorKind) -> Self {
        Self::new(ModelsErrorKind::HuggingFace(kind))
    }
}

/// Result type for model operations.
pub type ModelsResult<T> = Result<T, ModelsError>;
