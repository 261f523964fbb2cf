//! Top-level error wrapper types.

use crate::{
    ConfigError, HttpError, ImageError, JsonError, ModelsError, StorageError, StoryError,
};

/// Every error condition a Fabulist operation can report.
///
/// # Examples
///
/// ```
/// use fabulist_error::{FabulistError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: FabulistError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FabulistErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Model provider error
    #[from(ModelsError)]
    Models(ModelsError),
    /// Bitmap decode/encode error
    #[from(ImageError)]
    Image(ImageError),
    /// Story orchestration error
    #[from(StoryError)]
    Story(StoryError),
    /// Artifact storage error
    #[from(StorageError)]
    Storage(StorageError),
}

/// Fabulist error with kind discrimination.
///
/// # Examples
///
/// ```
/// use fabulist_error::{ConfigError, FabulistResult};
///
/// fn might_fail() -> FabulistResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Fabulist Error: {}", _0)]
pub struct FabulistError(Box<FabulistErrorKind>);

impl FabulistError {
    /// Create a new error from a kind.
    pub fn new(kind: FabulistErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FabulistErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to FabulistErrorKind
impl<T> From<T> for FabulistError
where
    T: Into<FabulistErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Fabulist operations.
pub type FabulistResult<T> = std::result::Result<T, FabulistError>;
