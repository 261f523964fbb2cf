//! Bitmap error types.

/// Kinds of bitmap errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ImageErrorKind {
    /// Response bytes were not a decodable image
    #[display("Failed to decode image: {}", _0)]
    Decode(String),
    /// Bitmap could not be encoded for storage
    #[display("Failed to encode image: {}", _0)]
    Encode(String),
    /// Requested bitmap dimensions are unusable
    #[display("Invalid dimensions: {}x{}", _0, _1)]
    InvalidDimensions(u32, u32),
}

/// Bitmap error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Image Error: {} at line {} in {}", kind, line, file)]
pub struct ImageError {
    /// The kind of error that occurred
    pub kind: ImageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ImageError {
    /// Create a new image error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ImageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
