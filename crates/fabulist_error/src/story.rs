//! Story orchestration error types.

/// Specific error conditions for story operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoryErrorKind {
    /// Prompt is empty or contains only whitespace
    #[display("Please enter a story prompt")]
    EmptyPrompt,
    /// Continue was requested before any chapter exists
    #[display("No story to continue; generate a chapter first")]
    NothingToContinue,
    /// A chapter count of zero was requested
    #[display("A story needs at least one chapter")]
    NoChapters,
    /// A generation setting is outside its accepted range
    #[display("Invalid setting {}: {}", name, message)]
    InvalidSetting {
        /// Setting name
        name: String,
        /// Why the value was rejected
        message: String,
    },
    /// The text model returned an empty chapter
    #[display("Text model returned no text for prompt: {}", _0)]
    EmptyChapter(String),
    /// A command line of the interactive session could not be read
    #[display("Failed to read session input: {}", _0)]
    SessionInput(String),
}

/// Error type for story operations.
///
/// # Examples
///
/// ```
/// use fabulist_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::NothingToContinue);
/// assert!(format!("{}", err).contains("No story to continue"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The specific error condition
    pub kind: StoryErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
