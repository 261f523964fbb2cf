//! Chapter records.

use serde::{Deserialize, Serialize};

/// One generated unit of story text.
///
/// # Examples
///
/// ```
/// use fabulist_core::Chapter;
///
/// let chapter = Chapter::new(1, "The castle stood dark.", "Once upon a time", vec![]);
/// assert_eq!(chapter.number, 1);
/// assert!(chapter.heading().contains("Chapter 1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chapter {
    /// 1-based position in the story
    pub number: u32,
    /// Generated text with the echoed prompt removed
    pub text: String,
    /// Prompt the chapter was generated from
    pub prompt: String,
    /// Visual sentences picked from the text, at most two
    pub scene_descriptions: Vec<String>,
}

impl Chapter {
    /// Create a chapter record.
    pub fn new(
        number: u32,
        text: impl Into<String>,
        prompt: impl Into<String>,
        scene_descriptions: Vec<String>,
    ) -> Self {
        Self {
            number,
            text: text.into(),
            prompt: prompt.into(),
            scene_descriptions,
        }
    }

    /// Markdown heading used in the full story text.
    pub fn heading(&self) -> String {
        format!("**Chapter {}**", self.number)
    }

    /// Rendering of this chapter as it appears inside the full story text.
    pub fn render(&self) -> String {
        format!("\n\n{}\n{}", self.heading(), self.text)
    }
}
