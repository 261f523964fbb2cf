//! Illustrated scene records.

use image::RgbImage;

/// A bitmap generated for one scene of one chapter.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryImage {
    /// Chapter the scene was extracted from
    pub chapter: u32,
    /// 1-based scene index within the chapter
    pub scene: u32,
    /// Scene description used as the image prompt
    pub description: String,
    /// Generated (or placeholder) bitmap
    pub image: RgbImage,
    /// Whether the bitmap is a placeholder rather than model output
    pub placeholder: bool,
}

impl StoryImage {
    /// Short caption: scene number plus the first 50 characters of the description.
    ///
    /// # Examples
    ///
    /// ```
    /// use fabulist_core::StoryImage;
    /// use image::RgbImage;
    ///
    /// let img = StoryImage {
    ///     chapter: 2,
    ///     scene: 1,
    ///     description: "A golden castle".to_string(),
    ///     image: RgbImage::new(1, 1),
    ///     placeholder: true,
    /// };
    /// assert_eq!(img.caption(), "Scene 1: A golden castle...");
    /// ```
    pub fn caption(&self) -> String {
        let short: String = self.description.chars().take(50).collect();
        format!("Scene {}: {}...", self.scene, short)
    }

    /// File name used when the image is written out.
    pub fn file_name(&self) -> String {
        format!("chapter_{}_scene_{}.png", self.chapter, self.scene)
    }
}
