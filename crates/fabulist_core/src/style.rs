//! Art style presets.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// Negative prompt sent with every image request unless overridden.
pub const DEFAULT_NEGATIVE_PROMPT: &str = "blurry, low quality, distorted";

/// Visual style appended to every scene description.
///
/// # Examples
///
/// ```
/// use fabulist_core::ArtStyle;
///
/// let style: ArtStyle = "anime".parse().unwrap();
/// assert_eq!(style.prompt(), "anime style, colorful, detailed");
///
/// let custom: ArtStyle = "steampunk art, detailed, Victorian era".parse().unwrap();
/// assert_eq!(custom.prompt(), "steampunk art, detailed, Victorian era");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum ArtStyle {
    /// Magical, mystical scenes
    #[default]
    Fantasy,
    /// Photographic quality
    Realistic,
    /// Colorful, animated look
    Anime,
    /// Painted, soft effect
    Watercolor,
    /// Modern, vibrant
    Digital,
    /// Classical, detailed artwork
    OilPainting,
    /// Free-form style string
    Custom(String),
}

impl ArtStyle {
    /// Prompt fragment appended to scene descriptions.
    pub fn prompt(&self) -> &str {
        match self {
            ArtStyle::Fantasy => "fantasy art, detailed, high quality",
            ArtStyle::Realistic => "realistic, photographic, detailed",
            ArtStyle::Anime => "anime style, colorful, detailed",
            ArtStyle::Watercolor => "watercolor painting, artistic",
            ArtStyle::Digital => "digital art, vibrant, detailed",
            ArtStyle::OilPainting => "oil painting, classical, detailed",
            ArtStyle::Custom(style) => style,
        }
    }

    /// Short name used on the command line and in the session.
    pub fn name(&self) -> &str {
        match self {
            ArtStyle::Fantasy => "fantasy",
            ArtStyle::Realistic => "realistic",
            ArtStyle::Anime => "anime",
            ArtStyle::Watercolor => "watercolor",
            ArtStyle::Digital => "digital",
            ArtStyle::OilPainting => "oil_painting",
            ArtStyle::Custom(_) => "custom",
        }
    }

    /// The six built-in presets, in menu order.
    pub fn presets() -> Vec<ArtStyle> {
        ArtStyle::iter()
            .filter(|style| !matches!(style, ArtStyle::Custom(_)))
            .collect()
    }
}

impl std::fmt::Display for ArtStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prompt())
    }
}

impl std::str::FromStr for ArtStyle {
    type Err = std::convert::Infallible;

    /// Accepts a preset name, a preset prompt string, or anything else as a custom style.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let preset = ArtStyle::presets().into_iter().find(|style| {
            style.name().eq_ignore_ascii_case(trimmed)
                || style.name().replace('_', " ").eq_ignore_ascii_case(trimmed)
                || style.prompt() == trimmed
        });
        Ok(preset.unwrap_or_else(|| ArtStyle::Custom(trimmed.to_string())))
    }
}
