//! Keyword-based scene extraction.
//!
//! A sentence is treated as a scene when it is long enough and mentions at
//! least one visual keyword. Scenes become image prompts, so characters a
//! diffusion prompt has no use for are stripped.

use crate::sentences::segments;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, instrument};

/// Words that mark a sentence as visual.
pub const VISUAL_KEYWORDS: [&str; 20] = [
    "looked",
    "saw",
    "appeared",
    "stood",
    "walked",
    "dark",
    "bright",
    "beautiful",
    "scary",
    "ancient",
    "mysterious",
    "golden",
    "silver",
    "forest",
    "castle",
    "mountain",
    "ocean",
    "sky",
    "moon",
    "sun",
];

/// Most scenes returned per chapter.
pub const MAX_SCENES: usize = 2;

/// Sentences must be longer than this to be considered.
const MIN_SENTENCE_CHARS: usize = 20;

/// Cleaned scenes must be longer than this to be kept.
const MIN_SCENE_CHARS: usize = 10;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s,.-]").expect("Valid scene cleanup regex"));

/// Pull up to two visual scene descriptions out of chapter text.
///
/// # Examples
///
/// ```
/// use fabulist_story::extract_scene_descriptions;
///
/// let text = "The old castle stood on the hill. It was quiet. \
///             A mysterious light appeared in the tower window!";
/// let scenes = extract_scene_descriptions(text);
///
/// assert_eq!(
///     scenes,
///     vec![
///         "The old castle stood on the hill",
///         "A mysterious light appeared in the tower window",
///     ]
/// );
/// ```
#[instrument(skip(text), fields(text_len = text.len()))]
pub fn extract_scene_descriptions(text: &str) -> Vec<String> {
    let scenes: Vec<String> = segments(text)
        .map(str::trim)
        .filter(|sentence| sentence.chars().count() > MIN_SENTENCE_CHARS)
        .filter(|sentence| is_visual(sentence))
        .map(|sentence| DISALLOWED.replace_all(sentence, "").into_owned())
        .filter(|clean| clean.chars().count() > MIN_SCENE_CHARS)
        .take(MAX_SCENES)
        .collect();

    debug!(count = scenes.len(), "Extracted scene descriptions");
    scenes
}

fn is_visual(sentence: &str) -> bool {
    let lower = sentence.to_lowercase();
    VISUAL_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}
