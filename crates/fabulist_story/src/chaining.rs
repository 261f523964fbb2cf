//! Prompt chaining between chapters.

use crate::sentences::complete_sentences;

/// Phrase appended to a chapter's tail to steer the next chapter.
pub const TRANSITION_PHRASE: &str = "Meanwhile,";

/// Characters of tail used when a chapter has no complete sentence.
pub const TAIL_CHARS: usize = 50;

/// Prompt for the next chapter of a complete story.
///
/// The last two complete sentences joined with `". "`, followed by
/// `". Meanwhile,"`. A chapter without a complete sentence contributes its
/// last 50 characters instead.
///
/// # Examples
///
/// ```
/// use fabulist_story::transition_prompt;
///
/// let chapter = "The knight rode out. The road was long. Night fell fast. And yet";
/// assert_eq!(
///     transition_prompt(chapter),
///     "The road was long. Night fell fast. Meanwhile,"
/// );
/// ```
pub fn transition_prompt(chapter_text: &str) -> String {
    let sentences = complete_sentences(chapter_text);
    if sentences.is_empty() {
        return format!("{} {}", tail(chapter_text).trim(), TRANSITION_PHRASE)
            .trim_start()
            .to_string();
    }

    let start = sentences.len().saturating_sub(2);
    format!("{}. {}", sentences[start..].join(". "), TRANSITION_PHRASE)
}

/// Prompt for the next interactive chapter.
///
/// The last complete sentence with its period restored, or the last 50
/// characters when the chapter has no complete sentence.
///
/// # Examples
///
/// ```
/// use fabulist_story::continuation_prompt;
///
/// assert_eq!(
///     continuation_prompt("The door creaked. A shadow moved. Then"),
///     "A shadow moved."
/// );
/// assert_eq!(continuation_prompt("no ending here"), "no ending here");
/// ```
pub fn continuation_prompt(chapter_text: &str) -> String {
    match complete_sentences(chapter_text).last() {
        Some(sentence) => format!("{}.", sentence),
        None => tail(chapter_text).to_string(),
    }
}

/// Last `TAIL_CHARS` characters, respecting char boundaries.
fn tail(text: &str) -> &str {
    let count = text.chars().count();
    if count <= TAIL_CHARS {
        return text;
    }
    match text.char_indices().nth(count - TAIL_CHARS) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}
