//! Sentence splitting shared by scene extraction and chaining.

/// Character that ends a sentence.
///
/// `!` and `?` stay inside the sentence so chained prompts keep the
/// model's own punctuation.
pub const SENTENCE_TERMINATOR: char = '.';

/// Every segment between terminators, including the trailing fragment.
pub(crate) fn segments(text: &str) -> impl Iterator<Item = &str> {
    text.split(SENTENCE_TERMINATOR)
}

/// Trimmed, non-empty sentences that were closed by a terminator.
///
/// The fragment after the last terminator is unfinished and is dropped.
pub(crate) fn complete_sentences(text: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = segments(text).collect();
    parts.pop();
    parts
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
