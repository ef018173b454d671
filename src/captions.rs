//! Trims a running caption stream down to the words worth sending.

/// Keeps the last `max_words` whitespace-separated words of `captions`.
///
/// A limit of zero keeps every word. Runs of whitespace collapse to one space.
pub fn extract_context(captions: &str, max_words: usize) -> String {
    let words: Vec<&str> = captions.split_whitespace().collect();
    let start = if max_words == 0 {
        0
    } else {
        words.len().saturating_sub(max_words)
    };
    words[start..].join(" ")
}
