/// `ch` repeated once per char of `text`.
pub fn underline(text: &str, ch: char) -> String {
    std::iter::repeat(ch).take(text.chars().count()).collect()
}

/// Cut `text` to at most `max` chars without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
