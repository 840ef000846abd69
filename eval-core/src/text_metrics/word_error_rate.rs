//! Word error rate

/// Whitespace-separated words; runs of whitespace (including the blank lines
/// between paragraphs) act as a single separator.
pub fn tokenize_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// `(S + D + I) / (H + S + D)`: word-level edit distance over the number of
/// reference words. NaN when the reference has no words.
pub fn word_error_rate(reference: &str, hypothesis: &str) -> f64 {
    let reference = tokenize_words(reference);
    if reference.is_empty() {
        return f64::NAN;
    }
    let hypothesis = tokenize_words(hypothesis);

    strsim::generic_levenshtein(&reference, &hypothesis) as f64 / reference.len() as f64
}
