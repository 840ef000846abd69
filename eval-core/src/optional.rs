//! Optional paragraph markers
//!
//! Annotators flag a reference paragraph as optional by wrapping it in square
//! brackets. The marker is purely textual; everything that needs to know about
//! it goes through this module.

const OPEN_MARKER: char = '[';
const CLOSE_MARKER: char = ']';

/// True iff the paragraph starts with `[` and ends with `]` as two distinct characters.
pub fn is_optional(paragraph: &str) -> bool {
    paragraph.len() >= 2 && paragraph.starts_with(OPEN_MARKER) && paragraph.ends_with(CLOSE_MARKER)
}

/// Remove the optional marker, or return the paragraph unchanged.
pub fn strip_marker(paragraph: &str) -> &str {
    if is_optional(paragraph) {
        // Both markers are single-byte, so these are char boundaries.
        &paragraph[OPEN_MARKER.len_utf8()..paragraph.len() - CLOSE_MARKER.len_utf8()]
    } else {
        paragraph
    }
}

/// Positions of optional paragraphs, in body order.
pub fn optional_indices<S: AsRef<str>>(body: &[S]) -> Vec<usize> {
    body.iter()
        .enumerate()
        .filter(|(_, paragraph)| is_optional(paragraph.as_ref()))
        .map(|(index, _)| index)
        .collect()
}

/// Drop the paragraphs at `remove_indices` and strip the markers of every
/// remaining optional paragraph.
pub fn prepare_body<S: AsRef<str>>(body: &[S], remove_indices: &[usize]) -> Vec<String> {
    body.iter()
        .enumerate()
        .filter(|(index, _)| !remove_indices.contains(index))
        .map(|(_, paragraph)| strip_marker(paragraph.as_ref()).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_optional() {
        assert!(is_optional("[Photo: Reuters]"));
        assert!(is_optional("[]"));
        assert!(!is_optional("Plain paragraph"));
        assert!(!is_optional("[Unclosed"));
        assert!(!is_optional("Unopened]"));
    }

    #[test]
    fn test_short_paragraphs_are_never_optional() {
        assert!(!is_optional(""));
        assert!(!is_optional("["));
        assert!(!is_optional("]"));
    }

    #[test]
    fn test_strip_marker() {
        assert_eq!(strip_marker("[Photo: Reuters]"), "Photo: Reuters");
        assert_eq!(strip_marker("[]"), "");
        assert_eq!(strip_marker("[Über uns]"), "Über uns");
        assert_eq!(strip_marker("Plain"), "Plain");
        assert_eq!(strip_marker(""), "");
        assert_eq!(strip_marker("["), "[");
    }

    #[test]
    fn test_optional_indices() {
        let body = ["A", "[B]", "C", "[D]", ""];
        assert_eq!(optional_indices(&body), vec![1, 3]);
        assert!(optional_indices::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_prepare_body() {
        let body = ["A", "[B]", "C", "[D]"];
        assert_eq!(prepare_body(&body, &[]), vec!["A", "B", "C", "D"]);
        assert_eq!(prepare_body(&body, &[1, 3]), vec!["A", "C"]);
        assert_eq!(prepare_body(&body, &[3]), vec!["A", "B", "C"]);
    }
}
