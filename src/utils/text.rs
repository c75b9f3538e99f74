//! Text cleaning helpers.

use unicode_segmentation::UnicodeSegmentation;

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove the first occurrence of `label` and normalize whitespace.
pub fn strip_label(text: &str, label: &str) -> String {
    if label.is_empty() {
        return normalize_whitespace(text);
    }
    normalize_whitespace(&text.replacen(label, "", 1))
}

/// Truncate to at most `max` characters without splitting a grapheme.
///
/// Truncated text ends with `…`, which counts toward `max`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for grapheme in s.graphemes(true) {
        let len = grapheme.chars().count();
        if used + len > max - 1 {
            break;
        }
        out.push_str(grapheme);
        used += len;
    }
    out.push('…');
    out
}
