// src/utils/url.rs

//! URL manipulation utilities.

/// Build an absolute detail link from a board `href`.
///
/// Relative paths are prefixed with `origin`, then `suffix` is appended as
/// extra query text. Returns `None` for an empty `href`.
///
/// # Examples
/// ```
/// use notice_bot::utils::url::absolute_link;
///
/// assert_eq!(
///     absolute_link("https://example.com", "/bbs/1/view.do", "?layout=unknown"),
///     Some("https://example.com/bbs/1/view.do?layout=unknown".to_string())
/// );
/// ```
pub fn absolute_link(origin: &str, href: &str, suffix: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let base = if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), href)
    } else {
        format!("{}/{}", origin.trim_end_matches('/'), href)
    };

    Some(append_query(&base, suffix))
}

/// Append query text, switching a leading `?` to `&` if the URL already has a query.
fn append_query(url: &str, suffix: &str) -> String {
    match suffix.strip_prefix('?') {
        Some(rest) if url.contains('?') => format!("{url}&{rest}"),
        _ => format!("{url}{suffix}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://mirae.yonsei.ac.kr";

    #[test]
    fn test_absolute_path() {
        assert_eq!(
            absolute_link(ORIGIN, "/bbs/wj/1415/9876/artclView.do", "?layout=unknown"),
            Some(
                "https://mirae.yonsei.ac.kr/bbs/wj/1415/9876/artclView.do?layout=unknown"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            absolute_link("https://example.com/", "view.do", ""),
            Some("https://example.com/view.do".to_string())
        );
    }

    #[test]
    fn test_already_absolute() {
        assert_eq!(
            absolute_link(ORIGIN, "https://other.com/page", "?layout=unknown"),
            Some("https://other.com/page?layout=unknown".to_string())
        );
    }

    #[test]
    fn test_existing_query() {
        assert_eq!(
            absolute_link(ORIGIN, "/view.do?no=1", "?layout=unknown"),
            Some("https://mirae.yonsei.ac.kr/view.do?no=1&layout=unknown".to_string())
        );
    }

    #[test]
    fn test_empty_href() {
        assert_eq!(absolute_link(ORIGIN, "  ", "?layout=unknown"), None);
    }
}
