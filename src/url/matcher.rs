/// Checks if a host matches a wildcard pattern
///
/// This function supports two types of patterns:
/// 1. Exact match: "example.net" matches only "example.net"
/// 2. Wildcard match: "*.example.net" matches the bare domain and any subdomain
///
/// Hosts are expected lowercase; the `url` crate already normalizes them.
///
/// # Examples
///
/// ```
/// use fa_grab::url::matches_wildcard;
///
/// assert!(matches_wildcard("example.net", "example.net"));
/// assert!(!matches_wildcard("example.net", "www.example.net"));
///
/// assert!(matches_wildcard("*.facdn.net", "facdn.net"));
/// assert!(matches_wildcard("*.facdn.net", "d.facdn.net"));
/// assert!(!matches_wildcard("*.facdn.net", "notfacdn.net"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(base) => {
            candidate == base
                || candidate
                    .strip_suffix(base)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        }
        None => candidate == pattern,
    }
}

/// Returns true if the host matches any pattern in the list
pub fn matches_any(patterns: &[String], candidate: &str) -> bool {
    patterns.iter().any(|p| matches_wildcard(p, candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(matches_wildcard("www.furaffinity.net", "www.furaffinity.net"));
        assert!(!matches_wildcard("furaffinity.net", "www.furaffinity.net"));
    }

    #[test]
    fn test_wildcard_matches_bare_and_nested() {
        assert!(matches_wildcard("*.facdn.net", "facdn.net"));
        assert!(matches_wildcard("*.facdn.net", "d.facdn.net"));
        assert!(matches_wildcard("*.facdn.net", "t.d.facdn.net"));
    }

    #[test]
    fn test_wildcard_no_partial_label_match() {
        assert!(!matches_wildcard("*.facdn.net", "evilfacdn.net"));
        assert!(!matches_wildcard("*.facdn.net", "facdn.net.example.org"));
        assert!(!matches_wildcard("*.facdn.net", ""));
    }

    #[test]
    fn test_matches_any() {
        let patterns = vec!["*.example.net".to_string(), "cdn.example.org".to_string()];
        assert!(matches_any(&patterns, "www.example.net"));
        assert!(matches_any(&patterns, "cdn.example.org"));
        assert!(!matches_any(&patterns, "img.example.org"));
        assert!(!matches_any(&[], "example.net"));
    }
}
