//! Username and follow-up link extraction from fetched documents
//!
//! The site's markup is stable enough that literal patterns beat a DOM parse:
//! profile links are always `href="/user/<name>/"` and the media link on a
//! detail page is always an anchor whose text is exactly `Download`.

use once_cell::sync::Lazy;
use regex::Regex;

static USER_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href="/user/([^"]+)""#).expect("user link pattern"));

static DOWNLOAD_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<a href="([^"]+)">Download</a>"#).expect("download link pattern"));

/// Yields every username linked from the document, in order of appearance
///
/// Duplicates are kept; deduplication belongs to whoever reads the log.
///
/// # Examples
///
/// ```
/// use fa_grab::crawler::extract_usernames;
///
/// let text = r#"<a href="/user/bob/">bob</a> <a href="/user/Alice99">A</a>"#;
/// let names: Vec<&str> = extract_usernames(text).collect();
/// assert_eq!(names, vec!["bob", "Alice99"]);
/// ```
pub fn extract_usernames(text: &str) -> impl Iterator<Item = &str> + '_ {
    USER_LINK
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim_matches('/'))
        .filter(|name| !name.is_empty())
}

/// Returns the first `Download` anchor's target, if any
pub fn extract_download_link(text: &str) -> Option<&str> {
    DOWNLOAD_LINK
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
