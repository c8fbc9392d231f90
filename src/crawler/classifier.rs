//! Content classification of fetched documents
//!
//! Classification is a table lookup: each verdict is driven by "does the text
//! contain any of these literal phrases". The phrase tables live in
//! [`MarkerConfig`] so new markers need no code change.

use crate::config::MarkerConfig;

/// Why a page shows the session cannot see everything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionProblem {
    LoggedOut,
    AdultContentBlocked,
}

/// Verdict for one document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub is_not_found: bool,
    pub session_problem: Option<SessionProblem>,
}

fn contains_any(text: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|phrase| text.contains(phrase.as_str()))
}

/// Returns true if the page is one of the site's "not found" pages
pub fn is_not_found(text: &str, markers: &MarkerConfig) -> bool {
    contains_any(text, &markers.not_found)
}

/// Returns true if a listing page says it has nothing more to show
pub fn has_no_more_items(text: &str, markers: &MarkerConfig) -> bool {
    contains_any(text, &markers.no_more_items)
}

/// Returns true if the profile owner has disabled their page
pub fn is_user_disabled(text: &str, markers: &MarkerConfig) -> bool {
    contains_any(text, &markers.user_disabled)
}

/// Returns true if a detail page was served at full size
///
/// Flash submissions have no full view; they pass when every flash marker is
/// present.
pub fn has_full_view(text: &str, markers: &MarkerConfig) -> bool {
    let is_flash = markers
        .flash_view
        .iter()
        .all(|phrase| text.contains(phrase.as_str()));

    is_flash || contains_any(text, &markers.full_view)
}

/// Classifies a document
///
/// A page rendered for a full-access session (it carries an authenticated
/// marker) and that is not a not-found page must show the logged-in marker and
/// then the adult-content marker. Logged-out is checked first; at most one
/// problem is reported.
///
/// # Examples
///
/// ```
/// use fa_grab::config::MarkerConfig;
/// use fa_grab::crawler::{classify, SessionProblem};
///
/// let markers = MarkerConfig::default();
/// let page = "<a>Commission Info</a>";
/// assert_eq!(classify(page, &markers).session_problem, Some(SessionProblem::LoggedOut));
/// ```
pub fn classify(text: &str, markers: &MarkerConfig) -> Classification {
    let is_not_found = is_not_found(text, markers);
    let needs_session = contains_any(text, &markers.authenticated) && !is_not_found;

    let session_problem = if needs_session && !contains_any(text, &markers.logged_in) {
        Some(SessionProblem::LoggedOut)
    } else if needs_session && !contains_any(text, &markers.adult_enabled) {
        Some(SessionProblem::AdultContentBlocked)
    } else {
        None
    };

    Classification {
        is_not_found,
        session_problem,
    }
}
