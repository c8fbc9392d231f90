use serde::Deserialize;

/// Main configuration structure for fa-grab
///
/// Every section is optional; an empty file yields the policy used against
/// the live site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub session: SessionConfig,
    pub policy: PolicyConfig,
    pub markers: MarkerConfig,
    pub tracker: TrackerConfig,
}

/// Host and path knowledge about the target site
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteConfig {
    /// Base URL that seed URLs are built from
    pub base_url: String,

    /// Domain patterns of the primary site (e.g., "*.example.net")
    pub primary_domains: Vec<String>,

    /// Domain patterns of same-origin media mirrors
    pub mirror_domains: Vec<String>,

    /// Substrings identifying analytics vendor URLs
    pub analytics_patterns: Vec<String>,

    /// Substrings identifying theme and static asset paths
    pub junk_path_patterns: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.furaffinity.net/".to_string(),
            primary_domains: vec!["*.furaffinity.net".to_string()],
            mirror_domains: vec!["*.facdn.net".to_string()],
            analytics_patterns: vec![
                "google-analytics.com".to_string(),
                "google.com/analytics".to_string(),
                "gstatic.com/analytics".to_string(),
            ],
            junk_path_patterns: vec!["/themes/classic/".to_string()],
        }
    }
}

/// Limits applied to one crawl run
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SessionConfig {
    /// Responses plus transport errors allowed before the run aborts
    pub max_total_attempts: u32,

    /// Consecutive failures after which the crawl item gives up
    pub max_consecutive_failures: u32,

    /// Pause before retry decisions and fatal session problems (seconds)
    pub backoff_seconds: u64,

    /// Bytes of a fetched document that are ever inspected
    pub max_document_bytes: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_total_attempts: 1000,
            max_consecutive_failures: 5,
            backoff_seconds: 60,
            max_document_bytes: 1024 * 1024,
        }
    }
}

/// Optional URL filter behaviours
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PolicyConfig {
    /// Reject mirror URLs linked from a favorites listing
    pub reject_mirror_from_favorites: bool,

    /// Admit mirror URLs linked from a detail view even if the engine rejected them
    pub force_admit_mirror_from_view: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            reject_mirror_from_favorites: false,
            force_admit_mirror_from_view: true,
        }
    }
}

/// Literal marker phrases that drive document classification
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MarkerConfig {
    /// Any of these means the page is a "not found" page
    pub not_found: Vec<String>,

    /// Any of these means the page should have been rendered for a full-access session
    pub authenticated: Vec<String>,

    /// Any of these proves the session is logged in
    pub logged_in: Vec<String>,

    /// Any of these proves adult content is enabled for the session
    pub adult_enabled: Vec<String>,

    /// Any of these means a listing page has run out of items
    pub no_more_items: Vec<String>,

    /// Any of these proves a detail page was served in full view
    pub full_view: Vec<String>,

    /// All of these together identify a flash submission, exempt from the full-view check
    pub flash_view: Vec<String>,

    /// Any of these means the profile owner disabled their page
    pub user_disabled: Vec<String>,
}

const USER_NOT_FOUND: &str = "This user cannot be found.";
const USER_DISABLED: &str = "This user has voluntarily disabled access to their userpage.";
const JOURNAL_NOT_FOUND: &str = "The journal you are trying to find is not in our database.";
const SUBMISSION_NOT_FOUND: &str =
    "The submission you are trying to find is not in our database.";

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            not_found: vec![
                USER_NOT_FOUND.to_string(),
                USER_DISABLED.to_string(),
                JOURNAL_NOT_FOUND.to_string(),
                SUBMISSION_NOT_FOUND.to_string(),
            ],
            authenticated: vec![
                "Commission Info</a>".to_string(),
                "<b>Submission information:".to_string(),
                USER_NOT_FOUND.to_string(),
                JOURNAL_NOT_FOUND.to_string(),
                SUBMISSION_NOT_FOUND.to_string(),
            ],
            logged_in: vec!["/logout/".to_string()],
            adult_enabled: vec!["Toggle to hide Mature and Adult submissions.".to_string()],
            no_more_items: vec!["There are no submissions to list".to_string()],
            full_view: vec!["var is_full = 1;".to_string()],
            flash_view: vec![
                "<object type=\"application/x-shockwave-flash\"".to_string(),
                "facdn.net/art/".to_string(),
                ".swf\">Download</a>".to_string(),
            ],
            user_disabled: vec![USER_DISABLED.to_string()],
        }
    }
}

/// Where discovered usernames are reported
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TrackerConfig {
    /// Base URL of the discovery tracker; uploads are disabled when unset
    pub url: Option<String>,

    /// Report as discovered from logged-in pages
    pub private_discovery: bool,

    /// Upload attempts before giving up
    pub max_tries: u32,

    /// Pause between failed upload attempts (seconds)
    pub retry_seconds: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            url: None,
            private_discovery: true,
            max_tries: 10,
            retry_seconds: 60,
        }
    }
}
