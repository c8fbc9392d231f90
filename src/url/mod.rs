//! URL handling module for fa-grab
//!
//! This module classifies hosts into primary site, media mirror, analytics and
//! third party, infers listing positions from URL paths, and builds the seed URLs
//! of a crawl item.

mod listing;
mod matcher;
mod seeds;

use crate::config::SiteConfig;
use url::Url;

// Re-export main types
pub use listing::{CandidateUrl, ListingType};
pub use matcher::{matches_any, matches_wildcard};
pub use seeds::CrawlItem;

/// Host classification types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostClass {
    /// The site being archived
    Primary,
    /// Same-origin media mirror serving the site's uploads
    Mirror,
    /// Analytics vendor endpoint, never worth fetching
    Analytics,
    /// Anything else linked from the site
    ThirdParty,
}

impl HostClass {
    /// Returns true if failures against this host are fatal to the crawl item
    ///
    /// Repeated failures against the site or its mirror usually mean a ban or a
    /// broken session; failures elsewhere are only skipped.
    pub fn is_target(&self) -> bool {
        matches!(self, Self::Primary | Self::Mirror)
    }
}

/// Classifies a URL's host according to the site configuration
///
/// This function checks the URL in the following priority order:
/// 1. Analytics patterns (substring of the full URL)
/// 2. Primary domains
/// 3. Mirror domains
/// 4. Third party (default)
///
/// # Examples
///
/// ```
/// use fa_grab::config::SiteConfig;
/// use fa_grab::url::{classify_host, HostClass};
/// use url::Url;
///
/// let site = SiteConfig::default();
/// let url = Url::parse("https://d.facdn.net/art/bob/1.png").unwrap();
/// assert_eq!(classify_host(&url, &site), HostClass::Mirror);
/// ```
pub fn classify_host(url: &Url, site: &SiteConfig) -> HostClass {
    if site
        .analytics_patterns
        .iter()
        .any(|pattern| url.as_str().contains(pattern.as_str()))
    {
        return HostClass::Analytics;
    }

    let Some(host) = url.host_str() else {
        return HostClass::ThirdParty;
    };

    if matches_any(&site.primary_domains, host) {
        HostClass::Primary
    } else if matches_any(&site.mirror_domains, host) {
        HostClass::Mirror
    } else {
        HostClass::ThirdParty
    }
}

/// Classifies a bare hostname, as reported by the engine for wait decisions
pub fn classify_hostname(host: &str, site: &SiteConfig) -> HostClass {
    let host = host.to_ascii_lowercase();
    if matches_any(&site.primary_domains, &host) {
        HostClass::Primary
    } else if matches_any(&site.mirror_domains, &host) {
        HostClass::Mirror
    } else {
        HostClass::ThirdParty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(raw: &str) -> HostClass {
        classify_host(&Url::parse(raw).unwrap(), &SiteConfig::default())
    }

    #[test]
    fn test_classify_primary() {
        assert_eq!(classify("https://www.furaffinity.net/view/1/"), HostClass::Primary);
        assert_eq!(classify("https://furaffinity.net/"), HostClass::Primary);
    }

    #[test]
    fn test_classify_mirror() {
        assert_eq!(classify("https://d.facdn.net/art/x.png"), HostClass::Mirror);
        assert_eq!(classify("https://t.facdn.net/1@200-1.jpg"), HostClass::Mirror);
    }

    #[test]
    fn test_classify_analytics() {
        assert_eq!(
            classify("https://www.google-analytics.com/ga.js"),
            HostClass::Analytics
        );
        assert_eq!(
            classify("https://www.google.com/analytics/collect"),
            HostClass::Analytics
        );
        assert_eq!(
            classify("https://ssl.gstatic.com/analytics/x.js"),
            HostClass::Analytics
        );
        // google.com outside the analytics path is plain third party
        assert_eq!(classify("https://www.google.com/search"), HostClass::ThirdParty);
    }

    #[test]
    fn test_classify_third_party() {
        assert_eq!(classify("https://twitter.com/someone"), HostClass::ThirdParty);
        assert_eq!(classify("https://furaffinity.net.evil.org/"), HostClass::ThirdParty);
    }

    #[test]
    fn test_classify_hostname() {
        let site = SiteConfig::default();
        assert_eq!(classify_hostname("D.FACDN.NET", &site), HostClass::Mirror);
        assert_eq!(classify_hostname("www.furaffinity.net", &site), HostClass::Primary);
        assert_eq!(classify_hostname("example.com", &site), HostClass::ThirdParty);
    }

    #[test]
    fn test_is_target() {
        assert!(HostClass::Primary.is_target());
        assert!(HostClass::Mirror.is_target());
        assert!(!HostClass::Analytics.is_target());
        assert!(!HostClass::ThirdParty.is_target());
    }
}
