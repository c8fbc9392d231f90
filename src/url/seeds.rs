//! Crawl items and the seed URLs they start from

use crate::{GrabError, Result};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Profile sections fetched for a profile item, in crawl order
const PROFILE_SECTIONS: [&str; 6] = [
    "user",
    "commissions",
    "journals",
    "gallery",
    "scraps",
    "favorites",
];

/// One unit of work handed out by the job tracker
///
/// Item names look like `profile:<name>`, `journal:<start>-<end>` or
/// `submission:<start>-<end>`; ranges are inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlItem {
    Profile(String),
    Journals { start: u64, end: u64 },
    Submissions { start: u64, end: u64 },
}

impl CrawlItem {
    /// Parses an item name
    pub fn parse(name: &str) -> Result<Self> {
        let invalid = || GrabError::InvalidItem(name.to_string());
        let (kind, value) = name.split_once(':').ok_or_else(invalid)?;

        match kind {
            "profile" => {
                if value.is_empty() || value.contains(',') || value.contains('/') {
                    return Err(invalid());
                }
                Ok(Self::Profile(value.to_string()))
            }
            "journal" => {
                let (start, end) = parse_range(value).ok_or_else(invalid)?;
                Ok(Self::Journals { start, end })
            }
            "submission" => {
                let (start, end) = parse_range(value).ok_or_else(invalid)?;
                Ok(Self::Submissions { start, end })
            }
            _ => Err(invalid()),
        }
    }

    /// Builds the URLs the engine is started with for this item
    ///
    /// # Examples
    ///
    /// ```
    /// use fa_grab::url::CrawlItem;
    /// use url::Url;
    ///
    /// let base = Url::parse("https://www.example.net/").unwrap();
    /// let item = CrawlItem::parse("submission:7-8").unwrap();
    /// let seeds: Vec<String> = item.seed_urls(&base).unwrap()
    ///     .iter().map(|u| u.to_string()).collect();
    /// assert_eq!(seeds, vec![
    ///     "https://www.example.net/view/7/",
    ///     "https://www.example.net/full/7/",
    ///     "https://www.example.net/view/8/",
    ///     "https://www.example.net/full/8/",
    /// ]);
    /// ```
    pub fn seed_urls(&self, base: &Url) -> Result<Vec<Url>> {
        let mut seeds = Vec::new();

        match self {
            Self::Profile(username) => {
                for section in PROFILE_SECTIONS {
                    seeds.push(base.join(&format!("{}/{}/", section, username))?);
                }
            }
            Self::Journals { start, end } => {
                for num in *start..=*end {
                    seeds.push(base.join(&format!("journal/{}/", num))?);
                }
            }
            Self::Submissions { start, end } => {
                for num in *start..=*end {
                    seeds.push(base.join(&format!("view/{}/", num))?);
                    seeds.push(base.join(&format!("full/{}/", num))?);
                }
            }
        }

        Ok(seeds)
    }
}

impl FromStr for CrawlItem {
    type Err = GrabError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CrawlItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Profile(name) => write!(f, "profile:{}", name),
            Self::Journals { start, end } => write!(f, "journal:{}-{}", start, end),
            Self::Submissions { start, end } => write!(f, "submission:{}-{}", start, end),
        }
    }
}

fn parse_range(value: &str) -> Option<(u64, u64)> {
    let (start, end) = value.split_once('-')?;
    let start: u64 = start.trim().parse().ok()?;
    let end: u64 = end.trim().parse().ok()?;
    (start <= end).then_some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.furaffinity.net/").unwrap()
    }

    #[test]
    fn test_parse_items() {
        assert_eq!(
            CrawlItem::parse("profile:bob").unwrap(),
            CrawlItem::Profile("bob".to_string())
        );
        assert_eq!(
            CrawlItem::parse("journal:10-12").unwrap(),
            CrawlItem::Journals { start: 10, end: 12 }
        );
        assert_eq!(
            "submission:5-5".parse::<CrawlItem>().unwrap(),
            CrawlItem::Submissions { start: 5, end: 5 }
        );
    }

    #[test]
    fn test_parse_rejects_bad_items() {
        for bad in [
            "bob",
            "profile:",
            "profile:alice,bob",
            "journal:12-10",
            "journal:abc",
            "submission:1-x",
            "gallery:bob",
        ] {
            assert!(
                matches!(CrawlItem::parse(bad), Err(GrabError::InvalidItem(_))),
                "accepted {}",
                bad
            );
        }
    }

    #[test]
    fn test_profile_seeds() {
        let seeds = CrawlItem::parse("profile:bob")
            .unwrap()
            .seed_urls(&base())
            .unwrap();
        let seeds: Vec<&str> = seeds.iter().map(|u| u.as_str()).collect();

        assert_eq!(
            seeds,
            vec![
                "https://www.furaffinity.net/user/bob/",
                "https://www.furaffinity.net/commissions/bob/",
                "https://www.furaffinity.net/journals/bob/",
                "https://www.furaffinity.net/gallery/bob/",
                "https://www.furaffinity.net/scraps/bob/",
                "https://www.furaffinity.net/favorites/bob/",
            ]
        );
    }

    #[test]
    fn test_journal_seeds_are_inclusive() {
        let seeds = CrawlItem::Journals { start: 3, end: 5 }
            .seed_urls(&base())
            .unwrap();
        assert_eq!(seeds.len(), 3);
        assert_eq!(seeds[2].as_str(), "https://www.furaffinity.net/journal/5/");
    }

    #[test]
    fn test_display_round_trips_name() {
        assert_eq!(CrawlItem::parse("journal:1-2").unwrap().to_string(), "journal:1-2");
        assert_eq!(CrawlItem::parse("profile:x").unwrap().to_string(), "profile:x");
    }
}
