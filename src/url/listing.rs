//! Listing-type and page-number inference for candidate URLs

use crate::config::SiteConfig;
use crate::url::{classify_host, HostClass};
use crate::{UrlError, UrlResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use url::Url;

static LISTING_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/(\w+)/([^/]+)/(\d+)/").expect("listing path pattern"));

/// A paginated collection of items belonging to a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingType {
    Gallery,
    Scraps,
    Favorites,
    /// Any page that is not one of the paginated listings
    Unlisted,
}

impl ListingType {
    /// The three listing types that carry pagination boundaries
    pub const PAGINATED: [ListingType; 3] = [Self::Gallery, Self::Scraps, Self::Favorites];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gallery => "gallery",
            Self::Scraps => "scraps",
            Self::Favorites => "favorites",
            Self::Unlisted => "none",
        }
    }

    pub fn is_paginated(&self) -> bool {
        !matches!(self, Self::Unlisted)
    }
}

impl FromStr for ListingType {
    type Err = UrlError;

    /// Parses a paginated listing name, case-insensitively
    fn from_str(s: &str) -> UrlResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gallery" => Ok(Self::Gallery),
            "scraps" => Ok(Self::Scraps),
            "favorites" => Ok(Self::Favorites),
            _ => Err(UrlError::UnknownListingType(s.to_string())),
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A URL the engine has seen, with everything the hooks infer from it
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateUrl {
    pub url: Url,
    pub listing: ListingType,
    /// Page number, only for paginated listings
    pub page: Option<u32>,
    pub host_class: HostClass,
}

impl CandidateUrl {
    /// Parses a URL string and infers its listing position and host class
    ///
    /// Only primary-site URLs shaped like `/{type}/{name}/{page}/` are treated
    /// as listing pages.
    ///
    /// # Examples
    ///
    /// ```
    /// use fa_grab::config::SiteConfig;
    /// use fa_grab::url::{CandidateUrl, HostClass, ListingType};
    ///
    /// let site = SiteConfig::default();
    /// let c = CandidateUrl::parse("https://www.furaffinity.net/gallery/bob/3/", &site).unwrap();
    /// assert_eq!(c.listing, ListingType::Gallery);
    /// assert_eq!(c.page, Some(3));
    /// assert_eq!(c.host_class, HostClass::Primary);
    /// ```
    pub fn parse(raw: &str, site: &SiteConfig) -> UrlResult<Self> {
        let url = Url::parse(raw).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;
        if url.host_str().is_none() {
            return Err(UrlError::MissingHost(raw.to_string()));
        }

        let host_class = classify_host(&url, site);
        let (listing, page) = if host_class == HostClass::Primary {
            listing_position(url.path())
        } else {
            (ListingType::Unlisted, None)
        };

        Ok(Self {
            url,
            listing,
            page,
            host_class,
        })
    }

    /// True when the URL's path starts with `/{section}/` on the primary site
    pub fn is_primary_section(&self, section: &str) -> bool {
        self.host_class == HostClass::Primary && path_in_section(self.url.path(), section)
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

/// Infers the listing type and page number from a URL path
///
/// A page number too large for `u32` saturates, so it still lies past any
/// boundary.
fn listing_position(path: &str) -> (ListingType, Option<u32>) {
    let Some(caps) = LISTING_PATH.captures(path) else {
        return (ListingType::Unlisted, None);
    };

    match caps[1].parse::<ListingType>() {
        Ok(listing) => (listing, Some(caps[3].parse::<u32>().unwrap_or(u32::MAX))),
        Err(_) => (ListingType::Unlisted, None),
    }
}

fn path_in_section(path: &str, section: &str) -> bool {
    path.strip_prefix('/')
        .and_then(|rest| rest.strip_prefix(section))
        .is_some_and(|rest| rest.starts_with('/'))
}
