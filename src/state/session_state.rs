use crate::url::ListingType;
use std::collections::HashMap;

/// Mutable state of one crawl run
///
/// One instance exists per crawl item and is handed to every hook; nothing in
/// this crate keeps crawl state anywhere else. Concurrent items therefore never
/// share counters or boundaries.
#[derive(Debug, Clone, Default)]
pub struct CrawlSessionState {
    /// Failures since the last response that counted as success
    pub consecutive_failures: u32,

    /// Responses and transport errors seen this run; never reset
    pub total_attempts: u32,

    /// First page observed empty, per listing type
    max_page: HashMap<ListingType, u32>,

    /// Set by the session bootstrap; the hooks only read it
    pub logged_in: bool,
}

impl CrawlSessionState {
    /// Creates a fresh state for a new crawl run
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more attempt and returns the new total
    pub fn record_attempt(&mut self) -> u32 {
        self.total_attempts += 1;
        self.total_attempts
    }

    /// Records a failure and returns the consecutive-failure count
    pub fn record_failure(&mut self) -> u32 {
        self.consecutive_failures += 1;
        self.consecutive_failures
    }

    /// Clears the consecutive-failure count after a usable response
    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
    }

    /// Returns the known pagination boundary for a listing type
    pub fn boundary(&self, listing: ListingType) -> Option<u32> {
        self.max_page.get(&listing).copied()
    }

    /// Records a pagination boundary if none is known yet
    ///
    /// Returns true if this call set the boundary. The first observation wins,
    /// even when it is not the lowest empty page: with several pages of the
    /// same listing in flight, whichever empty page is parsed first becomes the
    /// boundary.
    pub fn set_boundary_once(&mut self, listing: ListingType, page: u32) -> bool {
        if !listing.is_paginated() || self.max_page.contains_key(&listing) {
            return false;
        }
        self.max_page.insert(listing, page);
        true
    }
}
