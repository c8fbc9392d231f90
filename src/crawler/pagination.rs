//! Pagination boundary tracking

use crate::config::MarkerConfig;
use crate::crawler::classifier::has_no_more_items;
use crate::state::CrawlSessionState;
use crate::url::ListingType;

/// Records a listing's boundary when a page reports no more items
///
/// Only the first empty page seen for a listing type is kept; later empty
/// pages, lower or higher, are ignored. Returns true if a boundary was set.
///
/// # Examples
///
/// ```
/// use fa_grab::config::MarkerConfig;
/// use fa_grab::crawler::observe_listing_page;
/// use fa_grab::state::CrawlSessionState;
/// use fa_grab::url::ListingType;
///
/// let mut state = CrawlSessionState::new();
/// let text = "There are no submissions to list";
/// assert!(observe_listing_page(&mut state, ListingType::Gallery, 3, text, &MarkerConfig::default()));
/// assert_eq!(state.boundary(ListingType::Gallery), Some(3));
/// ```
pub fn observe_listing_page(
    state: &mut CrawlSessionState,
    listing: ListingType,
    page: u32,
    text: &str,
    markers: &MarkerConfig,
) -> bool {
    if !listing.is_paginated() || !has_no_more_items(text, markers) {
        return false;
    }

    let recorded = state.set_boundary_once(listing, page);
    if recorded {
        tracing::info!("Pagination complete for {} at page {}", listing, page);
    } else {
        tracing::debug!(
            "Ignoring empty {} page {}; boundary already {:?}",
            listing,
            page,
            state.boundary(listing)
        );
    }
    recorded
}
