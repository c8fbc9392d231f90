//! State module for tracking one crawl run
//!
//! `CrawlSessionState` holds the failure counters and pagination boundaries
//! that every hook reads and updates. It lives for exactly one crawl item and
//! is never persisted.

mod session_state;

pub use session_state::CrawlSessionState;
