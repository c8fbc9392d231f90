//! Integration tests for fa-grab
//!
//! These drive the hooks the way the fetch engine does and use wiremock to
//! stand in for the discovery tracker.

mod hook_session_tests;
mod tracker_tests;
