//! Output module for discovered identities
//!
//! This module handles:
//! - Appending discovered and disabled usernames to per-item log files
//! - Building the deduplicated username report from those logs
//! - Uploading the report to the discovery tracker

mod report;
mod tracker;
mod username_log;

pub use report::UsernameReport;
pub use tracker::{build_http_client, discovery_endpoint, upload_username_report};
pub use username_log::{UsernameLog, DISABLED_LOG, DISCOVERED_LOG};
