//! Crawler module: the crawl-control decisions
//!
//! This module contains everything the fetch engine asks about, including:
//! - URL admission before a URL is queued
//! - Reaction to responses and transport errors, with retry ceilings
//! - Classification of fetched documents and pagination boundaries
//! - Username and download-link extraction
//! - Inter-request delay
//!
//! The engine itself is not part of this crate; it talks to [`GrabHooks`]
//! directly or through the JSON-lines [`serve`] loop.

mod classifier;
mod extractor;
mod filter;
mod hooks;
mod pagination;
mod pause;
mod protocol;
mod reaction;
mod wait;

pub use classifier::{
    classify, has_full_view, has_no_more_items, is_not_found, is_user_disabled, Classification,
    SessionProblem,
};
pub use extractor::{extract_download_link, extract_usernames};
pub use filter::{admit_url, rejection, RejectReason};
pub use hooks::{read_bounded, GrabHooks};
pub use pagination::observe_listing_page;
pub use pause::{Pause, ThreadPause};
pub use protocol::{dispatch, serve, HookReply, HookRequest};
pub use reaction::{on_response, on_transport_error, Action, FetchOutcome};
pub use wait::next_delay;
