//! URL admission filter, consulted before the engine queues a URL

use crate::config::Config;
use crate::state::CrawlSessionState;
use crate::url::{CandidateUrl, HostClass};
use once_cell::sync::Lazy;
use regex::Regex;

static COMMISSION_ACTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/commissions/.*/(add|manage)/$").expect("commission action pattern"));

/// Why a URL the engine wanted was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    PaginationExhausted,
    Junk,
    Analytics,
    CommissionAction,
    MirrorFromFavorites,
}

/// Decides whether a discovered URL may be fetched
///
/// `verdict` is the engine's own decision. A `true` verdict can only be
/// downgraded; a `false` verdict is only ever upgraded for mirror media linked
/// from a detail view, and only when that policy is enabled.
///
/// URLs that cannot be parsed keep the engine's verdict.
pub fn admit_url(
    raw_url: &str,
    referrer: Option<&str>,
    verdict: bool,
    state: &CrawlSessionState,
    config: &Config,
) -> bool {
    let candidate = match CandidateUrl::parse(raw_url, &config.site) {
        Ok(candidate) => candidate,
        Err(e) => {
            tracing::trace!("Keeping engine verdict for unparseable URL: {}", e);
            return verdict;
        }
    };
    let referrer = referrer.and_then(|r| CandidateUrl::parse(r, &config.site).ok());

    if verdict {
        if let Some(reason) = rejection(&candidate, referrer.as_ref(), state, config) {
            tracing::debug!("Rejecting {} ({:?})", raw_url, reason);
            return false;
        }
        return true;
    }

    let from_view = referrer
        .as_ref()
        .is_some_and(|r| r.is_primary_section("view"));

    if config.policy.force_admit_mirror_from_view
        && candidate.host_class == HostClass::Mirror
        && from_view
    {
        tracing::debug!("Force-admitting mirror media {}", raw_url);
        return true;
    }

    false
}

/// Returns the first rule that rejects an otherwise admitted URL
pub fn rejection(
    candidate: &CandidateUrl,
    referrer: Option<&CandidateUrl>,
    state: &CrawlSessionState,
    config: &Config,
) -> Option<RejectReason> {
    if let (Some(page), Some(boundary)) = (candidate.page, state.boundary(candidate.listing)) {
        if page > boundary {
            return Some(RejectReason::PaginationExhausted);
        }
    }

    let raw = candidate.as_str();

    if config
        .site
        .junk_path_patterns
        .iter()
        .any(|pattern| raw.contains(pattern.as_str()))
    {
        return Some(RejectReason::Junk);
    }

    if candidate.host_class == HostClass::Analytics {
        return Some(RejectReason::Analytics);
    }

    if COMMISSION_ACTION.is_match(raw) {
        return Some(RejectReason::CommissionAction);
    }

    let from_favorites = referrer.is_some_and(|r| r.is_primary_section("favorites"));
    if config.policy.reject_mirror_from_favorites
        && candidate.host_class == HostClass::Mirror
        && from_favorites
    {
        return Some(RejectReason::MirrorFromFavorites);
    }

    None
}
