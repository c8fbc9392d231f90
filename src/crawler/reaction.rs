//! Reaction to fetch outcomes: continue, retry, or give up

use crate::config::SessionConfig;
use crate::crawler::pause::Pause;
use crate::state::CrawlSessionState;
use crate::url::HostClass;
use crate::{GrabError, Result};
use serde::Serialize;
use std::time::Duration;

/// What the engine should do after a response or transport error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Carry on with the crawl
    Continue,
    /// Fetch the same URL again
    Retry,
    /// Fatal for the crawl item: the target keeps failing
    AbortItem,
    /// Stop the crawl item cleanly
    FinishEarly,
}

/// Classified outcome of one fetch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Success,
    NotFound,
    HttpError(u16),
    TransportError,
}

impl FetchOutcome {
    /// Classifies an HTTP status code
    pub fn from_status(status_code: u16) -> Self {
        match status_code {
            404 => Self::NotFound,
            s if s >= 400 => Self::HttpError(s),
            _ => Self::Success,
        }
    }
}

/// Counts one attempt against the session ceiling
///
/// The attempt that would exceed the ceiling is refused and not counted.
fn count_attempt(state: &mut CrawlSessionState, session: &SessionConfig) -> Result<()> {
    if state.total_attempts >= session.max_total_attempts {
        tracing::error!(
            "Too many tries in this session ({} allowed)",
            session.max_total_attempts
        );
        return Err(GrabError::AttemptCeilingExceeded {
            limit: session.max_total_attempts,
        });
    }
    state.record_attempt();
    Ok(())
}

/// Decides the action after a failure has been counted
fn after_failure(
    state: &mut CrawlSessionState,
    url: &str,
    host_class: HostClass,
    session: &SessionConfig,
) -> Action {
    let failures = state.record_failure();

    if failures < session.max_consecutive_failures {
        tracing::warn!("Failure {} for {}; retrying", failures, url);
        return Action::Retry;
    }

    if host_class.is_target() {
        tracing::error!("Giving up on {} after {} consecutive failures", url, failures);
        Action::AbortItem
    } else {
        tracing::warn!(
            "Finishing early after {} consecutive failures at {}",
            failures,
            url
        );
        Action::FinishEarly
    }
}

/// Reacts to an HTTP response
///
/// 404 counts as success: not-found pages are expected at the edges of a
/// crawl and are inspected by the classifier. Any other status of 400 or above
/// is a failure; against the site or its mirror it is preceded by a backoff
/// pause.
///
/// # Errors
///
/// `GrabError::AttemptCeilingExceeded` once the session has used up its attempts.
pub fn on_response(
    state: &mut CrawlSessionState,
    url: &str,
    host_class: HostClass,
    status_code: u16,
    session: &SessionConfig,
    pause: &dyn Pause,
) -> Result<Action> {
    count_attempt(state, session)?;

    match FetchOutcome::from_status(status_code) {
        FetchOutcome::HttpError(status) => {
            if host_class.is_target() {
                tracing::warn!("HTTP {} from {}. Sleeping...", status, url);
                pause.pause(Duration::from_secs(session.backoff_seconds));
            }
            Ok(after_failure(state, url, host_class, session))
        }
        _ => {
            state.record_success();
            Ok(Action::Continue)
        }
    }
}

/// Reacts to a transport-level failure (DNS, connect, TLS, timeout)
///
/// Counted like an error response, without the backoff pause.
pub fn on_transport_error(
    state: &mut CrawlSessionState,
    url: &str,
    host_class: HostClass,
    error: &str,
    session: &SessionConfig,
) -> Result<Action> {
    count_attempt(state, session)?;
    tracing::warn!("Transport error for {}: {}", url, error);
    Ok(after_failure(state, url, host_class, session))
}
