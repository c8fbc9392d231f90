//! The callback surface the fetch engine drives
//!
//! # Call protocol
//!
//! - `accept_url` is called zero or more times per discovered URL, before it is queued.
//! - `handle_response` or `handle_error` is called exactly once per fetch attempt.
//! - `get_urls` is called exactly once per successfully fetched document.
//! - `wait_time` is called before each scheduled request.
//!
//! Every hook runs to completion before the engine calls the next one.

use crate::config::Config;
use crate::crawler::classifier::{classify, has_full_view, is_user_disabled, SessionProblem};
use crate::crawler::extractor::{extract_download_link, extract_usernames};
use crate::crawler::filter::admit_url;
use crate::crawler::pagination::observe_listing_page;
use crate::crawler::pause::{Pause, ThreadPause};
use crate::crawler::reaction::{on_response, on_transport_error, Action};
use crate::crawler::wait::next_delay;
use crate::output::UsernameLog;
use crate::state::CrawlSessionState;
use crate::url::{classify_hostname, CandidateUrl, HostClass};
use crate::{GrabError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Crawl-control hooks for one crawl item
pub struct GrabHooks {
    config: Config,
    state: CrawlSessionState,
    discovered: UsernameLog,
    disabled: UsernameLog,
    pause: Box<dyn Pause>,
}

impl GrabHooks {
    /// Creates hooks writing their logs into `item_dir`
    pub fn new(config: Config, item_dir: &Path) -> Self {
        Self::with_pause(config, item_dir, Box::new(ThreadPause))
    }

    /// Creates hooks with a custom backoff pause
    pub fn with_pause(config: Config, item_dir: &Path, pause: Box<dyn Pause>) -> Self {
        Self {
            config,
            state: CrawlSessionState::new(),
            discovered: UsernameLog::discovered(item_dir),
            disabled: UsernameLog::disabled(item_dir),
            pause,
        }
    }

    pub fn state(&self) -> &CrawlSessionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CrawlSessionState {
        &mut self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn host_class(&self, url: &str) -> HostClass {
        CandidateUrl::parse(url, &self.config.site)
            .map(|c| c.host_class)
            .unwrap_or(HostClass::ThirdParty)
    }

    /// Decides whether a discovered URL may be queued
    pub fn accept_url(&self, url: &str, referrer: Option<&str>, verdict: bool) -> bool {
        admit_url(url, referrer, verdict, &self.state, &self.config)
    }

    /// Reacts to a received response
    ///
    /// Never returns [`Action::AbortItem`]: giving up on the item is raised as
    /// [`GrabError::GaveUp`] instead.
    pub fn handle_response(&mut self, url: &str, status_code: u16) -> Result<Action> {
        let host_class = self.host_class(url);
        let action = on_response(
            &mut self.state,
            url,
            host_class,
            status_code,
            &self.config.session,
            self.pause.as_ref(),
        )?;
        self.give_up_on_abort(url, action)
    }

    /// Reacts to a transport failure
    ///
    /// Raises [`GrabError::GaveUp`] the same way as [`GrabHooks::handle_response`].
    pub fn handle_error(&mut self, url: &str, error: &str) -> Result<Action> {
        let host_class = self.host_class(url);
        let action =
            on_transport_error(&mut self.state, url, host_class, error, &self.config.session)?;
        self.give_up_on_abort(url, action)
    }

    fn give_up_on_abort(&self, url: &str, action: Action) -> Result<Action> {
        match action {
            Action::AbortItem => Err(GrabError::GaveUp {
                url: url.to_string(),
                failures: self.state.consecutive_failures,
            }),
            action => Ok(action),
        }
    }

    /// Inspects a downloaded document and returns extra URLs to queue
    ///
    /// Only primary-site documents are inspected. A document showing a broken
    /// session is fatal after a backoff pause; a detail page without its full
    /// view is fatal immediately.
    pub fn get_urls(&mut self, filename: &Path, url: &str) -> Result<Vec<String>> {
        let candidate = match CandidateUrl::parse(url, &self.config.site) {
            Ok(candidate) if candidate.host_class == HostClass::Primary => candidate,
            _ => return Ok(Vec::new()),
        };

        let text = read_bounded(filename, self.config.session.max_document_bytes)?;
        let markers = &self.config.markers;
        let classification = classify(&text, markers);

        if let Some(problem) = classification.session_problem {
            let backoff = Duration::from_secs(self.config.session.backoff_seconds);
            return Err(match problem {
                SessionProblem::LoggedOut => {
                    tracing::error!("Problem detected. Not logged in! Sleeping.");
                    self.pause.pause(backoff);
                    GrabError::NotLoggedIn {
                        url: url.to_string(),
                    }
                }
                SessionProblem::AdultContentBlocked => {
                    tracing::error!("Problem detected. Cannot view adult material! Sleeping.");
                    self.pause.pause(backoff);
                    GrabError::AdultContentBlocked {
                        url: url.to_string(),
                    }
                }
            });
        }

        if classification.is_not_found {
            self.record_disabled_profile(&candidate, &text)?;
        } else {
            let written = self.discovered.append(extract_usernames(&text))?;
            tracing::trace!("Logged {} usernames from {}", written, url);

            if let Some(page) = candidate.page {
                observe_listing_page(&mut self.state, candidate.listing, page, &text, markers);
            }

            if candidate.is_primary_section("view") && !has_full_view(&text, markers) {
                tracing::error!("Full view not found at {}", url);
                return Err(GrabError::FullViewMissing {
                    url: url.to_string(),
                });
            }
        }

        tracing::debug!("Looking good so far: {}", url);

        let mut urls = Vec::new();
        if let Some(link) = extract_download_link(&text) {
            match candidate.url.join(link) {
                Ok(resolved) => urls.push(resolved.to_string()),
                Err(e) => tracing::warn!("Skipping bad download link '{}': {}", link, e),
            }
        }
        Ok(urls)
    }

    /// Chooses the delay before the next request to `host`
    pub fn wait_time(&self, proposed: Duration, host: &str, is_error_retry: bool) -> Duration {
        next_delay(
            proposed,
            classify_hostname(host, &self.config.site),
            is_error_retry,
        )
    }

    fn record_disabled_profile(&self, candidate: &CandidateUrl, text: &str) -> Result<()> {
        if !candidate.is_primary_section("user") || !is_user_disabled(text, &self.config.markers)
        {
            return Ok(());
        }

        let name = candidate
            .url
            .path_segments()
            .and_then(|mut segments| segments.nth(1))
            .filter(|name| !name.is_empty());

        if let Some(name) = name {
            tracing::info!("User {} has disabled their page", name);
            self.disabled.append([name])?;
        }
        Ok(())
    }
}

/// Reads at most `limit` bytes of a document as text
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn read_bounded(path: &Path, limit: usize) -> Result<String> {
    let mut buffer = Vec::new();
    File::open(path)?
        .take(limit as u64)
        .read_to_end(&mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
