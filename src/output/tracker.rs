//! Username report upload to the discovery tracker

use crate::config::TrackerConfig;
use crate::output::report::UsernameReport;
use crate::{ConfigError, GrabError, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Builds the HTTP client used for tracker calls
pub fn build_http_client() -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("fa-grab/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(10))
        .build()
}

/// Returns the tracker endpoint the report is posted to
pub fn discovery_endpoint(tracker: &TrackerConfig) -> Result<String> {
    let base = tracker.url.as_deref().ok_or_else(|| {
        ConfigError::Validation("tracker url is required for uploads".to_string())
    })?;

    let path = if tracker.private_discovery {
        "api/user_private_discovery"
    } else {
        "api/user_discovery"
    };

    Ok(format!("{}/{}", base.trim_end_matches('/'), path))
}

/// Uploads a username report
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 200 | Done |
/// | Other status | Sleep, retry |
/// | Connection error | Sleep, retry |
/// | `max-tries` attempts used | `GrabError::Tracker` |
pub async fn upload_username_report(
    client: &Client,
    tracker: &TrackerConfig,
    report: &UsernameReport,
) -> Result<()> {
    let endpoint = discovery_endpoint(tracker)?;
    let body = report.to_json()?;
    let retry_delay = Duration::from_secs(tracker.retry_seconds);

    for attempt in 1..=tracker.max_tries {
        tracing::info!("Uploading results to {} (attempt {})", endpoint, attempt);

        match client.post(&endpoint).body(body.clone()).send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                tracing::info!(
                    "Uploaded {} usernames",
                    report.discovered_usernames.len()
                );
                return Ok(());
            }
            Ok(response) => {
                tracing::warn!("Tracker answered {}. Sleeping...", response.status());
            }
            Err(e) => {
                tracing::warn!("Tracker connection error: {}. Sleeping...", e);
            }
        }

        if attempt < tracker.max_tries {
            tokio::time::sleep(retry_delay).await;
        }
    }

    Err(GrabError::Tracker {
        url: endpoint,
        attempts: tracker.max_tries,
    })
}
