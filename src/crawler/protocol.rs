//! JSON-lines hook protocol spoken with the fetch engine
//!
//! The engine writes one request per line and reads one reply per line:
//!
//! ```text
//! {"hook":"accept_url","url":"...","referrer":"...","verdict":true}   -> {"verdict":true}
//! {"hook":"handle_response","url":"...","status_code":200}            -> {"action":"continue"}
//! {"hook":"handle_error","url":"...","error":"timed out"}             -> {"action":"retry"}
//! {"hook":"get_urls","filename":"...","url":"..."}                    -> {"urls":["..."]}
//! {"hook":"wait_time","seconds":1.0,"url":"...","error":false}        -> {"seconds":0.0}
//! ```
//!
//! A fatal condition is answered with `{"fatal":"<message>"}` and ends the
//! session with an error. Giving up on an item is answered with
//! `{"action":"abort_item"}` and ends the session the same way.

use crate::crawler::hooks::GrabHooks;
use crate::crawler::reaction::Action;
use crate::{GrabError, Result};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// One call from the engine
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "hook", rename_all = "snake_case")]
pub enum HookRequest {
    AcceptUrl {
        url: String,
        #[serde(default)]
        referrer: Option<String>,
        verdict: bool,
    },
    HandleResponse {
        url: String,
        status_code: u16,
    },
    HandleError {
        url: String,
        #[serde(default)]
        error: String,
    },
    GetUrls {
        filename: PathBuf,
        url: String,
    },
    WaitTime {
        seconds: f64,
        url: String,
        #[serde(default)]
        error: bool,
    },
}

/// One answer to the engine
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HookReply {
    Verdict { verdict: bool },
    Action { action: Action },
    Urls { urls: Vec<String> },
    Seconds { seconds: f64 },
    Fatal { fatal: String },
}

/// Dispatches one request to the hooks
pub fn dispatch(hooks: &mut GrabHooks, request: HookRequest) -> Result<HookReply> {
    match request {
        HookRequest::AcceptUrl {
            url,
            referrer,
            verdict,
        } => Ok(HookReply::Verdict {
            verdict: hooks.accept_url(&url, referrer.as_deref(), verdict),
        }),
        HookRequest::HandleResponse { url, status_code } => Ok(HookReply::Action {
            action: hooks.handle_response(&url, status_code)?,
        }),
        HookRequest::HandleError { url, error } => Ok(HookReply::Action {
            action: hooks.handle_error(&url, &error)?,
        }),
        HookRequest::GetUrls { filename, url } => Ok(HookReply::Urls {
            urls: hooks.get_urls(&filename, &url)?,
        }),
        HookRequest::WaitTime {
            seconds,
            url,
            error,
        } => {
            let url = Url::parse(&url)?;
            let host = url.host_str().unwrap_or_default();
            let proposed = Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO);
            Ok(HookReply::Seconds {
                seconds: hooks.wait_time(proposed, host, error).as_secs_f64(),
            })
        }
    }
}

fn write_reply(writer: &mut impl Write, reply: &HookReply) -> Result<()> {
    serde_json::to_writer(&mut *writer, reply)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Serves hook requests until the engine closes its end
///
/// Returns the first fatal error after reporting it to the engine.
pub fn serve(hooks: &mut GrabHooks, reader: impl BufRead, mut writer: impl Write) -> Result<()> {
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let outcome = serde_json::from_str::<HookRequest>(&line)
            .map_err(GrabError::from)
            .and_then(|request| dispatch(hooks, request));

        match outcome {
            Ok(reply) => write_reply(&mut writer, &reply)?,
            Err(e @ GrabError::GaveUp { .. }) => {
                write_reply(
                    &mut writer,
                    &HookReply::Action {
                        action: Action::AbortItem,
                    },
                )?;
                return Err(e);
            }
            Err(e) => {
                tracing::error!("Fatal: {}", e);
                write_reply(
                    &mut writer,
                    &HookReply::Fatal {
                        fatal: e.to_string(),
                    },
                )?;
                return Err(e);
            }
        }
    }

    tracing::info!(
        "Hook session ended after {} attempts",
        hooks.state().total_attempts
    );
    Ok(())
}
