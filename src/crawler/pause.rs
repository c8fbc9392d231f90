//! Blocking backoff pauses
//!
//! A pause inside a hook stalls the engine's whole callback dispatch. That
//! stall is the rate limit: nothing else is fetched while the site recovers.

use std::time::Duration;

/// Something that can block the current hook for a while
pub trait Pause {
    fn pause(&self, duration: Duration);
}

/// Sleeps the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPause;

impl Pause for ThreadPause {
    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Records requested pauses instead of sleeping
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingPause {
    pub(crate) pauses: std::cell::RefCell<Vec<Duration>>,
}

#[cfg(test)]
impl Pause for RecordingPause {
    fn pause(&self, duration: Duration) {
        self.pauses.borrow_mut().push(duration);
    }
}
