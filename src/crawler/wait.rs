use crate::url::HostClass;
use std::time::Duration;

/// Chooses the delay before the engine's next request
///
/// Mirror fetches are not rate limited, except when retrying after an error.
pub fn next_delay(proposed: Duration, host_class: HostClass, is_error_retry: bool) -> Duration {
    if host_class == HostClass::Mirror && !is_error_retry {
        Duration::ZERO
    } else {
        proposed
    }
}
