use std::time::{Duration, Instant};

pub const LOG_THROTTLE: Duration = Duration::from_secs(2);

/// Rate-limits a repeated warning to once per [`LOG_THROTTLE`].
pub fn should_log(last: &mut Instant) -> bool {
    let now = Instant::now();
    if now.duration_since(*last) >= LOG_THROTTLE {
        *last = now;
        true
    } else {
        false
    }
}

/// A timestamp that lets the first throttled warning through immediately.
pub fn throttle_start() -> Instant {
    Instant::now()
        .checked_sub(LOG_THROTTLE)
        .unwrap_or_else(Instant::now)
}
