//! Input throttling.
//!
//! An [`InputThrottle`] accepts an event only when strictly more than its
//! interval has passed since the last accepted event. The caller owns the
//! throttle, so independent inputs can be throttled independently.

use chrono::{DateTime, Duration, Utc};

use crate::config::ThrottleConfig;
use crate::constants::DEFAULT_THROTTLE_INTERVAL_MS;

#[derive(Debug, Clone)]
pub struct InputThrottle {
    last_accepted: DateTime<Utc>,
    interval: Duration,
}

impl Default for InputThrottle {
    fn default() -> Self {
        Self::new()
    }
}

impl InputThrottle {
    /// A throttle with the default 200 ms interval, starting now.
    pub fn new() -> Self {
        Self::with_interval_ms(DEFAULT_THROTTLE_INTERVAL_MS)
    }

    /// A throttle using the configured interval, starting now.
    pub fn from_config(config: &ThrottleConfig) -> Self {
        Self::with_interval_ms(config.interval_ms)
    }

    pub fn with_interval_ms(interval_ms: u64) -> Self {
        Self::starting_at(Utc::now(), interval_ms)
    }

    /// A throttle whose last accepted event is `start`.
    pub fn starting_at(start: DateTime<Utc>, interval_ms: u64) -> Self {
        Self {
            last_accepted: start,
            interval: Duration::milliseconds(interval_ms.min(u32::MAX as u64) as i64),
        }
    }

    /// Accept or reject an event at `time`. Accepting records `time`.
    pub fn allow(&mut self, time: DateTime<Utc>) -> bool {
        if time - self.last_accepted > self.interval {
            self.last_accepted = time;
            true
        } else {
            false
        }
    }

    /// [`allow`](Self::allow) with the current time.
    pub fn allow_now(&mut self) -> bool {
        self.allow(Utc::now())
    }

    pub fn last_accepted(&self) -> DateTime<Utc> {
        self.last_accepted
    }

    pub fn interval_ms(&self) -> i64 {
        self.interval.num_milliseconds()
    }
}
