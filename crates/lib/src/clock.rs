//! Time provider abstraction
//!
//! This module provides a [`Clock`] trait that abstracts over time sources,
//! allowing production code to use real system time while tests can freeze
//! time at a known instant.
//!
//! # Example
//!
//! ```
//! use oauth2_proxy_cookie::{Clock, SystemClock};
//!
//! let clock = SystemClock;
//! let now = clock.now();
//! assert_eq!(clock.now_secs() / 60, now.timestamp() / 60);
//! ```

use std::fmt::Debug;

use chrono::{DateTime, Utc};

#[cfg(any(test, feature = "testing"))]
use chrono::TimeDelta;
#[cfg(any(test, feature = "testing"))]
use std::sync::Mutex;

/// A time provider for the validity window check.
///
/// Implementations are read once per validation, never cached.
pub trait Clock: Send + Sync + Debug {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;

    /// Get current time as seconds since Unix epoch.
    fn now_secs(&self) -> i64 {
        self.now().timestamp()
    }
}

/// Production clock using real system time.
///
/// This is the default clock used by [`Validator`](crate::Validator).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock frozen at a settable instant.
///
/// Unlike [`SystemClock`] the time only moves when [`FixedClock::set`] or
/// [`FixedClock::advance`] is called, so window boundaries can be hit exactly.
///
/// # Example
///
/// ```
/// use chrono::TimeDelta;
/// use oauth2_proxy_cookie::{Clock, FixedClock};
///
/// let clock = FixedClock::from_secs(1483250400);
/// assert_eq!(clock.now_secs(), 1483250400);
/// assert_eq!(clock.now_secs(), 1483250400);
///
/// clock.advance(TimeDelta::minutes(5));
/// assert_eq!(clock.now_secs(), 1483250700);
/// ```
#[cfg(any(test, feature = "testing"))]
pub struct FixedClock {
    instant: Mutex<DateTime<Utc>>,
}

#[cfg(any(test, feature = "testing"))]
impl FixedClock {
    /// Create a clock frozen at the given instant.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: Mutex::new(instant),
        }
    }

    /// Create a clock frozen at the given Unix timestamp (seconds).
    ///
    /// Out-of-range timestamps fall back to the Unix epoch.
    pub fn from_secs(secs: i64) -> Self {
        Self::new(DateTime::from_timestamp(secs, 0).unwrap_or_default())
    }

    /// Move the clock by the given amount (negative values move it back).
    pub fn advance(&self, delta: TimeDelta) {
        let mut instant = self.instant.lock().unwrap();
        *instant += delta;
    }

    /// Set the clock to a specific instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.instant.lock().unwrap() = instant;
    }

    /// Get the current instant.
    pub fn get(&self) -> DateTime<Utc> {
        *self.instant.lock().unwrap()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.get()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for FixedClock {
    fn default() -> Self {
        // 2024-01-01 00:00:00 UTC
        Self::from_secs(1704067200)
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clone for FixedClock {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

#[cfg(any(test, feature = "testing"))]
impl Debug for FixedClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedClock")
            .field("instant", &self.get().to_rfc3339())
            .finish()
    }
}
