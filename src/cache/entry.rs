//! Slot Entry Module
//!
//! Defines a cached value together with the timestamps that drive its
//! sliding and absolute expiration.

use std::time::Duration;

use tokio::time::Instant;

use crate::config::Config;

// == Expiration Policy ==
/// Sliding and absolute lifetimes applied to every populated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationPolicy {
    /// Maximum idle time between accesses
    pub sliding: Duration,
    /// Maximum lifetime from population, regardless of activity
    pub absolute: Duration,
}

impl Default for ExpirationPolicy {
    fn default() -> Self {
        Self {
            sliding: Duration::from_secs(5 * 60),
            absolute: Duration::from_secs(20 * 60),
        }
    }
}

impl From<&Config> for ExpirationPolicy {
    fn from(config: &Config) -> Self {
        Self {
            sliding: Duration::from_secs(config.cache_sliding_ttl),
            absolute: Duration::from_secs(config.cache_absolute_ttl),
        }
    }
}

// == Slot Entry ==
/// A cached value with its population and last-access instants.
#[derive(Debug, Clone)]
pub struct SlotEntry<T> {
    /// The stored value
    pub value: T,
    /// When the value was stored
    pub populated_at: Instant,
    /// When the value was last stored or read
    pub last_access: Instant,
}

impl<T> SlotEntry<T> {
    // == Constructor ==
    pub fn new(value: T, now: Instant) -> Self {
        Self {
            value,
            populated_at: now,
            last_access: now,
        }
    }

    // == Expires At ==
    /// Returns the instant at which this entry stops being served.
    ///
    /// That is the earlier of the sliding deadline (last access + sliding) and
    /// the absolute deadline (population + absolute).
    pub fn expires_at(&self, policy: &ExpirationPolicy) -> Instant {
        let sliding = self.last_access + policy.sliding;
        let absolute = self.populated_at + policy.absolute;
        sliding.min(absolute)
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now` reaches the
    /// deadline, so a value is never served at the exact deadline instant.
    pub fn is_expired_at(&self, policy: &ExpirationPolicy, now: Instant) -> bool {
        now >= self.expires_at(policy)
    }

    // == Touch ==
    /// Records an access, pushing the sliding deadline forward.
    pub fn touch(&mut self, now: Instant) {
        self.last_access = now;
    }
}
