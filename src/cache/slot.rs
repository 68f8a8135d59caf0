//! Cache Slot Module
//!
//! A single named cache entry with sliding and absolute expiration.
//!
//! The slot is synchronized with a `std::sync::Mutex` that is never held across
//! an `.await`. A poisoned lock is recovered rather than surfaced: every
//! critical section leaves the state consistent, and callers never observe a
//! cache-layer failure.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheStats, ExpirationPolicy, SlotEntry};

#[derive(Debug)]
struct SlotState<T> {
    entry: Option<SlotEntry<T>>,
    stats: CacheStats,
}

// == Cache Slot ==
/// Holds at most one value under a fixed key.
#[derive(Debug)]
pub struct CacheSlot<T> {
    key: &'static str,
    policy: ExpirationPolicy,
    state: Mutex<SlotState<T>>,
}

impl<T: Clone> CacheSlot<T> {
    // == Constructor ==
    pub fn new(key: &'static str, policy: ExpirationPolicy) -> Self {
        Self {
            key,
            policy,
            state: Mutex::new(SlotState {
                entry: None,
                stats: CacheStats::new(),
            }),
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn policy(&self) -> ExpirationPolicy {
        self.policy
    }

    fn lock(&self) -> MutexGuard<'_, SlotState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Get ==
    /// Returns the cached value if present and not expired.
    ///
    /// A hit refreshes the sliding deadline. An expired value is cleared and
    /// counted as a miss.
    pub fn get(&self) -> Option<T> {
        let now = Instant::now();
        let mut state = self.lock();

        let expired = match state.entry.as_ref() {
            None => {
                state.stats.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired_at(&self.policy, now),
        };

        if expired {
            state.entry = None;
            state.stats.record_expiration();
            state.stats.record_miss();
            debug!(key = self.key, "cache slot expired on read");
            return None;
        }

        state.stats.record_hit();
        state.entry.as_mut().map(|entry| {
            entry.touch(now);
            entry.value.clone()
        })
    }

    // == Set ==
    /// Stores `value`, overwriting any prior value and restarting both
    /// expiration clocks.
    pub fn set(&self, value: T) {
        let mut state = self.lock();
        state.entry = Some(SlotEntry::new(value, Instant::now()));
        state.stats.record_population();
    }

    // == Evict ==
    /// Removes the value unconditionally. Evicting an empty slot is a no-op.
    ///
    /// Returns true if a value was removed.
    pub fn evict(&self) -> bool {
        let mut state = self.lock();
        let removed = state.entry.take().is_some();
        if removed {
            state.stats.record_invalidation();
        }
        removed
    }

    // == Peek ==
    /// Reports whether a live value is stored, without counting a read or
    /// refreshing the sliding deadline.
    pub fn peek(&self) -> bool {
        let now = Instant::now();
        self.lock()
            .entry
            .as_ref()
            .is_some_and(|entry| !entry.is_expired_at(&self.policy, now))
    }

    // == Purge Expired ==
    /// Clears the value if a deadline has passed.
    ///
    /// Returns true if a value was removed.
    pub fn purge_expired(&self) -> bool {
        let now = Instant::now();
        let mut state = self.lock();
        let expired = state
            .entry
            .as_ref()
            .is_some_and(|entry| entry.is_expired_at(&self.policy, now));
        if expired {
            state.entry = None;
            state.stats.record_expiration();
        }
        expired
    }

    // == Stats ==
    /// Returns a snapshot of the slot counters.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats.clone()
    }
}
