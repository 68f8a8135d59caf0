//! Cache Module
//!
//! Provides the single-entry, time-bounded cache slot that holds the full
//! entity list in front of the store.

mod entry;
mod slot;
mod stats;

// Re-export public types
pub use entry::{ExpirationPolicy, SlotEntry};
pub use slot::CacheSlot;
pub use stats::CacheStats;

// == Public Constants ==
/// Key under which the full book list is cached
pub const ALL_BOOKS_CACHE_KEY: &str = "AllBooksCacheKey";
