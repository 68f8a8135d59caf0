//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache Cleanup: Drops the cached list once its expiration deadline passes

mod cleanup;

pub use cleanup::spawn_cache_cleanup_task;
