//! Book Catalog - A CRUD service with a cached book list
//!
//! Reads of the full list go through a single time-bounded cache slot; every
//! write goes to the store and then invalidates that slot.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::{BookService, CatalogService};
pub use tasks::spawn_cache_cleanup_task;
