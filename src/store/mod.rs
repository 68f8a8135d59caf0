//! Entity Store Module
//!
//! Capability interface for durable keyed entity storage, with swappable
//! backends.
//!
//! # Backends
//! - `MemoryStore`: process-local list; ids are `max(existing) + 1`
//! - `PostgresBookStore`: `books` table; ids come from a `SERIAL` sequence

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Entity, EntityId};

pub use memory::MemoryStore;
pub use postgres::PostgresBookStore;

/// Keyed CRUD storage for one entity type.
///
/// Identifier assignment belongs to the backend; each documents its policy.
/// Implementations must be safe to call concurrently.
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Returns every entity, ordered by id.
    async fn get_all(&self) -> Result<Vec<E>, StoreError>;

    async fn get(&self, id: EntityId) -> Result<Option<E>, StoreError>;

    /// Persists a new entity and returns it with its assigned id.
    async fn insert(&self, draft: E::Draft) -> Result<E, StoreError>;

    /// Replaces the stored entity with the same id.
    ///
    /// Returns `None` if no entity with that id exists.
    async fn update(&self, entity: E) -> Result<Option<E>, StoreError>;

    /// Returns true if an entity was removed.
    async fn delete(&self, id: EntityId) -> Result<bool, StoreError>;

    /// Backend name for logging.
    fn name(&self) -> &'static str;
}
