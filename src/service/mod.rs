//! Catalog Service Module
//!
//! Read-through, write-invalidated caching of the full entity list over an
//! [`EntityStore`].
//!
//! # Consistency
//! Every successful write evicts the cached list before it returns, so no
//! value from before the write stays in the slot afterwards. Failed writes
//! leave the slot untouched.
//!
//! `list_all` is not atomic with respect to concurrent writers. A reader can
//! miss, read the store, get overtaken by a write (which evicts), and then
//! repopulate the slot with the snapshot taken before that write. The stale
//! value lives until the next write or until it expires (5 min idle / 20 min
//! absolute). Callers that need strict consistency should use `get_by_id` or
//! read the store directly.
//!
//! Point lookups (`get_by_id`) never consult or fill the cache: only the list
//! is cached.


use std::fmt;
use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::cache::{CacheSlot, CacheStats, ExpirationPolicy, ALL_BOOKS_CACHE_KEY};
use crate::error::ServiceError;
use crate::models::{Book, Entity, EntityId};
use crate::store::EntityStore;

/// Exclusive upper bound for instance tags
const INSTANCE_TAG_UPPER: u32 = 100_000;

// == Instance Tag ==
/// Diagnostic identity of a service instance, drawn once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct InstanceTag(u32);

impl InstanceTag {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Draws a tag uniformly from `[1, 100000)`.
    pub fn random() -> Self {
        Self(rand::thread_rng().gen_range(1..INSTANCE_TAG_UPPER))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for InstanceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// == Catalog Service ==
/// CRUD service for one entity type with a cached full list.
pub struct CatalogService<E: Entity> {
    store: Arc<dyn EntityStore<E>>,
    cache: CacheSlot<Vec<E>>,
    instance: InstanceTag,
}

/// The catalog service for books.
pub type BookService = CatalogService<Book>;

impl<E: Entity> CatalogService<E> {
    // == Constructor ==
    pub fn new(store: Arc<dyn EntityStore<E>>, policy: ExpirationPolicy) -> Self {
        Self::with_cache_key(store, ALL_BOOKS_CACHE_KEY, policy)
    }

    pub fn with_cache_key(
        store: Arc<dyn EntityStore<E>>,
        cache_key: &'static str,
        policy: ExpirationPolicy,
    ) -> Self {
        let instance = InstanceTag::random();
        info!(
            store = store.name(),
            cache_key,
            instance = instance.value(),
            "Catalog service created"
        );
        Self {
            store,
            cache: CacheSlot::new(cache_key, policy),
            instance,
        }
    }

    // == List All ==
    /// Returns every entity, from the cache if possible.
    ///
    /// On a miss the full list is read from the store and cached as-is.
    pub async fn list_all(&self) -> Result<Vec<E>, ServiceError> {
        if let Some(entities) = self.cache.get() {
            debug!(key = self.cache.key(), count = entities.len(), "cache hit");
            return Ok(entities);
        }

        debug!(key = self.cache.key(), "cache miss, reading store");
        let entities = self.store.get_all().await?;
        self.cache.set(entities.clone());
        Ok(entities)
    }

    // == Get By Id ==
    /// Reads one entity straight from the store. The cache is not involved.
    pub async fn get_by_id(&self, id: EntityId) -> Result<Option<E>, ServiceError> {
        Ok(self.store.get(id).await?)
    }

    // == Create ==
    /// Inserts a new entity; the store assigns its id.
    pub async fn create(&self, draft: E::Draft) -> Result<E, ServiceError> {
        let entity = self.store.insert(draft).await?;
        self.invalidate();
        info!(id = entity.id(), "entity created");
        Ok(entity)
    }

    // == Update ==
    /// Replaces every mutable field of entity `id`. The id itself never changes.
    pub async fn update(&self, id: EntityId, draft: E::Draft) -> Result<E, ServiceError> {
        let current = self
            .store
            .get(id)
            .await?
            .ok_or(ServiceError::NotFound(id))?;

        let updated = self
            .store
            .update(current.updated(draft))
            .await?
            .ok_or(ServiceError::NotFound(id))?;

        self.invalidate();
        info!(id, "entity updated");
        Ok(updated)
    }

    // == Delete ==
    pub async fn delete(&self, id: EntityId) -> Result<(), ServiceError> {
        if self.store.get(id).await?.is_none() {
            return Err(ServiceError::NotFound(id));
        }
        if !self.store.delete(id).await? {
            return Err(ServiceError::NotFound(id));
        }

        self.invalidate();
        info!(id, "entity deleted");
        Ok(())
    }

    // == Instance Tag ==
    pub fn instance_tag(&self) -> InstanceTag {
        self.instance
    }

    // == Diagnostics ==
    /// Whether the list is cached and unexpired. Does not count as a read.
    pub fn is_cache_populated(&self) -> bool {
        self.cache.peek()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drops the cached list if it has expired. Returns true if it did.
    pub fn purge_expired_cache(&self) -> bool {
        self.cache.purge_expired()
    }

    fn invalidate(&self) {
        if self.cache.evict() {
            debug!(key = self.cache.key(), "cache invalidated");
        }
    }
}
