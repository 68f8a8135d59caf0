//! In-memory entity store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::{Entity, EntityId};
use crate::store::EntityStore;

// == Memory Store ==
/// Process-local entity list guarded by an async `RwLock`.
///
/// Id policy: a new entity gets `max(existing ids) + 1`, or 1 when empty. An id
/// freed by deleting the current maximum is handed out again.
#[derive(Debug)]
pub struct MemoryStore<E> {
    entities: RwLock<Vec<E>>,
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// Creates a store holding `entities`, kept ordered by id.
    pub fn seeded(mut entities: Vec<E>) -> Self {
        entities.sort_by_key(|e| e.id());
        Self {
            entities: RwLock::new(entities),
        }
    }

    pub async fn len(&self) -> usize {
        self.entities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entities.read().await.is_empty()
    }
}

impl<E: Entity> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for MemoryStore<E> {
    async fn get_all(&self) -> Result<Vec<E>, StoreError> {
        Ok(self.entities.read().await.clone())
    }

    async fn get(&self, id: EntityId) -> Result<Option<E>, StoreError> {
        let entities = self.entities.read().await;
        Ok(entities.iter().find(|e| e.id() == id).cloned())
    }

    async fn insert(&self, draft: E::Draft) -> Result<E, StoreError> {
        let mut entities = self.entities.write().await;
        let id = entities
            .iter()
            .map(|e| e.id())
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted)?;
        let entity = E::from_draft(id, draft);
        // max + 1 keeps the list sorted by appending
        entities.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<Option<E>, StoreError> {
        let mut entities = self.entities.write().await;
        match entities.iter_mut().find(|e| e.id() == entity.id()) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(Some(entity))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: EntityId) -> Result<bool, StoreError> {
        let mut entities = self.entities.write().await;
        let before = entities.len();
        entities.retain(|e| e.id() != id);
        Ok(entities.len() != before)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
