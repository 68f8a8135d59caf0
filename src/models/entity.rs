//! Entity abstraction shared by stores and the catalog service.

/// Store-assigned identifier of an entity.
pub type EntityId = i32;

/// A single-type CRUD resource that can be cached and stored.
///
/// `Draft` is the entity without its identifier: what callers supply on
/// create and update. The identifier is owned by the store.
pub trait Entity: Clone + Send + Sync + 'static {
    type Draft: Clone + Send + Sync + 'static;

    fn id(&self) -> EntityId;

    /// Builds a new entity from a draft and a freshly assigned id.
    fn from_draft(id: EntityId, draft: Self::Draft) -> Self;

    /// Returns a copy with every mutable field replaced by `draft`.
    ///
    /// The identifier is always preserved.
    fn updated(&self, draft: Self::Draft) -> Self {
        Self::from_draft(self.id(), draft)
    }
}
