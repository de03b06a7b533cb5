//! `Stored`: the persistable-entity capability.

use entitykit_core::Entity;

use crate::collab::{Batch, Persistence, PersistenceError};

/// Whether an entity has been durably inserted yet.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PersistenceState {
    /// Constructed in memory, not yet inserted.
    Transient,
    /// Inserted; identity and audit stamps are fixed by the storage layer.
    Persisted,
}

/// Capability: this entity kind can be persisted.
///
/// `Stored` contributes no insert implementation of its own; persistence
/// always goes through a [`Persistence`] collaborator. It carries only the state
/// marker and the batch-insert factory.
pub trait Stored: Entity {
    fn persistence_state(&self) -> PersistenceState;

    /// Flip to `Persisted`. Called by the storage collaborator once the
    /// row is durable; never by application code.
    fn mark_persisted(&mut self);

    fn is_persisted(&self) -> bool {
        matches!(self.persistence_state(), PersistenceState::Persisted)
    }

    /// Insert this entity through a storage collaborator.
    fn insert<P: Persistence<Self>>(&mut self, backend: &P) -> Result<(), PersistenceError> {
        backend.insert(self)
    }

    /// Batch-insert factory: stage entities for one all-or-nothing insert.
    fn batch() -> Batch<Self> {
        Batch::new()
    }
}
