//! Collaborator ports: the interfaces external engines must satisfy.
//!
//! The core never implements storage, workflow execution or planning; it
//! only defines what it needs from them. Concrete backends (in-memory,
//! SQL, ...) live in their own crates and implement these traits.

use entitykit_core::{DomainError, DomainResult};
use thiserror::Error;

use crate::lifecycle::Lifecycle;
use crate::numbered::NumberingScope;
use crate::stored::Stored;

/// Error surfaced by a storage collaborator.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// A domain rule rejected the operation before it reached storage.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A batch insert was rejected as a whole. Nothing was inserted.
    #[error("batch rejected at index {index}: {source}")]
    BatchRejected { index: usize, source: DomainError },

    /// The backend itself failed (IO, lock poisoned, ...).
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Storage port for one entity kind.
///
/// Implementations own the transaction boundary: identifier assignment and
/// audit stamping happen inside `insert`/`update`, and `insert_batch` is
/// all-or-nothing per call. Concurrent calls against overlapping entities
/// must be serialized by the implementation.
pub trait Persistence<E: Stored> {
    /// Insert one entity, assigning its identity and creation stamp.
    fn insert(&self, entity: &mut E) -> Result<(), PersistenceError>;

    /// Insert a finite, non-empty, ordered batch; either every entity is
    /// durably inserted or none is. Numbering and identity conflicts must
    /// be resolved by the caller beforehand; this call performs no
    /// uniqueness negotiation.
    fn insert_batch(&self, entities: &mut [E]) -> Result<(), PersistenceError>;

    /// Persist a mutation to an already-inserted entity, stamping its
    /// update log.
    fn update(&self, entity: &mut E) -> Result<(), PersistenceError>;
}

/// Uniqueness registry for `Numbered` entities.
///
/// A claim is atomic per scope: of two concurrent claims for the same
/// (scope, value) pair, at most one succeeds.
pub trait NumberRegistry {
    /// Claim `value` within `scope`, or fail with
    /// [`DomainError::NumberConflict`] naming both.
    fn claim(&self, scope: &NumberingScope, value: &str) -> DomainResult<()>;

    /// Release a previously claimed value (e.g. after renumbering).
    fn release(&self, scope: &NumberingScope, value: &str);
}

/// Workflow port: executes lifecycle transitions for an entity kind.
pub trait WorkflowEngine<E: Lifecycle> {
    /// Request a transition to `to`, applying whatever multi-step process
    /// the engine drives before the state lands.
    fn request_transition(&self, entity: &mut E, to: E::State) -> DomainResult<()>;
}

/// Staging collector for the massive-insert protocol.
///
/// Obtained from [`Stored::batch`]. Entities stay staged across a failed
/// `execute`, so the caller can fix the offender and retry the whole batch
/// (partial success is never assumed).
#[derive(Debug)]
pub struct Batch<E: Stored> {
    staged: Vec<E>,
}

impl<E: Stored> Batch<E> {
    pub fn new() -> Self {
        Self { staged: Vec::new() }
    }

    pub fn push(&mut self, entity: E) {
        self.staged.push(entity);
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    pub fn entities(&self) -> &[E] {
        &self.staged
    }

    /// Run the batch against a storage collaborator, all-or-nothing.
    pub fn execute<P: Persistence<E>>(&mut self, backend: &P) -> Result<(), PersistenceError> {
        if self.staged.is_empty() {
            return Err(DomainError::precondition("batch insert requires a non-empty batch").into());
        }
        backend.insert_batch(&mut self.staged)
    }

    /// Recover the staged entities (e.g. to split a failed batch).
    pub fn into_entities(self) -> Vec<E> {
        self.staged
    }
}

impl<E: Stored> Default for Batch<E> {
    fn default() -> Self {
        Self::new()
    }
}
