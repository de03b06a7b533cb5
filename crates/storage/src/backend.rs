//! In-memory storage backend.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use tracing::debug;
use uuid::Uuid;

use entitykit_core::{ActorId, AuditStamp, DomainError, DomainResult, Entity, Identifier};
use entitykit_properties::{
    Identified, NumberRegistry, NumberingScope, Persistence, PersistenceError,
};

/// Backend-facing wiring an entity kind provides on top of `Identified`.
///
/// The audit hooks connect the backend's stamping to whatever log
/// capabilities the entity declares; kinds without audit logs keep the
/// no-op defaults. `unique_key` exposes the number the backend must hold
/// in its unique index, for `Numbered` kinds.
pub trait StoredRecord: Identified {
    /// Audit hook, called once at insert, after identity assignment.
    fn audit_insert(&mut self, stamp: AuditStamp) -> DomainResult<()> {
        let _ = stamp;
        Ok(())
    }

    /// Audit hook, called on every accepted update.
    fn audit_update(&mut self, stamp: AuditStamp) -> DomainResult<()> {
        let _ = stamp;
        Ok(())
    }

    /// The (scope, number) pair the unique index must hold, if any.
    fn unique_key(&self) -> Option<(NumberingScope, String)> {
        None
    }
}

#[derive(Debug, Default)]
struct BackendState {
    /// Inserted row ids per kind.
    rows: HashMap<&'static str, HashSet<Uuid>>,
    /// Numbers negotiated via `set_number` but not yet durable.
    claims: HashSet<(NumberingScope, String)>,
    /// Numbers of inserted rows.
    unique_index: HashSet<(NumberingScope, String)>,
}

impl BackendState {
    fn number_taken(&self, key: &(NumberingScope, String)) -> bool {
        self.claims.contains(key) || self.unique_index.contains(key)
    }
}

/// In-memory storage collaborator.
///
/// Intended for tests/dev. All state sits behind one lock, which also
/// serializes concurrent number claims per scope and overlapping batch
/// inserts, as the ports require.
#[derive(Debug)]
pub struct InMemoryBackend {
    actor: ActorId,
    state: RwLock<BackendState>,
}

impl InMemoryBackend {
    /// Backend stamping audits on behalf of `actor`.
    pub fn new(actor: ActorId) -> Self {
        Self {
            actor,
            state: RwLock::new(BackendState::default()),
        }
    }

    pub fn actor(&self) -> ActorId {
        self.actor
    }

    /// Whether an entity's row is visible as inserted.
    pub fn is_inserted<E: Entity>(&self, id: Identifier<E>) -> bool {
        let state = match self.state.read() {
            Ok(state) => state,
            Err(_) => return false,
        };
        state
            .rows
            .get(E::KIND)
            .is_some_and(|rows| rows.contains(id.as_uuid()))
    }

    /// Number of inserted rows of one kind.
    pub fn inserted_count(&self, kind: &'static str) -> usize {
        self.state
            .read()
            .map(|state| state.rows.get(kind).map_or(0, |rows| rows.len()))
            .unwrap_or(0)
    }

    fn write_state(&self) -> Result<std::sync::RwLockWriteGuard<'_, BackendState>, PersistenceError> {
        self.state
            .write()
            .map_err(|_| PersistenceError::Backend("lock poisoned".to_string()))
    }

    /// Validation shared by single and batch insert. Checks the entity is
    /// transient, carries no identity yet, and its number (if any) does not
    /// collide with a durable row or an earlier entity of the same batch.
    fn check_insertable<E: StoredRecord>(
        state: &BackendState,
        entity: &E,
        batch_numbers: &mut HashSet<(NumberingScope, String)>,
    ) -> DomainResult<()> {
        if entity.is_persisted() {
            return Err(DomainError::precondition(format!(
                "{} is already inserted",
                E::KIND
            )));
        }
        if entity.try_id().is_some() {
            return Err(DomainError::precondition(format!(
                "{} already carries an identity",
                E::KIND
            )));
        }
        if let Some(key) = entity.unique_key() {
            if state.unique_index.contains(&key) || !batch_numbers.insert(key.clone()) {
                let (scope, value) = key;
                return Err(DomainError::number_conflict(value, scope.to_string()));
            }
        }
        Ok(())
    }

    /// Entity-side fallible work (the audit hook). Runs before anything
    /// becomes durable, so a rejected stamp leaves no row behind.
    fn stamp_insert<E: StoredRecord>(actor: ActorId, entity: &mut E) -> DomainResult<()> {
        entity.audit_insert(AuditStamp::now(actor))
    }

    /// Make one validated, stamped entity durable. Every fallible step has
    /// already run; this must not fail.
    fn commit_insert<E: StoredRecord>(state: &mut BackendState, entity: &mut E) {
        let id = Identifier::<E>::mint();
        entity.identity_mut().assign(id);
        entity.mark_persisted();

        state.rows.entry(E::KIND).or_default().insert(*id.as_uuid());
        if let Some(key) = entity.unique_key() {
            state.claims.remove(&key);
            state.unique_index.insert(key);
        }
        debug!(kind = E::KIND, id = %id, "inserted");
    }
}

impl<E: StoredRecord> Persistence<E> for InMemoryBackend {
    fn insert(&self, entity: &mut E) -> Result<(), PersistenceError> {
        let mut state = self.write_state()?;
        let mut batch_numbers = HashSet::new();
        Self::check_insertable(&state, entity, &mut batch_numbers)?;
        Self::stamp_insert(self.actor, entity)?;
        Self::commit_insert(&mut state, entity);
        Ok(())
    }

    fn insert_batch(&self, entities: &mut [E]) -> Result<(), PersistenceError> {
        if entities.is_empty() {
            return Err(
                DomainError::precondition("batch insert requires a non-empty batch").into(),
            );
        }

        let mut state = self.write_state()?;

        // Validate, then stamp, then commit: every fallible step runs
        // before anything becomes durable, so a rejected batch inserts
        // nothing.
        let mut batch_numbers = HashSet::new();
        for (index, entity) in entities.iter().enumerate() {
            Self::check_insertable(&state, entity, &mut batch_numbers)
                .map_err(|source| PersistenceError::BatchRejected { index, source })?;
        }

        for (index, entity) in entities.iter_mut().enumerate() {
            Self::stamp_insert(self.actor, entity)
                .map_err(|source| PersistenceError::BatchRejected { index, source })?;
        }

        for entity in entities.iter_mut() {
            Self::commit_insert(&mut state, entity);
        }
        debug!(kind = E::KIND, count = entities.len(), "batch inserted");
        Ok(())
    }

    fn update(&self, entity: &mut E) -> Result<(), PersistenceError> {
        let state = self.write_state()?;
        let id = entity.try_id().ok_or_else(|| {
            DomainError::precondition(format!("{} cannot be updated before insert", E::KIND))
        })?;
        if !state
            .rows
            .get(E::KIND)
            .is_some_and(|rows| rows.contains(id.as_uuid()))
        {
            return Err(DomainError::not_found().into());
        }
        drop(state);

        entity.audit_update(AuditStamp::now(self.actor))?;
        debug!(kind = E::KIND, id = %id, "updated");
        Ok(())
    }
}

impl NumberRegistry for InMemoryBackend {
    fn claim(&self, scope: &NumberingScope, value: &str) -> DomainResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| DomainError::invariant("lock poisoned"))?;
        let key = (scope.clone(), value.to_string());
        if state.number_taken(&key) {
            return Err(DomainError::number_conflict(value, scope.to_string()));
        }
        state.claims.insert(key);
        debug!(scope = %scope, value, "number claimed");
        Ok(())
    }

    fn release(&self, scope: &NumberingScope, value: &str) {
        if let Ok(mut state) = self.state.write() {
            state.claims.remove(&(scope.clone(), value.to_string()));
        }
    }
}
