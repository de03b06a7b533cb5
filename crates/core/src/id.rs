//! Strongly-typed identifiers used across the domain.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::entity::Entity;
use crate::error::DomainError;

/// Identifier of an audit actor (the user or service performing a change).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(Uuid);

impl ActorId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for ActorId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for ActorId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s).map_err(|e| DomainError::invalid_id(format!("ActorId: {e}")))?;
        Ok(Self(uuid))
    }
}

/// Strongly-typed reference to one entity of kind `E`.
///
/// Equality is kind + value: the kind is the type parameter, so an
/// `Identifier<Task>` can never be assigned where an `Identifier<Project>`
/// is expected; the mix-up is a compile error, not a runtime check.
///
/// Identifiers are assigned by the storage collaborator at insert time and
/// are never reused after deletion within one persisted universe. Other
/// entities hold them as non-owning references (foreign keys).
pub struct Identifier<E: Entity> {
    value: Uuid,
    _kind: PhantomData<fn() -> E>,
}

impl<E: Entity> Identifier<E> {
    /// Mint a fresh identifier value (UUIDv7, time-ordered).
    ///
    /// Reserved for storage collaborators; application code receives
    /// identifiers, it does not mint them.
    pub fn mint() -> Self {
        Self::from_uuid(Uuid::now_v7())
    }

    pub fn from_uuid(value: Uuid) -> Self {
        Self {
            value,
            _kind: PhantomData,
        }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }

    /// Stable kind name of the referenced entity.
    pub fn kind(&self) -> &'static str {
        E::KIND
    }
}

// Manual impls: derives would require `E` itself to satisfy the bounds,
// but the phantom kind parameter carries no data.

impl<E: Entity> Copy for Identifier<E> {}

impl<E: Entity> Clone for Identifier<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Entity> PartialEq for Identifier<E> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<E: Entity> Eq for Identifier<E> {}

impl<E: Entity> Hash for Identifier<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<E: Entity> fmt::Debug for Identifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier<{}>({})", E::KIND, self.value)
    }
}

impl<E: Entity> fmt::Display for Identifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl<E: Entity> Serialize for Identifier<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, E: Entity> Deserialize<'de> for Identifier<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_uuid(Uuid::deserialize(deserializer)?))
    }
}

impl<E: Entity> FromStr for Identifier<E> {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s)
            .map_err(|e| DomainError::invalid_id(format!("Identifier<{}>: {e}", E::KIND)))?;
        Ok(Self::from_uuid(uuid))
    }
}

/// Once-settable identity holder embedded in every identified entity.
///
/// Empty while the entity is transient; filled exactly once by the storage
/// collaborator at insert. Reassignment is a programming error, not a
/// recoverable condition, and aborts via panic.
pub struct IdentitySlot<E: Entity> {
    id: Option<Identifier<E>>,
}

impl<E: Entity> IdentitySlot<E> {
    pub fn empty() -> Self {
        Self { id: None }
    }

    pub fn get(&self) -> Option<Identifier<E>> {
        self.id
    }

    pub fn is_assigned(&self) -> bool {
        self.id.is_some()
    }

    /// Fill the slot. Called by the storage collaborator at insert time.
    ///
    /// # Panics
    ///
    /// Panics if the slot is already filled: an identifier never changes
    /// once set.
    pub fn assign(&mut self, id: Identifier<E>) {
        if let Some(existing) = self.id {
            panic!(
                "identity of {} already assigned ({existing}), refusing reassignment to {id}",
                E::KIND
            );
        }
        self.id = Some(id);
    }
}

impl<E: Entity> Default for IdentitySlot<E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<E: Entity> Clone for IdentitySlot<E> {
    fn clone(&self) -> Self {
        Self { id: self.id }
    }
}

impl<E: Entity> fmt::Debug for IdentitySlot<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "IdentitySlot({id:?})"),
            None => write!(f, "IdentitySlot(unassigned)"),
        }
    }
}
