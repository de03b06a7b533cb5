//! `Identified`: stable typed identity, assigned once at insert.

use entitykit_core::{Identifier, IdentitySlot};

use crate::stored::Stored;

/// Capability: this entity carries an [`Identifier<Self>`].
///
/// Identity is assigned by the storage collaborator at insert time and is
/// immutable afterwards (the slot enforces the once-only invariant).
pub trait Identified: Stored {
    /// The identity slot. Filled by the storage collaborator at insert.
    fn identity(&self) -> &IdentitySlot<Self>;

    /// Mutable slot access for the storage collaborator. Application code
    /// has no business calling this; the slot panics on reassignment.
    fn identity_mut(&mut self) -> &mut IdentitySlot<Self>;

    fn try_id(&self) -> Option<Identifier<Self>> {
        self.identity().get()
    }

    /// The identifier of a persisted entity.
    ///
    /// # Panics
    ///
    /// Panics if the entity was never inserted. Use [`Identified::try_id`]
    /// when the persistence state is not known.
    fn id(&self) -> Identifier<Self> {
        match self.try_id() {
            Some(id) => id,
            None => panic!("{} has no identity before insert", Self::KIND),
        }
    }
}
