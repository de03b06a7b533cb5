//! `Companion`: satellite rows holding subtype-specific fields.

use entitykit_core::{ChoiceDomain, DomainError, Identifier};

use crate::collab::{Persistence, PersistenceError};
use crate::stored::Stored;
use crate::typed::Typed;

/// The satellite record of a [`Companion`] entity.
///
/// Holds the fields specific to one discriminator value of the owner.
/// Lifecycle is tied 1:1 to the owner's row: created in the owner's typed
/// creation step, never outliving the owner.
pub trait CompanionRecord: Stored {
    type Owner: Companion<Satellite = Self>;

    /// Fresh, unbound satellite for one discriminator value.
    fn blank_for(choice: <Self::Owner as Typed>::Discriminator) -> Self;

    /// The discriminator this satellite was built for.
    fn discriminator(&self) -> <Self::Owner as Typed>::Discriminator;

    fn owner_id(&self) -> Option<Identifier<Self::Owner>>;

    /// Bind to the owner's identity. Called during `insert_companion`.
    fn bind_owner(&mut self, id: Identifier<Self::Owner>);
}

/// Capability: the entity owns a typed satellite record.
///
/// Orchestrates creation and update of the companion row matching the
/// owner's discriminator.
pub trait Companion: Typed {
    type Satellite: CompanionRecord<Owner = Self>;

    /// Fix the discriminator and build the matching satellite.
    ///
    /// Safe to call again with the same choice within one creation
    /// transaction; a different choice on an already-typed entity is
    /// rejected (delegated to [`Typed::set_type_before_creation`]).
    fn create_typed(&mut self, choice: Self::Discriminator) -> Result<Self::Satellite, DomainError> {
        self.set_type_before_creation(choice)?;
        Ok(Self::Satellite::blank_for(choice))
    }

    /// Insert the satellite, bound to this (already inserted) owner.
    fn insert_companion<P: Persistence<Self::Satellite>>(
        &self,
        satellite: &mut Self::Satellite,
        backend: &P,
    ) -> Result<(), PersistenceError> {
        let owner_id = self.try_id().ok_or_else(|| {
            DomainError::precondition(format!(
                "{} must be inserted before its companion",
                Self::KIND
            ))
        })?;
        let choice = self.discriminator().ok_or_else(|| {
            DomainError::precondition(format!("{} has no discriminator", Self::KIND))
        })?;
        if satellite.discriminator() != choice {
            return Err(DomainError::precondition(format!(
                "companion was built for '{}' but {} is typed '{}'",
                satellite.discriminator().code(),
                Self::KIND,
                choice.code()
            ))
            .into());
        }

        satellite.bind_owner(owner_id);
        backend.insert(satellite)
    }

    /// Persist a mutation of the satellite of this owner.
    fn update_typed<P: Persistence<Self::Satellite>>(
        &self,
        satellite: &mut Self::Satellite,
        backend: &P,
    ) -> Result<(), PersistenceError> {
        let owner_id = self.try_id().ok_or_else(|| {
            DomainError::precondition(format!("{} is not inserted", Self::KIND))
        })?;
        if satellite.owner_id() != Some(owner_id) {
            return Err(DomainError::precondition(
                "companion is bound to a different owner",
            )
            .into());
        }

        backend.update(satellite)
    }
}
