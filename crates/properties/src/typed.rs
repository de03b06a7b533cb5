//! `Typed`: a discriminator fixed before first persistence.

use entitykit_core::{ChoiceDomain, DomainError, DomainResult};

use crate::identified::Identified;

/// Capability: the entity is subclassed by a closed discriminator domain.
///
/// The discriminator may only be set while the entity is transient; once
/// inserted it is part of the row's identity and never changes.
pub trait Typed: Identified {
    type Discriminator: ChoiceDomain;

    fn discriminator(&self) -> Option<Self::Discriminator>;

    /// Raw field write. Implementors only; use
    /// [`Typed::set_type_before_creation`].
    fn store_discriminator(&mut self, choice: Self::Discriminator);

    /// Fix the discriminator before first persistence.
    ///
    /// Setting the same value again is accepted (idempotent within one
    /// creation); a different value, or any value after insert, is a
    /// precondition violation.
    fn set_type_before_creation(&mut self, choice: Self::Discriminator) -> DomainResult<()> {
        if self.is_persisted() {
            return Err(DomainError::precondition(format!(
                "{} discriminator cannot change after insert",
                Self::KIND
            )));
        }
        match self.discriminator() {
            Some(existing) if existing != choice => Err(DomainError::precondition(format!(
                "{} already typed as '{}', refusing '{}'",
                Self::KIND,
                existing.code(),
                choice.code()
            ))),
            _ => {
                self.store_discriminator(choice);
                Ok(())
            }
        }
    }
}
