//! `Named`: a free-form display name.

use crate::collab::{Persistence, PersistenceError};
use crate::identified::Identified;

/// Capability: the entity has a mutable, free-form name.
pub trait Named: Identified {
    fn name(&self) -> &str;

    /// Raw field write. Implementors only; use [`Named::set_name`].
    fn store_name(&mut self, name: String);

    /// Rename, persisting immediately when the entity is already stored.
    fn set_name<P: Persistence<Self>>(
        &mut self,
        backend: &P,
        name: impl Into<String>,
    ) -> Result<(), PersistenceError> {
        self.store_name(name.into());
        if self.is_persisted() {
            backend.update(self)?;
        }
        Ok(())
    }
}
