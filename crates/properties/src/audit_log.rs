//! `CreationLog` / `UpdateLog`: audit stamps written by the storage layer.

use chrono::{DateTime, Utc};

use entitykit_core::{ActorId, AuditStamp, DomainError, DomainResult};

use crate::identified::Identified;
use crate::stored::Stored;

/// Capability: immutable creation actor + timestamp.
///
/// Application code only reads; the stamp is recorded by the storage
/// collaborator exactly once, at insert.
pub trait CreationLog: Stored {
    fn creation_log(&self) -> Option<&AuditStamp>;

    /// Raw field write. Implementors only; storage goes through
    /// [`CreationLog::record_creation`].
    fn store_creation_stamp(&mut self, stamp: AuditStamp);

    /// Storage hook, once per entity lifetime.
    fn record_creation(&mut self, stamp: AuditStamp) -> DomainResult<()> {
        if self.creation_log().is_some() {
            return Err(DomainError::invariant(format!(
                "{} creation log already stamped",
                Self::KIND
            )));
        }
        self.store_creation_stamp(stamp);
        Ok(())
    }

    fn creator_id(&self) -> Option<ActorId> {
        self.creation_log().map(|s| s.actor)
    }

    fn creation_time(&self) -> Option<DateTime<Utc>> {
        self.creation_log().map(|s| s.at)
    }
}

/// Capability: last-update actor + timestamp.
///
/// Stamped by the storage collaborator on every accepted update; read-only
/// from the application's perspective.
pub trait UpdateLog: Identified {
    fn update_log(&self) -> Option<&AuditStamp>;

    /// Raw field write. Implementors only; storage goes through
    /// [`UpdateLog::record_update`].
    fn store_update_stamp(&mut self, stamp: AuditStamp);

    /// Storage hook, on every accepted update of a persisted entity.
    fn record_update(&mut self, stamp: AuditStamp) -> DomainResult<()> {
        if !self.is_persisted() {
            return Err(DomainError::precondition(format!(
                "{} cannot be update-stamped before insert",
                Self::KIND
            )));
        }
        self.store_update_stamp(stamp);
        Ok(())
    }

    fn last_updater_id(&self) -> Option<ActorId> {
        self.update_log().map(|s| s.actor)
    }

    fn last_update_time(&self) -> Option<DateTime<Utc>> {
        self.update_log().map(|s| s.at)
    }
}
