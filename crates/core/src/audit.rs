//! Audit stamps written by the storage collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::ActorId;

/// Who changed an entity, and when.
///
/// Stamps are produced by the storage collaborator at insert/update time;
/// application code only ever reads them back through the `CreationLog` and
/// `UpdateLog` capabilities.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStamp {
    pub actor: ActorId,
    pub at: DateTime<Utc>,
}

impl AuditStamp {
    pub fn new(actor: ActorId, at: DateTime<Utc>) -> Self {
        Self { actor, at }
    }

    pub fn now(actor: ActorId) -> Self {
        Self::new(actor, Utc::now())
    }
}
