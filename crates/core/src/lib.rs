//! `entitykit-core`: identity and value foundations for composable entities.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! typed identifiers, the error taxonomy, discriminator choice domains, audit
//! stamps and flexible-definition descriptions. The capability contracts that
//! build on these live in `entitykit-properties`.

pub mod audit;
pub mod choice;
pub mod entity;
pub mod error;
pub mod flexible;
pub mod id;

pub use audit::AuditStamp;
pub use choice::ChoiceDomain;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use flexible::{FieldKind, FlexibleDefinition, FlexibleField};
pub use id::{ActorId, Identifier, IdentitySlot};
