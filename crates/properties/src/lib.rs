//! `entitykit-properties`: composable capability contracts for entities.
//!
//! Each capability is one trait contributing a small operation set; its
//! prerequisites are its supertrait bounds. Declaring a capability on an
//! entity type without its prerequisites is a compile error, which is the
//! whole composition checker: there is no runtime capability discovery.
//!
//! Collaborator ports (storage, number registry, workflow engine) live in
//! [`collab`]; the concrete backends are external to this crate.

pub mod audit_log;
pub mod collab;
pub mod companion;
pub mod flexible;
pub mod hierarchy;
pub mod identified;
pub mod lifecycle;
pub mod link;
pub mod named;
pub mod numbered;
pub mod stored;
pub mod typed;

pub use audit_log::{CreationLog, UpdateLog};
pub use collab::{Batch, NumberRegistry, Persistence, PersistenceError, WorkflowEngine};
pub use companion::{Companion, CompanionRecord};
pub use flexible::HasFlexibleDefinition;
pub use hierarchy::MultidimensionChild;
pub use identified::Identified;
pub use lifecycle::{ComplexWorkflow, Lifecycle, TargetDate};
pub use link::{LeftForLink, Link};
pub use named::Named;
pub use numbered::{Numbered, NumberedForParent, NumberingScope};
pub use stored::{PersistenceState, Stored};
pub use typed::Typed;
