//! `entitykit-storage`: reference storage collaborator.
//!
//! Implements the persistence ports of `entitykit-properties` in memory:
//! identifier assignment at insert, audit stamping, atomic per-scope number
//! claims and all-or-nothing batch insert. Intended for tests and dev; a
//! production backend implements the same ports over a real database.

pub mod backend;


pub use backend::{InMemoryBackend, StoredRecord};
