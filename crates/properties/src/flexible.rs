//! `HasFlexibleDefinition`: runtime-declared extra fields.

use entitykit_core::FlexibleDefinition;

/// Capability: part of the entity's schema is configured at runtime.
///
/// The definition is a plain description consumed by UI/reporting
/// collaborators; this core never interprets it, which keeps it orthogonal
/// to the compiled capability set.
pub trait HasFlexibleDefinition {
    fn flexible_definition(&self) -> FlexibleDefinition;
}
