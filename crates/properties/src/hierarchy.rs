//! `MultidimensionChild`: membership in several parent hierarchies.

use entitykit_core::Identifier;

use crate::identified::Identified;

/// Capability: the entity hangs under a parent of kind `P`, independently
/// per dimension (an entity may implement this once per parent kind).
pub trait MultidimensionChild<P: Identified>: Identified {
    fn parent_id(&self) -> Option<Identifier<P>>;

    /// Reparent without going through the update-audit path.
    ///
    /// Explicit bypass for trusted bulk restructuring: no update stamp is
    /// recorded and no collaborator is notified. Ordinary reparenting goes
    /// through a normal persisted update instead.
    fn set_parent_without_notifying_update(&mut self, parent: Identifier<P>);
}
