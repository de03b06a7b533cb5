//! `LeftForLink`: static gate for the left end of a link relationship.

use serde::Serialize;

use entitykit_core::{Entity, Identifier};

/// Marker: the entity kind may sit on the left end of a [`Link`].
///
/// Contributes no operations; it exists only so link-creation code is
/// type-checked. Zero-sized at runtime.
pub trait LeftForLink: Entity {}

/// A directed link from a `LeftForLink` kind to any entity kind.
#[derive(Debug, Serialize)]
#[serde(bound = "")]
pub struct Link<L: LeftForLink, R: Entity> {
    pub left: Identifier<L>,
    pub right: Identifier<R>,
}

impl<L: LeftForLink, R: Entity> Link<L, R> {
    /// Only compiles when `L` is declared `LeftForLink`; that check is
    /// the whole point of the marker.
    pub fn new(left: Identifier<L>, right: Identifier<R>) -> Self {
        Self { left, right }
    }
}

impl<L: LeftForLink, R: Entity> Copy for Link<L, R> {}

impl<L: LeftForLink, R: Entity> Clone for Link<L, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L: LeftForLink, R: Entity> PartialEq for Link<L, R> {
    fn eq(&self, other: &Self) -> bool {
        self.left == other.left && self.right == other.right
    }
}

impl<L: LeftForLink, R: Entity> Eq for Link<L, R> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Anchor;

    #[derive(Debug)]
    struct Target;

    impl Entity for Anchor {
        const KIND: &'static str = "anchor";
    }

    impl Entity for Target {
        const KIND: &'static str = "target";
    }

    impl LeftForLink for Anchor {}

    #[test]
    fn links_hold_typed_ends() {
        let left: Identifier<Anchor> = Identifier::mint();
        let right: Identifier<Target> = Identifier::mint();

        let link = Link::new(left, right);
        assert_eq!(link.left, left);
        assert_eq!(link.right, right);
    }
}
