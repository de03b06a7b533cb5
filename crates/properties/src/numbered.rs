//! `Numbered` / `NumberedForParent`: string uniqueness keys with scopes.

use core::fmt;

use serde::Serialize;
use uuid::Uuid;

use entitykit_core::{DomainResult, Identifier};

use crate::collab::NumberRegistry;
use crate::identified::Identified;

/// The set of siblings a number must be unique within.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum NumberingScope {
    /// All entities of one kind.
    Global { kind: &'static str },
    /// Entities of one kind sharing the same parent.
    WithinParent { kind: &'static str, parent: Uuid },
}

impl NumberingScope {
    pub fn global(kind: &'static str) -> Self {
        Self::Global { kind }
    }

    pub fn within_parent<P>(kind: &'static str, parent: Identifier<P>) -> Self
    where
        P: entitykit_core::Entity,
    {
        Self::WithinParent {
            kind,
            parent: *parent.as_uuid(),
        }
    }
}

impl fmt::Display for NumberingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberingScope::Global { kind } => write!(f, "{kind}"),
            NumberingScope::WithinParent { kind, parent } => write!(f, "{kind}@{parent}"),
        }
    }
}

/// Capability: the entity carries a string number unique within its scope.
///
/// The default scope is global per kind; `NumberedForParent` implementors
/// narrow it (see [`NumberedForParent::parent_numbering_scope`]).
pub trait Numbered: Identified {
    /// The current number, if one was assigned yet.
    fn number(&self) -> Option<&str>;

    /// Raw field write. Implementors only; use [`Numbered::set_number`],
    /// which claims uniqueness first.
    fn store_number(&mut self, number: String);

    /// Scope the number must be unique within.
    fn numbering_scope(&self) -> NumberingScope {
        NumberingScope::global(Self::KIND)
    }

    /// Assign a number, claiming it in the registry before accepting.
    ///
    /// Re-assigning the current number is a no-op. A successful
    /// re-numbering releases the previous claim. The claim itself is
    /// atomic per scope; that is the registry's contract.
    fn set_number(&mut self, registry: &dyn NumberRegistry, number: &str) -> DomainResult<()> {
        if number.is_empty() {
            return Err(entitykit_core::DomainError::precondition(
                "number must be non-empty",
            ));
        }
        if self.number() == Some(number) {
            return Ok(());
        }

        let scope = self.numbering_scope();
        registry.claim(&scope, number)?;
        if let Some(previous) = self.number() {
            registry.release(&scope, previous);
        }
        self.store_number(number.to_string());
        Ok(())
    }
}

/// Capability: numbering is unique only among siblings of one parent.
///
/// Cross-entity prerequisite: the parent kind must itself be `Identified`.
/// Implementors must also implement [`Numbered::numbering_scope`] as
/// [`NumberedForParent::parent_numbering_scope`] so claims land in the
/// narrowed scope.
pub trait NumberedForParent: Numbered {
    type Parent: Identified;

    /// The parent whose children this entity is numbered among.
    fn parent_id_for_numbering(&self) -> Identifier<Self::Parent>;

    /// The narrowed scope: siblings sharing this entity's parent.
    fn parent_numbering_scope(&self) -> NumberingScope {
        NumberingScope::within_parent(Self::KIND, self.parent_id_for_numbering())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;

    use entitykit_core::{DomainError, Entity, IdentitySlot};

    use crate::stored::{PersistenceState, Stored};

    /// Minimal in-memory registry for capability-level tests.
    #[derive(Debug, Default)]
    pub(crate) struct SetRegistry {
        claimed: RefCell<HashSet<(NumberingScope, String)>>,
    }

    impl NumberRegistry for SetRegistry {
        fn claim(&self, scope: &NumberingScope, value: &str) -> DomainResult<()> {
            let mut claimed = self.claimed.borrow_mut();
            if !claimed.insert((scope.clone(), value.to_string())) {
                return Err(DomainError::number_conflict(value, scope.to_string()));
            }
            Ok(())
        }

        fn release(&self, scope: &NumberingScope, value: &str) {
            self.claimed
                .borrow_mut()
                .remove(&(scope.clone(), value.to_string()));
        }
    }

    #[derive(Debug, Default)]
    struct Ticket {
        persisted: bool,
        identity: IdentitySlot<Ticket>,
        number: Option<String>,
    }

    impl Entity for Ticket {
        const KIND: &'static str = "ticket";
    }

    impl Stored for Ticket {
        fn persistence_state(&self) -> PersistenceState {
            if self.persisted {
                PersistenceState::Persisted
            } else {
                PersistenceState::Transient
            }
        }

        fn mark_persisted(&mut self) {
            self.persisted = true;
        }
    }

    impl Identified for Ticket {
        fn identity(&self) -> &IdentitySlot<Self> {
            &self.identity
        }

        fn identity_mut(&mut self) -> &mut IdentitySlot<Self> {
            &mut self.identity
        }
    }

    impl Numbered for Ticket {
        fn number(&self) -> Option<&str> {
            self.number.as_deref()
        }

        fn store_number(&mut self, number: String) {
            self.number = Some(number);
        }
    }

    #[test]
    fn two_tickets_cannot_share_a_global_number() {
        let registry = SetRegistry::default();
        let mut a = Ticket::default();
        let mut b = Ticket::default();

        a.set_number(&registry, "T-001").unwrap();
        let err = b.set_number(&registry, "T-001").unwrap_err();
        match err {
            DomainError::NumberConflict { value, scope } => {
                assert_eq!(value, "T-001");
                assert_eq!(scope, "ticket");
            }
            other => panic!("expected NumberConflict, got {other:?}"),
        }
        assert_eq!(b.number(), None);
    }

    #[test]
    fn renumbering_releases_the_previous_claim() {
        let registry = SetRegistry::default();
        let mut a = Ticket::default();
        let mut b = Ticket::default();

        a.set_number(&registry, "T-001").unwrap();
        a.set_number(&registry, "T-002").unwrap();

        // "T-001" is free again.
        b.set_number(&registry, "T-001").unwrap();
        assert_eq!(a.number(), Some("T-002"));
        assert_eq!(b.number(), Some("T-001"));
    }

    #[test]
    fn reassigning_the_same_number_is_a_no_op() {
        let registry = SetRegistry::default();
        let mut a = Ticket::default();

        a.set_number(&registry, "T-001").unwrap();
        a.set_number(&registry, "T-001").unwrap();
        assert_eq!(a.number(), Some("T-001"));
    }

    #[test]
    fn empty_number_is_a_precondition_violation() {
        let registry = SetRegistry::default();
        let mut a = Ticket::default();
        let err = a.set_number(&registry, "").unwrap_err();
        assert!(matches!(err, DomainError::Precondition(_)));
    }
}
