//! `Lifecycle` / `ComplexWorkflow` / `TargetDate`: finite-state entities.

use chrono::{DateTime, Utc};

use entitykit_core::{ChoiceDomain, DomainError, DomainResult};

use crate::identified::Identified;

/// Capability: the entity has a finite-state lifecycle.
///
/// Concrete states come from a closed choice domain; the valid transition
/// set depends on the current state. Transitions are executed by a
/// [`crate::collab::WorkflowEngine`], which calls
/// [`Lifecycle::apply_transition`] once its process completes.
pub trait Lifecycle: Identified {
    type State: ChoiceDomain;

    fn state(&self) -> Self::State;

    /// Raw field write. Implementors only; engines go through
    /// [`Lifecycle::apply_transition`].
    fn store_state(&mut self, state: Self::State);

    /// States reachable from the current one.
    fn valid_transitions(&self) -> Vec<Self::State>;

    fn can_transition_to(&self, to: Self::State) -> bool {
        self.valid_transitions().contains(&to)
    }

    /// Land a transition. Rejects targets outside the valid set.
    fn apply_transition(&mut self, to: Self::State) -> DomainResult<()> {
        if !self.can_transition_to(to) {
            return Err(DomainError::precondition(format!(
                "{}: transition '{}' -> '{}' is not allowed",
                Self::KIND,
                self.state().code(),
                to.code()
            )));
        }
        self.store_state(to);
        Ok(())
    }
}

/// Marker: lifecycle transitions are driven by a multi-step workflow
/// engine rather than direct state flips. Contributes no operations.
pub trait ComplexWorkflow: Lifecycle {}

/// Capability: a target completion date tied to the lifecycle.
pub trait TargetDate: Lifecycle {
    fn target_date(&self) -> Option<DateTime<Utc>>;

    /// Raw field write, used by import adapters and planners.
    fn store_target_date(&mut self, date: Option<DateTime<Utc>>);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use entitykit_core::{Entity, IdentitySlot};

    use crate::collab::WorkflowEngine;
    use crate::identified::Identified;
    use crate::stored::{PersistenceState, Stored};

    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub(crate) enum IssueState {
        Open,
        InProgress,
        Closed,
    }

    impl ChoiceDomain for IssueState {
        const DOMAIN: &'static str = "issue_state";

        fn code(&self) -> &'static str {
            match self {
                IssueState::Open => "open",
                IssueState::InProgress => "in_progress",
                IssueState::Closed => "closed",
            }
        }

        fn all() -> &'static [Self] {
            &[IssueState::Open, IssueState::InProgress, IssueState::Closed]
        }
    }

    #[derive(Debug)]
    struct Issue {
        persisted: bool,
        identity: IdentitySlot<Issue>,
        state: IssueState,
        target: Option<DateTime<Utc>>,
    }

    impl Default for Issue {
        fn default() -> Self {
            Self {
                persisted: false,
                identity: IdentitySlot::empty(),
                state: IssueState::Open,
                target: None,
            }
        }
    }

    impl Entity for Issue {
        const KIND: &'static str = "issue";
    }

    impl Stored for Issue {
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

    impl Identified for Issue {
        fn identity(&self) -> &IdentitySlot<Self> {
            &self.identity
        }

        fn identity_mut(&mut self) -> &mut IdentitySlot<Self> {
            &mut self.identity
        }
    }

    impl Lifecycle for Issue {
        type State = IssueState;

        fn state(&self) -> IssueState {
            self.state
        }

        fn store_state(&mut self, state: IssueState) {
            self.state = state;
        }

        fn valid_transitions(&self) -> Vec<IssueState> {
            match self.state {
                IssueState::Open => vec![IssueState::InProgress, IssueState::Closed],
                IssueState::InProgress => vec![IssueState::Closed],
                IssueState::Closed => vec![],
            }
        }
    }

    impl ComplexWorkflow for Issue {}

    impl TargetDate for Issue {
        fn target_date(&self) -> Option<DateTime<Utc>> {
            self.target
        }

        fn store_target_date(&mut self, date: Option<DateTime<Utc>>) {
            self.target = date;
        }
    }

    /// Engine that lands transitions directly, with no extra steps.
    struct DirectEngine;

    impl<E: Lifecycle> WorkflowEngine<E> for DirectEngine {
        fn request_transition(&self, entity: &mut E, to: E::State) -> DomainResult<()> {
            entity.apply_transition(to)
        }
    }

    #[test]
    fn valid_transition_lands() {
        let mut issue = Issue::default();
        DirectEngine
            .request_transition(&mut issue, IssueState::InProgress)
            .unwrap();
        assert_eq!(issue.state(), IssueState::InProgress);
    }

    #[test]
    fn invalid_transition_is_rejected() {
        let mut issue = Issue::default();
        issue.apply_transition(IssueState::Closed).unwrap();

        let err = issue.apply_transition(IssueState::Open).unwrap_err();
        assert!(matches!(err, DomainError::Precondition(_)));
        assert_eq!(issue.state(), IssueState::Closed);
    }

    #[test]
    fn target_date_rides_on_the_lifecycle() {
        let mut issue = Issue::default();
        assert!(issue.target_date().is_none());

        let due = Utc::now();
        issue.store_target_date(Some(due));
        assert_eq!(issue.target_date(), Some(due));
    }
}
