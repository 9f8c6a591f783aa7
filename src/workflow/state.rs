//! Publish-and-mint state machine.
//!
//! ```text
//! Editing ──submit──▶ Publishing ──ok──▶ Published ──mint──▶ Minting ──ok──▶ Minted
//!    ▲                    │                  ▲                  │              │
//!    └──── publish failed ┘                  └─── mint failed ──┘              │
//!    ▲                                                                        │
//!    └──────────────────────────────── reset ─────────────────────────────────┘
//! ```
//!
//! Draft fields are editable only in `Editing`.

use thiserror::Error;

/// Errors that can occur during state transitions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("Cannot {event} while {from}")]
    InvalidTransition { from: WorkflowState, event: WorkflowEvent },
}

/// Workflow states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowState {
    Editing,
    Publishing,
    Published,
    Minting,
    Minted,
}

impl WorkflowState {
    /// True when draft fields may change.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Editing)
    }

    /// True while an external call is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Publishing | Self::Minting)
    }
}

impl std::fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Editing => write!(f, "editing"),
            Self::Publishing => write!(f, "publishing"),
            Self::Published => write!(f, "published"),
            Self::Minting => write!(f, "minting"),
            Self::Minted => write!(f, "minted"),
        }
    }
}

/// Events that drive the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowEvent {
    Submit,
    PublishSucceeded,
    PublishFailed,
    Mint,
    MintSucceeded,
    MintFailed,
    Reset,
}

impl std::fmt::Display for WorkflowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Submit => write!(f, "publish"),
            Self::PublishSucceeded => write!(f, "complete publish"),
            Self::PublishFailed => write!(f, "fail publish"),
            Self::Mint => write!(f, "mint"),
            Self::MintSucceeded => write!(f, "complete mint"),
            Self::MintFailed => write!(f, "fail mint"),
            Self::Reset => write!(f, "reset"),
        }
    }
}

/// Transition table.
pub struct WorkflowStateMachine;

impl WorkflowStateMachine {
    /// Attempt a state transition.
    pub fn transition(current: WorkflowState, event: WorkflowEvent) -> Result<WorkflowState, StateError> {
        use WorkflowEvent as E;
        use WorkflowState as S;

        let next = match (current, event) {
            (S::Editing, E::Submit) => S::Publishing,
            (S::Publishing, E::PublishSucceeded) => S::Published,
            (S::Publishing, E::PublishFailed) => S::Editing,
            (S::Published, E::Mint) => S::Minting,
            (S::Minting, E::MintSucceeded) => S::Minted,
            (S::Minting, E::MintFailed) => S::Published,
            (S::Minted, E::Reset) => S::Editing,
            _ => return Err(StateError::InvalidTransition { from: current, event }),
        };
        Ok(next)
    }

    /// Check if a transition is valid without performing it.
    pub fn can_transition(current: WorkflowState, event: WorkflowEvent) -> bool {
        Self::transition(current, event).is_ok()
    }
}
