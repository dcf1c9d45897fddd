use robowar_protocol::{Position, RobotId};
use thiserror::Error;

use crate::{Capability, QueueError};

/// Contract violations raised by capability calls. Decision routines treat
/// `SelfTarget` and `InvalidMove` as "sample again".
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("{robot} cannot target its own cell")]
    SelfTarget { robot: String },
    #[error("{robot} cannot reach ({}, {})", to.x, to.y)]
    InvalidMove { robot: String, to: Position },
    #[error("{robot} has no {capability} capability")]
    MissingCapability {
        robot: String,
        capability: Capability,
    },
    #[error("unknown robot {0:?}")]
    UnknownRobot(RobotId),
}

/// Invariant violations in combat bookkeeping. These indicate registry
/// corruption and are never recovered from.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("{robot} has no lives left")]
    NoLivesLeft { robot: String },
    #[error("kill credit must be non-negative, got {0}")]
    NegativeCredit(i32),
    #[error("{robot} is not in the active registry")]
    NotActive { robot: String },
    #[error("{robot} is not in the revive registry")]
    NotAwaitingRevival { robot: String },
}

/// Rejections when placing a new robot on the board.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("{name} placed outside the board at ({}, {})", at.x, at.y)]
    OutOfBounds { name: String, at: Position },
    #[error("{name} placed on ({}, {}), already taken by {occupant}", at.x, at.y)]
    Occupied {
        name: String,
        at: Position,
        occupant: String,
    },
    #[error("a robot named {0} already exists")]
    DuplicateName(String),
    #[error("no free cell left for {0}")]
    BoardFull(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Combat(#[from] CombatError),
    #[error(transparent)]
    Queue(#[from] QueueError),
}

impl SimError {
    /// Whether a behaviour routine may retry with a fresh sample.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SimError::Action(ActionError::SelfTarget { .. } | ActionError::InvalidMove { .. })
        )
    }
}
