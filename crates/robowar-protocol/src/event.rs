use serde::{Deserialize, Serialize};

use crate::{Position, RobotKind};

/// Everything the simulation reports while advancing. Fully serializable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    // Game flow
    TurnStarted {
        turn: u32,
    },
    TurnEnded {
        turn: u32,
    },

    // Perception
    EnemySpotted {
        robot: String,
        enemy: String,
        at: Position,
    },

    // Actions
    Move {
        robot: String,
        to: Position,
    },
    Fire {
        robot: String,
        at: Position,
    },
    FireHit {
        robot: String,
        victim: String,
    },
    Trample {
        robot: String,
        victim: String,
    },

    // Lifecycle
    Evolve {
        robot: String,
        from: RobotKind,
        into: RobotKind,
    },
    Revive {
        robot: String,
        at: Position,
        lives: u8,
    },
    /// A robot lost its last life and left the game for good.
    Destroyed {
        robot: String,
    },
}

impl Event {
    /// Name of the robot that caused the event, if any.
    pub fn actor(&self) -> Option<&str> {
        match self {
            Event::TurnStarted { .. } | Event::TurnEnded { .. } => None,
            Event::EnemySpotted { robot, .. }
            | Event::Move { robot, .. }
            | Event::Fire { robot, .. }
            | Event::FireHit { robot, .. }
            | Event::Trample { robot, .. }
            | Event::Evolve { robot, .. }
            | Event::Revive { robot, .. }
            | Event::Destroyed { robot } => Some(robot),
        }
    }
}
