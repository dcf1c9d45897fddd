use serde::{Deserialize, Serialize};

use crate::{Position, RobotId, RobotKind};

/// Per-turn view of the board for presentation layers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub turn: u32,
    pub width: u32,
    pub height: u32,
    /// Active robots in rotation order.
    pub robots: Vec<RobotSnapshot>,
    /// Robots waiting in the revive registry.
    pub awaiting_revival: usize,
}

/// Compact robot state: identity and position only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotSnapshot {
    pub id: RobotId,
    pub name: String,
    pub pos: Position,
}

/// Descriptive attributes of one robot, for a "focused robot" panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotProfile {
    pub name: String,
    pub kind: RobotKind,
    pub pos: Position,
    pub lives: u8,
    pub look_range: u32,
    pub move_range: u32,
    /// `-1` means the robot can hit any cell on the board.
    pub fire_range: i32,
    pub can_trample: bool,
    pub kills_to_evolve: i32,
}
