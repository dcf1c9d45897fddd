use std::fmt;

use robowar_protocol::{Position, RobotKind};
use serde::{Deserialize, Serialize};

use crate::CombatError;

pub const STARTING_LIVES: u8 = 3;
pub const KILLS_PER_EVOLUTION: i32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    Look,
    Move,
    Fire,
    Trample,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Look => "look",
            Capability::Move => "move",
            Capability::Fire => "fire",
            Capability::Trample => "trample",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookSpec {
    pub range: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSpec {
    pub range: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireRange {
    Bounded(u32),
    /// Any cell on the board.
    Unbounded,
}

impl FireRange {
    /// Wire value: the bound, or `-1` for unbounded.
    pub fn to_raw(self) -> i32 {
        match self {
            FireRange::Bounded(r) => r as i32,
            FireRange::Unbounded => -1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirePattern {
    /// Sample targets uniformly within range.
    Random,
    /// Sweep the 8 neighbours clockwise from north, one step per shot.
    Clockwise,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireSpec {
    pub range: FireRange,
    pub shots: u32,
    pub pattern: FirePattern,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrampleSpec;

/// Which capabilities a robot carries. Archetypes differ only in this
/// composition; the decision routine reads it to pick actions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    pub look: Option<LookSpec>,
    pub movement: Option<MoveSpec>,
    pub fire: Option<FireSpec>,
    pub trample: Option<TrampleSpec>,
}

impl Loadout {
    pub fn for_kind(kind: RobotKind) -> Self {
        const LOOK: Option<LookSpec> = Some(LookSpec { range: 1 });
        const STEP: Option<MoveSpec> = Some(MoveSpec { range: 1 });
        const TRAMPLE: Option<TrampleSpec> = Some(TrampleSpec);

        let fire = |range, shots, pattern| Some(FireSpec { range, shots, pattern });

        match kind {
            RobotKind::RoboCop => Loadout {
                look: LOOK,
                movement: STEP,
                fire: fire(FireRange::Bounded(10), 3, FirePattern::Random),
                trample: None,
            },
            RobotKind::Terminator => Loadout {
                look: LOOK,
                movement: STEP,
                fire: None,
                trample: TRAMPLE,
            },
            RobotKind::TerminatorRoboCop => Loadout {
                look: LOOK,
                movement: STEP,
                fire: fire(FireRange::Bounded(10), 3, FirePattern::Random),
                trample: TRAMPLE,
            },
            RobotKind::BlueThunder => Loadout {
                fire: fire(FireRange::Bounded(1), 1, FirePattern::Clockwise),
                ..Loadout::default()
            },
            RobotKind::MadBot => Loadout {
                fire: fire(FireRange::Bounded(1), 1, FirePattern::Random),
                ..Loadout::default()
            },
            RobotKind::RoboTank => Loadout {
                fire: fire(FireRange::Unbounded, 1, FirePattern::Random),
                ..Loadout::default()
            },
            RobotKind::UltimateRobot => Loadout {
                look: LOOK,
                movement: STEP,
                fire: fire(FireRange::Unbounded, 3, FirePattern::Random),
                trample: TRAMPLE,
            },
        }
    }

    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Look => self.look.is_some(),
            Capability::Move => self.movement.is_some(),
            Capability::Fire => self.fire.is_some(),
            Capability::Trample => self.trample.is_some(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Robot {
    pub name: String,
    pub kind: RobotKind,
    pub loadout: Loadout,
    pub pos: Position,
    pub lives: u8,
    pub kills_to_evolve: i32,
    /// Turn on which this robot acts next.
    pub next_turn: u32,
    pub ready_to_evolve: bool,
    /// Next step of a clockwise fire pattern.
    pub fire_cursor: u8,
}

impl Robot {
    pub fn new(name: impl Into<String>, kind: RobotKind, pos: Position) -> Self {
        Self {
            name: name.into(),
            kind,
            loadout: Loadout::for_kind(kind),
            pos,
            lives: STARTING_LIVES,
            kills_to_evolve: KILLS_PER_EVOLUTION,
            next_turn: 1,
            ready_to_evolve: false,
            fire_cursor: 0,
        }
    }

    pub fn can_trample(&self) -> bool {
        self.loadout.trample.is_some()
    }

    /// Takes one life and returns how many remain.
    pub fn lose_life(&mut self) -> Result<u8, CombatError> {
        if self.lives == 0 {
            return Err(CombatError::NoLivesLeft {
                robot: self.name.clone(),
            });
        }
        self.lives -= 1;
        Ok(self.lives)
    }

    /// Credits kills towards the next evolution and returns how many
    /// evolution thresholds were crossed.
    pub fn add_kill(&mut self, credits: i32) -> Result<u32, CombatError> {
        if credits < 0 {
            return Err(CombatError::NegativeCredit(credits));
        }

        self.kills_to_evolve -= credits;
        let mut crossed = 0;
        while self.kills_to_evolve <= 0 {
            self.kills_to_evolve += KILLS_PER_EVOLUTION;
            crossed += 1;
        }
        if crossed > 0 {
            self.ready_to_evolve = true;
        }
        Ok(crossed)
    }

    /// Switches to `kind`, replacing the whole capability set.
    pub fn become_kind(&mut self, kind: RobotKind) {
        self.kind = kind;
        self.loadout = Loadout::for_kind(kind);
        self.fire_cursor = 0;
    }
}
