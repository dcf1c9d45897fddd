use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of robot archetypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RobotKind {
    RoboCop,
    Terminator,
    TerminatorRoboCop,
    BlueThunder,
    MadBot,
    RoboTank,
    UltimateRobot,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown robot type: {0}")]
pub struct UnknownRobotKind(pub String);

impl RobotKind {
    pub const ALL: [RobotKind; 7] = [
        RobotKind::RoboCop,
        RobotKind::Terminator,
        RobotKind::TerminatorRoboCop,
        RobotKind::BlueThunder,
        RobotKind::MadBot,
        RobotKind::RoboTank,
        RobotKind::UltimateRobot,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            RobotKind::RoboCop => "RoboCop",
            RobotKind::Terminator => "Terminator",
            RobotKind::TerminatorRoboCop => "TerminatorRoboCop",
            RobotKind::BlueThunder => "BlueThunder",
            RobotKind::MadBot => "MadBot",
            RobotKind::RoboTank => "RoboTank",
            RobotKind::UltimateRobot => "UltimateRobot",
        }
    }

    /// Archetype a robot of this kind becomes after three kill credits.
    pub const fn evolves_into(self) -> Option<RobotKind> {
        match self {
            RobotKind::RoboCop | RobotKind::Terminator => Some(RobotKind::TerminatorRoboCop),
            RobotKind::TerminatorRoboCop => Some(RobotKind::UltimateRobot),
            RobotKind::BlueThunder => Some(RobotKind::MadBot),
            RobotKind::MadBot => Some(RobotKind::RoboTank),
            RobotKind::RoboTank => Some(RobotKind::UltimateRobot),
            RobotKind::UltimateRobot => None,
        }
    }
}

impl fmt::Display for RobotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RobotKind {
    type Err = UnknownRobotKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RobotKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownRobotKind(s.to_string()))
    }
}
