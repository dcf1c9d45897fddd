//! Look / move / fire / trample primitives.
//!
//! Each primitive checks that the acting robot carries the capability,
//! validates the offset against the board, and emits the matching event.
//! Kills are delegated to the combat resolver.

use robowar_protocol::{Event, Offset, RobotId};

use crate::{
    ActionError, Capability, Cell, RandomSource, Robot, SimError, Simulation,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FireOutcome {
    Miss,
    Hit(RobotId),
}

impl<R: RandomSource> Simulation<R> {
    /// Looks at one offset. Cells outside the board come back with
    /// `valid == false`; that is a normal result, not an error.
    pub fn look(&mut self, id: RobotId, offset: Offset) -> Result<Cell, SimError> {
        let from = self.equipped(id, Capability::Look)?.pos;
        let Some(pos) = self.board.target(from, offset) else {
            return Ok(Cell {
                offset,
                pos: from + offset,
                valid: false,
                occupant: None,
            });
        };

        let occupant = self
            .query
            .occupant_at(&self.roster, pos)
            .filter(|&other| other != id);
        if let Some(enemy) = occupant {
            self.emit(Event::EnemySpotted {
                robot: self.robot_name(id).to_string(),
                enemy: self.robot_name(enemy).to_string(),
                at: pos,
            });
        }

        Ok(Cell {
            offset,
            pos,
            valid: true,
            occupant,
        })
    }

    /// Moves by `offset`. Returns `Ok(false)` when a non-trampling robot is
    /// blocked by an occupant. Trampling robots always move and then
    /// trample whoever was there.
    pub fn move_by(&mut self, id: RobotId, offset: Offset) -> Result<bool, SimError> {
        let robot = self.equipped(id, Capability::Move)?;
        let tramples = robot.can_trample();

        let target = match self.board.target(robot.pos, offset) {
            Some(target) if !offset.is_zero() => target,
            _ => {
                return Err(ActionError::InvalidMove {
                    robot: robot.name.clone(),
                    to: robot.pos + offset,
                }
                .into())
            }
        };

        let blocked = self
            .query
            .occupant_at(&self.roster, target)
            .is_some_and(|other| other != id);
        if blocked && !tramples {
            return Ok(false);
        }

        self.robot_mut(id)?.pos = target;
        self.emit(Event::Move {
            robot: self.robot_name(id).to_string(),
            to: target,
        });

        if tramples {
            self.trample(id)?;
        }
        Ok(true)
    }

    /// Fires at `offset`. Range is not checked here beyond the board edge;
    /// decision routines only sample offsets within their range.
    pub fn fire(&mut self, id: RobotId, offset: Offset) -> Result<FireOutcome, SimError> {
        let robot = self.equipped(id, Capability::Fire)?;

        if offset.is_zero() {
            return Err(ActionError::SelfTarget {
                robot: robot.name.clone(),
            }
            .into());
        }
        let Some(target) = self.board.target(robot.pos, offset) else {
            return Err(ActionError::InvalidMove {
                robot: robot.name.clone(),
                to: robot.pos + offset,
            }
            .into());
        };

        let shooter = robot.name.clone();
        self.emit(Event::Fire {
            robot: shooter.clone(),
            at: target,
        });

        let victim = self
            .query
            .occupant_at(&self.roster, target)
            .filter(|&other| other != id);
        match victim {
            Some(victim) => {
                self.emit(Event::FireHit {
                    robot: shooter,
                    victim: self.robot_name(victim).to_string(),
                });
                self.kill(id, victim)?;
                Ok(FireOutcome::Hit(victim))
            }
            None => Ok(FireOutcome::Miss),
        }
    }

    /// Kills the first other active robot sharing this robot's cell.
    pub fn trample(&mut self, id: RobotId) -> Result<Option<RobotId>, SimError> {
        let pos = self.equipped(id, Capability::Trample)?.pos;

        let victim = self
            .query
            .occupants_at(&self.roster, pos)
            .into_iter()
            .find(|&other| other != id);
        let Some(victim) = victim else {
            return Ok(None);
        };

        self.emit(Event::Trample {
            robot: self.robot_name(id).to_string(),
            victim: self.robot_name(victim).to_string(),
        });
        self.kill(id, victim)?;
        Ok(Some(victim))
    }

    fn equipped(&self, id: RobotId, capability: Capability) -> Result<&Robot, ActionError> {
        let robot = self.robot_ref(id)?;
        if robot.loadout.has(capability) {
            Ok(robot)
        } else {
            Err(ActionError::MissingCapability {
                robot: robot.name.clone(),
                capability,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use robowar_protocol::{Position, RobotKind};

    use super::*;
    use crate::{Board, GameRng};

    fn sim() -> Simulation {
        Simulation::new(Board::new(5, 5), GameRng::seed_from_u64(3))
    }

    #[test]
    fn look_reports_bounds_and_occupants() {
        let mut sim = sim();
        let cop = sim.spawn("Cop", RobotKind::RoboCop, Position::new(0, 0)).unwrap();
        let bot = sim.spawn("Bot", RobotKind::MadBot, Position::new(1, 0)).unwrap();

        let outside = sim.look(cop, Offset::new(-1, 0)).unwrap();
        assert!(!outside.valid);
        assert_eq!(outside.occupant, None);

        let empty = sim.look(cop, Offset::new(0, 1)).unwrap();
        assert!(empty.is_free());

        let spotted = sim.look(cop, Offset::new(1, 0)).unwrap();
        assert_eq!(spotted.occupant, Some(bot));
        assert_eq!(
            sim.drain_events(),
            vec![Event::EnemySpotted {
                robot: "Cop".to_string(),
                enemy: "Bot".to_string(),
                at: Position::new(1, 0),
            }]
        );
    }

    #[test]
    fn invalid_moves_fail_and_leave_position() {
        let mut sim = sim();
        let cop = sim.spawn("Cop", RobotKind::RoboCop, Position::new(0, 0)).unwrap();

        for offset in [Offset::ZERO, Offset::new(-1, 0), Offset::new(0, -1)] {
            let err = sim.move_by(cop, offset).unwrap_err();
            assert!(matches!(err, SimError::Action(ActionError::InvalidMove { .. })));
            assert_eq!(sim.robot(cop).unwrap().pos, Position::new(0, 0));
        }
    }

    #[test]
    fn blocked_move_returns_false() {
        let mut sim = sim();
        let cop = sim.spawn("Cop", RobotKind::RoboCop, Position::new(2, 2)).unwrap();
        sim.spawn("Bot", RobotKind::MadBot, Position::new(3, 2)).unwrap();

        assert_eq!(sim.move_by(cop, Offset::new(1, 0)), Ok(false));
        assert_eq!(sim.robot(cop).unwrap().pos, Position::new(2, 2));
        assert!(sim.drain_events().is_empty());

        assert_eq!(sim.move_by(cop, Offset::new(0, 1)), Ok(true));
        assert_eq!(sim.robot(cop).unwrap().pos, Position::new(2, 3));
    }

    #[test]
    fn trampling_move_kills_exactly_once() {
        let mut sim = sim();
        let hunter = sim.spawn("T", RobotKind::Terminator, Position::new(2, 2)).unwrap();
        let prey = sim.spawn("P", RobotKind::MadBot, Position::new(2, 1)).unwrap();

        assert_eq!(sim.move_by(hunter, Offset::new(0, -1)), Ok(true));
        assert_eq!(sim.robot(hunter).unwrap().pos, Position::new(2, 1));
        assert_eq!(sim.robot(prey).unwrap().lives, 2);
        assert!(sim.roster().revive().contains(&prey));
        assert_eq!(sim.robot(hunter).unwrap().kills_to_evolve, 2);

        let tramples = sim
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, Event::Trample { .. }))
            .count();
        assert_eq!(tramples, 1);
    }

    #[test]
    fn extreme_offsets_are_rejected_without_overflow() {
        let mut sim = sim();
        let cop = sim.spawn("Cop", RobotKind::RoboCop, Position::new(2, 2)).unwrap();

        assert!(matches!(
            sim.move_by(cop, Offset::new(i32::MAX, 0)),
            Err(SimError::Action(ActionError::InvalidMove { .. }))
        ));
        assert_eq!(sim.robot(cop).unwrap().pos, Position::new(2, 2));

        let err = sim.fire(cop, Offset::new(0, i32::MAX)).unwrap_err();
        assert!(err.is_retryable());

        let cell = sim.look(cop, Offset::new(i32::MAX, i32::MIN)).unwrap();
        assert!(!cell.valid);
        assert_eq!(cell.occupant, None);
        assert!(sim.drain_events().is_empty());
    }

    #[test]
    fn fire_validates_target() {
        let mut sim = sim();
        let bot = sim.spawn("Bot", RobotKind::MadBot, Position::new(0, 0)).unwrap();

        assert!(matches!(
            sim.fire(bot, Offset::ZERO),
            Err(SimError::Action(ActionError::SelfTarget { .. }))
        ));
        assert!(matches!(
            sim.fire(bot, Offset::new(-1, -1)),
            Err(SimError::Action(ActionError::InvalidMove { .. }))
        ));
        assert_eq!(sim.fire(bot, Offset::new(1, 1)), Ok(FireOutcome::Miss));
        assert_eq!(
            sim.drain_events(),
            vec![Event::Fire {
                robot: "Bot".to_string(),
                at: Position::new(1, 1),
            }]
        );
    }

    #[test]
    fn capabilities_are_checked() {
        let mut sim = sim();
        let tank = sim.spawn("Tank", RobotKind::RoboTank, Position::new(0, 0)).unwrap();

        let err = sim.move_by(tank, Offset::new(1, 0)).unwrap_err();
        assert_eq!(
            err,
            SimError::Action(ActionError::MissingCapability {
                robot: "Tank".to_string(),
                capability: Capability::Move,
            })
        );
        assert!(!err.is_retryable());
        assert!(sim.trample(tank).is_err());
        assert!(sim.look(tank, Offset::new(1, 0)).is_err());
    }
}
