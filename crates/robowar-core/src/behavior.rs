//! Per-turn decision routines.
//!
//! A robot's routine is derived entirely from its loadout: scan if it can
//! look, hunt or wander if it can move, then spend its shots if it can fire.

use robowar_protocol::{Offset, RobotId};
use tracing::debug;

use crate::{Cell, FirePattern, FireRange, FireSpec, RandomSource, SimError, Simulation};

/// Samples allowed per shot before a random shooter gives up for the turn.
pub const MAX_SHOT_ATTEMPTS: u32 = 32;

impl<R: RandomSource> Simulation<R> {
    /// Runs one scheduled action for `id`.
    pub(crate) fn act(&mut self, id: RobotId) -> Result<(), SimError> {
        let loadout = self.robot_ref(id)?.loadout;

        let spotted = match loadout.look {
            Some(look) => self.scan(id, look.range)?,
            None => Vec::new(),
        };

        if let Some(movement) = loadout.movement {
            let hunted = loadout.trample.is_some() && self.hunt(id, &spotted, movement.range)?;
            if !hunted {
                self.wander(id, movement.range)?;
            }
        }

        if let Some(fire) = loadout.fire {
            match fire.pattern {
                FirePattern::Random => self.fire_randomly(id, fire)?,
                FirePattern::Clockwise => self.fire_clockwise(id, fire.shots)?,
            }
        }
        Ok(())
    }

    /// Looks at every offset within `range`, row-major, and returns the
    /// cells holding another robot.
    pub(crate) fn scan(&mut self, id: RobotId, range: u32) -> Result<Vec<Cell>, SimError> {
        let mut spotted = Vec::new();
        for offset in Offset::square(range) {
            let cell = self.look(id, offset)?;
            if cell.occupant.is_some() {
                spotted.push(cell);
            }
        }
        Ok(spotted)
    }

    /// Steps onto the first spotted robot within reach.
    fn hunt(&mut self, id: RobotId, spotted: &[Cell], range: u32) -> Result<bool, SimError> {
        let reachable = spotted
            .iter()
            .find(|cell| cell.offset.dx.unsigned_abs() <= range && cell.offset.dy.unsigned_abs() <= range);
        match reachable {
            Some(cell) => self.move_by(id, cell.offset),
            None => Ok(false),
        }
    }

    /// Moves to a random free cell within `range`. Boxed-in robots stay put.
    fn wander(&mut self, id: RobotId, range: u32) -> Result<bool, SimError> {
        let pos = self.robot_ref(id)?.pos;
        let candidates: Vec<Offset> = Offset::square(range)
            .filter(|&offset| {
                self.board
                    .target(pos, offset)
                    .is_some_and(|target| self.occupant_at(target).is_none())
            })
            .collect();

        if candidates.is_empty() {
            debug!(robot = self.robot_name(id), "no free cell to move to");
            return Ok(false);
        }
        let pick = candidates[self.rng.pick_index(candidates.len())];
        self.move_by(id, pick)
    }

    fn fire_randomly(&mut self, id: RobotId, spec: FireSpec) -> Result<(), SimError> {
        for _ in 0..spec.shots {
            if !self.fire_one_random(id, spec.range)? {
                debug!(robot = self.robot_name(id), "no valid target, holding fire");
                break;
            }
        }
        Ok(())
    }

    fn fire_one_random(&mut self, id: RobotId, range: FireRange) -> Result<bool, SimError> {
        for _ in 0..MAX_SHOT_ATTEMPTS {
            let offset = self.sample_fire_offset(id, range)?;
            match self.fire(id, offset) {
                Ok(_) => return Ok(true),
                Err(err) if err.is_retryable() => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(false)
    }

    /// Bounded ranges sample a square around the shooter. Unbounded ones
    /// sample any board cell.
    fn sample_fire_offset(&mut self, id: RobotId, range: FireRange) -> Result<Offset, SimError> {
        let pos = self.robot_ref(id)?.pos;
        let offset = match range {
            FireRange::Bounded(r) => {
                let r = r.min(i32::MAX as u32) as i32;
                let dx = self.rng.uniform_int(-r, r);
                let dy = self.rng.uniform_int(-r, r);
                Offset::new(dx, dy)
            }
            FireRange::Unbounded => self.board.random_position(&mut self.rng) - pos,
        };
        Ok(offset)
    }

    /// Fires at the next in-bounds neighbour clockwise from the cursor.
    fn fire_clockwise(&mut self, id: RobotId, shots: u32) -> Result<(), SimError> {
        for _ in 0..shots {
            let mut target = None;
            for _ in 0..Offset::CLOCKWISE.len() {
                let robot = self.robot_mut(id)?;
                let offset = Offset::CLOCKWISE[robot.fire_cursor as usize % Offset::CLOCKWISE.len()];
                robot.fire_cursor = (robot.fire_cursor + 1) % Offset::CLOCKWISE.len() as u8;
                let from = robot.pos;
                if self.board.target(from, offset).is_some() {
                    target = Some(offset);
                    break;
                }
            }

            let Some(offset) = target else {
                debug!(robot = self.robot_name(id), "no neighbour on the board");
                break;
            };
            self.fire(id, offset)?;
        }
        Ok(())
    }
}
