use robowar_protocol::{Event, RobotId};
use tracing::{debug, info};

use crate::{CombatError, RandomSource, SimError, Simulation};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KillOutcome {
    /// Victim moved to the back of the revive registry.
    AwaitingRevival { lives_left: u8 },
    /// Victim lost its last life and was removed from the game.
    Destroyed,
}

impl<R: RandomSource> Simulation<R> {
    /// Takes a life from `victim`, credits `killer`, and moves the victim
    /// out of the active registry.
    pub fn kill(&mut self, killer: RobotId, victim: RobotId) -> Result<KillOutcome, SimError> {
        let index = self
            .roster
            .active
            .position(|&id| id == victim)
            .ok_or_else(|| CombatError::NotActive {
                robot: self.robot_name(victim).to_string(),
            })?;

        let lives_left = self.robot_mut(victim)?.lose_life()?;
        let crossed = self.robot_mut(killer)?.add_kill(1)?;
        if crossed > 0 {
            debug!(robot = self.robot_name(killer), "ready to evolve");
        }

        self.roster.active.erase_at(index)?;

        if lives_left > 0 {
            self.roster.revive.push_back(victim);
            debug!(robot = self.robot_name(victim), lives_left, "queued for revival");
            Ok(KillOutcome::AwaitingRevival { lives_left })
        } else {
            let name = self
                .roster
                .robots
                .remove(victim)
                .map(|robot| robot.name)
                .unwrap_or_default();
            info!(robot = %name, "destroyed");
            self.emit(Event::Destroyed { robot: name });
            Ok(KillOutcome::Destroyed)
        }
    }

    /// Brings `id` back from the revive registry onto a random free cell at
    /// the back of the active registry. It acts on the current turn.
    ///
    /// Returns `Ok(false)` and leaves the robot waiting when no cell is free.
    pub fn revive(&mut self, id: RobotId) -> Result<bool, SimError> {
        let index = self
            .roster
            .revive
            .position(|&r| r == id)
            .ok_or_else(|| CombatError::NotAwaitingRevival {
                robot: self.robot_name(id).to_string(),
            })?;

        let Some(pos) = self.random_free_cell(&[]) else {
            debug!(robot = self.robot_name(id), "no free cell, revival deferred");
            return Ok(false);
        };

        self.roster.revive.erase_at(index)?;
        let turn = self.turn;
        let robot = self.robot_mut(id)?;
        robot.next_turn = turn;
        robot.pos = pos;
        let (name, lives) = (robot.name.clone(), robot.lives);
        self.roster.active.push_back(id);

        self.emit(Event::Revive {
            robot: name,
            at: pos,
            lives,
        });
        Ok(true)
    }

    /// Revives the robot at the front of the revive registry, if any.
    pub fn revive_next(&mut self) -> Result<Option<RobotId>, SimError> {
        let Ok(&id) = self.roster.revive.front() else {
            return Ok(None);
        };
        Ok(self.revive(id)?.then_some(id))
    }

    /// Applies a pending evolution. Robots at the top of their chain just
    /// drop the flag.
    pub fn evolve(&mut self, id: RobotId) -> Result<bool, SimError> {
        let robot = self.robot_mut(id)?;
        if !robot.ready_to_evolve {
            return Ok(false);
        }
        robot.ready_to_evolve = false;

        let from = robot.kind;
        let Some(into) = from.evolves_into() else {
            return Ok(false);
        };
        robot.become_kind(into);
        let name = robot.name.clone();

        info!(robot = %name, %from, %into, "evolved");
        self.emit(Event::Evolve {
            robot: name,
            from,
            into,
        });
        Ok(true)
    }
}
