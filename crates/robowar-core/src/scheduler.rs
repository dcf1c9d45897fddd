use robowar_protocol::Event;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{Outcome, RandomSource, SimError, Simulation};

/// Everything that happened during one tick, in emission order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn: u32,
    pub events: Vec<Event>,
}

impl<R: RandomSource> Simulation<R> {
    /// Plays one game turn.
    ///
    /// At most one robot is revived first. Then every active robot due this
    /// turn is popped from the front, evolves if flagged, acts, and goes to
    /// the back of the registry.
    pub fn advance_turn(&mut self) -> Result<TurnReport, SimError> {
        let turn = self.turn;
        info!(
            turn,
            active = self.roster.active.len(),
            awaiting = self.roster.revive.len(),
            "turn started"
        );
        self.emit(Event::TurnStarted { turn });

        self.revive_next()?;

        while let Ok(&id) = self.roster.active.front() {
            if self.robot_ref(id)?.next_turn != turn {
                break;
            }
            self.roster.active.pop_front()?;

            // Requeue before surfacing a failure so the registry stays whole.
            let acted = self.evolve(id).and_then(|_| self.act(id));
            self.robot_mut(id)?.next_turn = turn + 1;
            self.roster.active.push_back(id);
            acted?;
        }

        self.emit(Event::TurnEnded { turn });
        self.turn += 1;
        info!(turn, active = self.roster.active.len(), "turn ended");

        Ok(TurnReport {
            turn,
            events: self.drain_events(),
        })
    }

    /// Advances until the game ends. New games stop after
    /// [`DEFAULT_TURN_LIMIT`](crate::DEFAULT_TURN_LIMIT) turns; after
    /// [`without_turn_limit`](Simulation::without_turn_limit) this only
    /// returns once a single robot is left or none are.
    pub fn run(&mut self) -> Result<Outcome, SimError> {
        loop {
            if let Some(outcome) = self.outcome() {
                return Ok(outcome);
            }
            self.advance_turn()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use robowar_protocol::{Position, RobotKind};

    use super::*;
    use crate::{Board, GameRng};

    fn sim(width: u32, height: u32) -> Simulation {
        Simulation::new(Board::new(width, height), GameRng::seed_from_u64(5))
    }

    #[test]
    fn every_robot_acts_once_and_order_is_kept() {
        let mut sim = sim(9, 9);
        let a = sim.spawn("A", RobotKind::BlueThunder, Position::new(0, 0)).unwrap();
        let b = sim.spawn("B", RobotKind::BlueThunder, Position::new(8, 8)).unwrap();

        let report = sim.advance_turn().unwrap();
        assert_eq!(report.turn, 1);
        assert_eq!(sim.turn(), 2);
        assert_eq!(sim.roster().active().iter().copied().collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(sim.robot(a).unwrap().next_turn, 2);
        assert_eq!(sim.robot(b).unwrap().next_turn, 2);

        assert_eq!(report.events.first(), Some(&Event::TurnStarted { turn: 1 }));
        assert_eq!(report.events.last(), Some(&Event::TurnEnded { turn: 1 }));
        let shooters: Vec<&str> = report
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Fire { robot, .. } => Some(robot.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(shooters, vec!["A", "B"]);
    }

    #[test]
    fn revived_robot_acts_in_the_same_tick() {
        let mut sim = sim(3, 3);
        let a = sim.spawn("A", RobotKind::BlueThunder, Position::new(0, 0)).unwrap();
        let b = sim.spawn("B", RobotKind::BlueThunder, Position::new(2, 2)).unwrap();
        sim.kill(a, b).unwrap();
        // Leave B alone in the revive registry.
        sim.roster.robots.get_mut(a).unwrap().lives = 1;
        sim.kill(b, a).unwrap();
        sim.drain_events();

        let report = sim.advance_turn().unwrap();
        let kinds: Vec<&str> = report
            .events
            .iter()
            .map(|e| match e {
                Event::TurnStarted { .. } => "start",
                Event::Revive { .. } => "revive",
                Event::Fire { .. } => "fire",
                Event::TurnEnded { .. } => "end",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["start", "revive", "fire", "end"]);
        assert_eq!(sim.robot(b).unwrap().next_turn, 2);
        assert_eq!(
            sim.outcome(),
            Some(Outcome::Winner {
                name: "B".to_string()
            })
        );
    }

    #[test]
    fn pending_evolution_applies_before_acting() {
        let mut sim = sim(9, 9);
        let bot = sim.spawn("Mad", RobotKind::MadBot, Position::new(4, 4)).unwrap();
        sim.spawn("Far", RobotKind::BlueThunder, Position::new(0, 0)).unwrap();
        sim.roster.robots.get_mut(bot).unwrap().ready_to_evolve = true;

        let report = sim.advance_turn().unwrap();
        assert_eq!(
            report.events[1],
            Event::Evolve {
                robot: "Mad".to_string(),
                from: RobotKind::MadBot,
                into: RobotKind::RoboTank,
            }
        );
        assert_eq!(sim.robot(bot).unwrap().kind, RobotKind::RoboTank);
    }

    #[test]
    fn run_stops_at_turn_limit() {
        let mut sim = sim(9, 9).with_turn_limit(4);
        sim.spawn("A", RobotKind::BlueThunder, Position::new(0, 0)).unwrap();
        sim.spawn("B", RobotKind::BlueThunder, Position::new(8, 8)).unwrap();

        assert_eq!(sim.run(), Ok(Outcome::TurnLimit));
        assert_eq!(sim.turn(), 5);
    }

    #[test]
    fn new_games_stop_at_default_limit() {
        let mut sim = sim(9, 9);
        sim.spawn("A", RobotKind::BlueThunder, Position::new(0, 0)).unwrap();
        sim.spawn("B", RobotKind::BlueThunder, Position::new(8, 8)).unwrap();
        assert_eq!(sim.turn_limit(), Some(crate::DEFAULT_TURN_LIMIT));

        assert_eq!(sim.run(), Ok(Outcome::TurnLimit));
        assert_eq!(sim.turn(), crate::DEFAULT_TURN_LIMIT + 1);

        assert_eq!(sim.without_turn_limit().turn_limit(), None);
    }
}
