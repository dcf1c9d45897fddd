use robowar_protocol::{
    Event, Position, RobotId, RobotKind, RobotProfile, RobotSnapshot, Snapshot,
};
use tracing::debug;

use crate::{
    ActionError, Board, EntityQueue, GameRng, LinearScan, RandomSource, Robot, RobotArena,
    SpatialQuery, SpawnError,
};

/// Robot arena plus the two handle registries.
///
/// Every robot in the arena is referenced by exactly one registry: `active`
/// (alive, in turn rotation) or `revive` (dead, lives left).
#[derive(Clone, Debug, Default)]
pub struct Roster {
    pub(crate) robots: RobotArena,
    pub(crate) active: EntityQueue<RobotId>,
    pub(crate) revive: EntityQueue<RobotId>,
}

impl Roster {
    pub fn robot(&self, id: RobotId) -> Option<&Robot> {
        self.robots.get(id)
    }

    pub fn active(&self) -> &EntityQueue<RobotId> {
        &self.active
    }

    pub fn revive(&self) -> &EntityQueue<RobotId> {
        &self.revive
    }

    /// Robots still in the game, alive or awaiting revival.
    pub fn len(&self) -> usize {
        self.robots.len()
    }

    /// Active robots in rotation order.
    pub fn active_robots(&self) -> impl Iterator<Item = (RobotId, &Robot)> {
        self.active
            .iter()
            .filter_map(|&id| self.robots.get(id).map(|robot| (id, robot)))
    }

    pub fn find_by_name(&self, name: &str) -> Option<RobotId> {
        self.robots.id_of(name)
    }

    pub(crate) fn insert_active(&mut self, robot: Robot) -> Result<RobotId, SpawnError> {
        let id = self.robots.insert(robot)?;
        self.active.push_back(id);
        Ok(id)
    }
}

/// How a finished game ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// One robot left standing and nobody waiting to respawn.
    Winner { name: String },
    /// Every robot was destroyed.
    Extinct,
    TurnLimit,
}

/// Turns played before a game stops when no other limit is set.
pub const DEFAULT_TURN_LIMIT: u32 = 100;

/// Complete state of one game: board, robots, random stream, and the
/// event buffer for the current tick.
pub struct Simulation<R = GameRng> {
    pub(crate) board: Board,
    pub(crate) roster: Roster,
    pub(crate) rng: R,
    pub(crate) query: Box<dyn SpatialQuery>,
    pub(crate) turn: u32,
    pub(crate) turn_limit: Option<u32>,
    pub(crate) events: Vec<Event>,
}

impl<R: std::fmt::Debug> std::fmt::Debug for Simulation<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("board", &self.board)
            .field("turn", &self.turn)
            .field("turn_limit", &self.turn_limit)
            .field("active", &self.roster.active)
            .field("revive", &self.roster.revive)
            .field("query", &self.query)
            .field("rng", &self.rng)
            .finish_non_exhaustive()
    }
}

impl<R: RandomSource> Simulation<R> {
    pub fn new(board: Board, rng: R) -> Self {
        Self {
            board,
            roster: Roster::default(),
            rng,
            query: Box::new(LinearScan),
            turn: 1,
            turn_limit: Some(DEFAULT_TURN_LIMIT),
            events: Vec::new(),
        }
    }

    /// The game ends once `limit` turns have been played.
    pub fn with_turn_limit(mut self, limit: u32) -> Self {
        self.turn_limit = Some(limit);
        self
    }

    /// Plays until one robot is left, however long that takes. Robots that
    /// can never reach each other keep [`Simulation::run`] going forever.
    pub fn without_turn_limit(mut self) -> Self {
        self.turn_limit = None;
        self
    }

    pub fn with_spatial_query(mut self, query: impl SpatialQuery + 'static) -> Self {
        self.query = Box::new(query);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Turn about to be played.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn turn_limit(&self) -> Option<u32> {
        self.turn_limit
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn robot(&self, id: RobotId) -> Option<&Robot> {
        self.roster.robot(id)
    }

    pub fn robot_by_name(&self, name: &str) -> Option<(RobotId, &Robot)> {
        let id = self.roster.find_by_name(name)?;
        self.roster.robot(id).map(|robot| (id, robot))
    }

    pub fn occupant_at(&self, pos: Position) -> Option<RobotId> {
        self.query.occupant_at(&self.roster, pos)
    }

    /// Places a new robot at the back of the active registry. It first acts
    /// on the current turn.
    pub fn spawn(
        &mut self,
        name: impl Into<String>,
        kind: RobotKind,
        pos: Position,
    ) -> Result<RobotId, SpawnError> {
        let name = name.into();
        if !self.board.in_bounds(pos) {
            return Err(SpawnError::OutOfBounds { name, at: pos });
        }
        if let Some(occupant) = self.occupant_at(pos) {
            let occupant = self.robot_name(occupant).to_string();
            return Err(SpawnError::Occupied {
                name,
                at: pos,
                occupant,
            });
        }

        let mut robot = Robot::new(name, kind, pos);
        robot.next_turn = self.turn;
        let id = self.roster.insert_active(robot)?;
        debug!(robot = self.robot_name(id), %kind, x = pos.x, y = pos.y, "spawned");
        Ok(id)
    }

    /// Like [`Simulation::spawn`], on a random free cell.
    pub fn spawn_random(
        &mut self,
        name: impl Into<String>,
        kind: RobotKind,
    ) -> Result<RobotId, SpawnError> {
        self.spawn_random_avoiding(name.into(), kind, &[])
    }

    pub(crate) fn spawn_random_avoiding(
        &mut self,
        name: String,
        kind: RobotKind,
        reserved: &[Position],
    ) -> Result<RobotId, SpawnError> {
        match self.random_free_cell(reserved) {
            Some(pos) => self.spawn(name, kind, pos),
            None => Err(SpawnError::BoardFull(name)),
        }
    }

    /// Samples cells until one is free of active robots (and not
    /// `reserved`). Falls back to the first free cell in row-major order
    /// once the sampling budget is spent; `None` means the board is full.
    pub(crate) fn random_free_cell(&mut self, reserved: &[Position]) -> Option<Position> {
        let attempts = self.board.area().saturating_mul(4);
        for _ in 0..attempts {
            let pos = self.board.random_position(&mut self.rng);
            if !reserved.contains(&pos) && self.occupant_at(pos).is_none() {
                return Some(pos);
            }
        }

        self.query
            .free_cells(&self.board, &self.roster)
            .into_iter()
            .find(|pos| !reserved.contains(pos))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            turn: self.turn,
            width: self.board.width(),
            height: self.board.height(),
            robots: self
                .roster
                .active_robots()
                .map(|(id, robot)| RobotSnapshot {
                    id,
                    name: robot.name.clone(),
                    pos: robot.pos,
                })
                .collect(),
            awaiting_revival: self.roster.revive.len(),
        }
    }

    pub fn profile(&self, id: RobotId) -> Option<RobotProfile> {
        let robot = self.roster.robot(id)?;
        let loadout = &robot.loadout;
        Some(RobotProfile {
            name: robot.name.clone(),
            kind: robot.kind,
            pos: robot.pos,
            lives: robot.lives,
            look_range: loadout.look.map_or(0, |l| l.range),
            move_range: loadout.movement.map_or(0, |m| m.range),
            fire_range: loadout.fire.map_or(0, |f| f.range.to_raw()),
            can_trample: robot.can_trample(),
            kills_to_evolve: robot.kills_to_evolve,
        })
    }

    pub fn profile_by_name(&self, name: &str) -> Option<RobotProfile> {
        self.profile(self.roster.find_by_name(name)?)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        let active = self.roster.active.len();
        let waiting = self.roster.revive.len();

        if active + waiting == 0 {
            return Some(Outcome::Extinct);
        }
        if active == 1 && waiting == 0 {
            let name = self
                .roster
                .active_robots()
                .next()
                .map(|(_, robot)| robot.name.clone())
                .unwrap_or_default();
            return Some(Outcome::Winner { name });
        }
        match self.turn_limit {
            Some(limit) if self.turn > limit => Some(Outcome::TurnLimit),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.outcome().is_none()
    }

    /// Events emitted since the last tick report or drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: Event) {
        debug!(turn = self.turn, actor = event.actor().unwrap_or("-"), ?event, "event");
        self.events.push(event);
    }

    pub(crate) fn robot_ref(&self, id: RobotId) -> Result<&Robot, ActionError> {
        self.roster.robots.get(id).ok_or(ActionError::UnknownRobot(id))
    }

    pub(crate) fn robot_mut(&mut self, id: RobotId) -> Result<&mut Robot, ActionError> {
        self.roster
            .robots
            .get_mut(id)
            .ok_or(ActionError::UnknownRobot(id))
    }

    pub(crate) fn robot_name(&self, id: RobotId) -> &str {
        self.roster.robots.get(id).map_or("?", |robot| robot.name.as_str())
    }
}
