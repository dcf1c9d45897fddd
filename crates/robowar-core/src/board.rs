use std::fmt::Debug;

use robowar_protocol::{Offset, Position, RobotId};

use crate::{RandomSource, Roster};

/// Fixed board dimensions. Occupancy is never stored here; it is derived
/// from the active registry on demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    width: u32,
    height: u32,
}

impl Board {
    /// Largest side length; every cell must be addressable with `i32`.
    pub const MAX_SIDE: u32 = i32::MAX as u32;

    /// # Panics
    ///
    /// If either side is zero or above [`Board::MAX_SIDE`]. Use
    /// [`Board::try_new`] for untrusted dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self::try_new(width, height).expect("board sides must be in 1..=i32::MAX")
    }

    pub fn try_new(width: u32, height: u32) -> Option<Self> {
        let valid = |side: u32| (1..=Self::MAX_SIDE).contains(&side);
        (valid(width) && valid(height)).then_some(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Cell reached from `from` by `offset`, if it is on the board.
    #[inline]
    pub fn target(&self, from: Position, offset: Offset) -> Option<Position> {
        from.checked_offset(offset).filter(|&pos| self.in_bounds(pos))
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |y| (0..w).map(move |x| Position::new(x, y)))
    }

    pub fn random_position(&self, rng: &mut impl RandomSource) -> Position {
        let x = rng.uniform_int(0, self.width as i32 - 1);
        let y = rng.uniform_int(0, self.height as i32 - 1);
        Position::new(x, y)
    }
}

/// Result of looking at one offset from a robot. Produced per query and
/// never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Offset that produced this cell.
    pub offset: Offset,
    pub pos: Position,
    /// Inside the board bounds.
    pub valid: bool,
    pub occupant: Option<RobotId>,
}

impl Cell {
    pub fn is_free(&self) -> bool {
        self.valid && self.occupant.is_none()
    }
}

/// Occupancy lookup over the active registry.
///
/// Capability code only talks to this trait, so a bucketed index can stand
/// in for the linear scan without touching move/fire/trample logic.
pub trait SpatialQuery: Debug {
    /// Every active robot on `pos`, in registry order.
    fn occupants_at(&self, roster: &Roster, pos: Position) -> Vec<RobotId>;

    /// First active robot on `pos`, in registry order.
    fn occupant_at(&self, roster: &Roster, pos: Position) -> Option<RobotId> {
        self.occupants_at(roster, pos).into_iter().next()
    }

    /// In-bounds cells with no active robot, row-major.
    fn free_cells(&self, board: &Board, roster: &Roster) -> Vec<Position> {
        board
            .cells()
            .filter(|&pos| self.occupant_at(roster, pos).is_none())
            .collect()
    }
}

/// O(n) scan of the active registry per query. Fine for the handful of
/// robots a game holds.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearScan;

impl SpatialQuery for LinearScan {
    fn occupants_at(&self, roster: &Roster, pos: Position) -> Vec<RobotId> {
        roster
            .active_robots()
            .filter(|(_, robot)| robot.pos == pos)
            .map(|(id, _)| id)
            .collect()
    }

    fn occupant_at(&self, roster: &Roster, pos: Position) -> Option<RobotId> {
        roster
            .active_robots()
            .find(|(_, robot)| robot.pos == pos)
            .map(|(id, _)| id)
    }

    fn free_cells(&self, board: &Board, roster: &Roster) -> Vec<Position> {
        let taken: std::collections::HashSet<Position> =
            roster.active_robots().map(|(_, robot)| robot.pos).collect();
        board.cells().filter(|pos| !taken.contains(pos)).collect()
    }
}
