use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Absolute board coordinate. `x` grows to the right, `y` grows downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `None` when the target leaves the `i32` range, which is always off
    /// the board.
    #[inline]
    pub fn checked_offset(self, offset: Offset) -> Option<Position> {
        Some(Position {
            x: self.x.checked_add(offset.dx)?,
            y: self.y.checked_add(offset.dy)?,
        })
    }
}

/// Relative displacement from a robot's own position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0, dy: 0 };

    /// The 8 neighbours in clockwise order starting north.
    pub const CLOCKWISE: [Offset; 8] = [
        Offset { dx: 0, dy: -1 },  // N
        Offset { dx: 1, dy: -1 },  // NE
        Offset { dx: 1, dy: 0 },   // E
        Offset { dx: 1, dy: 1 },   // SE
        Offset { dx: 0, dy: 1 },   // S
        Offset { dx: -1, dy: 1 },  // SW
        Offset { dx: -1, dy: 0 },  // W
        Offset { dx: -1, dy: -1 }, // NW
    ];

    #[inline]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Every non-zero offset with `|dx| <= range` and `|dy| <= range`, row-major.
    pub fn square(range: u32) -> impl Iterator<Item = Offset> {
        let r = range as i32;
        (-r..=r)
            .flat_map(move |dy| (-r..=r).map(move |dx| Offset { dx, dy }))
            .filter(|o| !o.is_zero())
    }
}

/// Saturates at the `i32` bounds. Use [`Position::checked_offset`] where
/// validity matters.
impl Add<Offset> for Position {
    type Output = Position;

    fn add(self, rhs: Offset) -> Position {
        Position {
            x: self.x.saturating_add(rhs.dx),
            y: self.y.saturating_add(rhs.dy),
        }
    }
}

impl Sub for Position {
    type Output = Offset;

    fn sub(self, rhs: Position) -> Offset {
        Offset {
            dx: self.x.saturating_sub(rhs.x),
            dy: self.y.saturating_sub(rhs.y),
        }
    }
}
