//! Cardinal directions and quarter-turn rotation.

use serde::{Deserialize, Serialize};

/// The four rotations a room can be placed with, in the order they are tried.
pub const ROTATIONS: [u16; 4] = [0, 90, 180, 270];

/// Cardinal direction on the manor grid. Row 0 is the northern edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Clockwise order, starting at North.
    pub const CLOCKWISE: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// One quarter turn clockwise (N -> E -> S -> W -> N).
    pub fn clockwise(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    pub fn opposite(self) -> Self {
        self.clockwise().clockwise()
    }

    /// Applies `degrees / 90` clockwise quarter turns.
    ///
    /// Only 0, 90, 180 and 270 are meaningful. Anything else returns the
    /// direction unchanged.
    pub fn rotated(self, degrees: u16) -> Self {
        if degrees >= 360 || degrees % 90 != 0 {
            return self;
        }
        (0..degrees / 90).fold(self, |dir, _| dir.clockwise())
    }

    /// Row/column offset of the neighbouring cell in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::East => "East",
            Direction::South => "South",
            Direction::West => "West",
        }
    }
}

/// Free-function form of [`Direction::rotated`].
pub fn rotate(direction: Direction, degrees: u16) -> Direction {
    direction.rotated(degrees)
}

/// Adds a quarter turn to a rotation, wrapping at 360.
pub fn next_rotation(rotation: u16) -> u16 {
    (rotation + 90) % 360
}
