//! Tetromino definitions and shapes
//!
//! All 7 standard tetrominoes, their spawn-state cells and the rotation
//! transform applied to those cells.

use serde::{Deserialize, Serialize};

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TetrominoType {
    I, // long bar
    O, // square
    T,
    J,
    L,
    S,
    Z,
}

impl TetrominoType {
    /// Get all tetromino types, in queue index order
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::O,
            TetrominoType::T,
            TetrominoType::J,
            TetrominoType::L,
            TetrominoType::S,
            TetrominoType::Z,
        ]
    }

    /// Spawn-state cell offsets as (x, y), relative to the piece anchor.
    /// x increases rightward, y increases upward.
    pub fn cells(&self) -> [(i32, i32); 4] {
        match self {
            TetrominoType::I => [(-1, 1), (0, 1), (1, 1), (2, 1)],
            TetrominoType::J => [(-1, 1), (-1, 0), (0, 0), (1, 0)],
            TetrominoType::L => [(1, 1), (-1, 0), (0, 0), (1, 0)],
            TetrominoType::O => [(0, 1), (1, 1), (0, 0), (1, 0)],
            TetrominoType::S => [(0, 1), (1, 1), (-1, 0), (0, 0)],
            TetrominoType::T => [(0, 1), (-1, 0), (0, 0), (1, 0)],
            TetrominoType::Z => [(-1, 1), (0, 1), (0, 0), (1, 0)],
        }
    }

    /// Whether this shape rotates about a half-integer centre
    pub fn rotates_off_grid(&self) -> bool {
        matches!(self, TetrominoType::I | TetrominoType::O)
    }

    pub fn letter(&self) -> char {
        match self {
            TetrominoType::I => 'I',
            TetrominoType::O => 'O',
            TetrominoType::T => 'T',
            TetrominoType::J => 'J',
            TetrominoType::L => 'L',
            TetrominoType::S => 'S',
            TetrominoType::Z => 'Z',
        }
    }

    pub fn from_letter(c: char) -> Option<TetrominoType> {
        match c.to_ascii_uppercase() {
            'I' => Some(TetrominoType::I),
            'O' => Some(TetrominoType::O),
            'T' => Some(TetrominoType::T),
            'J' => Some(TetrominoType::J),
            'L' => Some(TetrominoType::L),
            'S' => Some(TetrominoType::S),
            'Z' => Some(TetrominoType::Z),
            _ => None,
        }
    }
}

/// Rotation states (using SRS naming convention)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North, // Spawn state
    East,  // Clockwise from North
    South, // 180 from North
    West,  // Counter-clockwise from North
}

impl Rotation {
    /// Rotate clockwise: North → East → South → West → North
    pub fn cw(&self) -> Rotation {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise: North → West → South → East → North
    pub fn ccw(&self) -> Rotation {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    pub fn rotate(&self, direction: RotationDirection) -> Rotation {
        match direction {
            RotationDirection::Clockwise => self.cw(),
            RotationDirection::CounterClockwise => self.ccw(),
        }
    }

    /// Rotation state as 0..4
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    pub fn reverse(&self) -> RotationDirection {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

/// Rotate all four offsets by 90 degrees.
///
/// Clockwise maps (x, y) to (y, -x). I and O turn about (0.5, 0.5) with the
/// result rounded up, which in integers is (y, 1 - x) clockwise and
/// (1 - y, x) counter-clockwise.
pub fn rotate_offsets(
    kind: TetrominoType,
    cells: [(i32, i32); 4],
    direction: RotationDirection,
) -> [(i32, i32); 4] {
    let off_grid = kind.rotates_off_grid();
    cells.map(|(x, y)| match (direction, off_grid) {
        (RotationDirection::Clockwise, false) => (y, -x),
        (RotationDirection::CounterClockwise, false) => (-y, x),
        (RotationDirection::Clockwise, true) => (y, 1 - x),
        (RotationDirection::CounterClockwise, true) => (1 - y, x),
    })
}
