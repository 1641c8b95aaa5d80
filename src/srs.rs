//! Super Rotation System (SRS) wall kick data
//!
//! SRS defines the wall kicks attempted when rotating a piece.
//! If a rotation would cause collision, these offsets are tried in order.
//! Offsets are (dx, dy) with y pointing up.

use crate::tetromino::{Rotation, RotationDirection, TetrominoType};

pub type Kicks = [(i32, i32); 5];

/// Rows in transition order: 0→R, R→0, R→2, 2→R, 2→L, L→2, L→0, 0→L
const JLSTZ_KICKS: [Kicks; 8] = [
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
];

const I_KICKS: [Kicks; 8] = [
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
];

/// The O piece never needs a kick
const O_KICKS: Kicks = [(0, 0); 5];

/// Row of the kick table for the transition that lands on `to`
pub fn kick_index(to: Rotation, direction: RotationDirection) -> usize {
    let from = to.rotate(direction.reverse());
    let index = from.index() as i32 * 2 - i32::from(direction == RotationDirection::CounterClockwise);
    index.rem_euclid(8) as usize
}

/// Get wall kick offsets for a rotation that produced state `to`
pub fn wall_kicks(piece_type: TetrominoType, to: Rotation, direction: RotationDirection) -> Kicks {
    match piece_type {
        TetrominoType::O => O_KICKS,
        TetrominoType::I => I_KICKS[kick_index(to, direction)],
        _ => JLSTZ_KICKS[kick_index(to, direction)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTATIONS: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    #[test]
    fn test_first_kick_is_identity() {
        for piece in TetrominoType::all() {
            for to in ROTATIONS {
                for dir in [RotationDirection::Clockwise, RotationDirection::CounterClockwise] {
                    assert_eq!(wall_kicks(piece, to, dir)[0], (0, 0));
                }
            }
        }
    }

    #[test]
    fn test_every_transition_has_its_own_row() {
        let mut seen = [false; 8];
        for to in ROTATIONS {
            for dir in [RotationDirection::Clockwise, RotationDirection::CounterClockwise] {
                seen[kick_index(to, dir)] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_north_to_east_kicks() {
        // 0→R lands on East going clockwise
        assert_eq!(kick_index(Rotation::East, RotationDirection::Clockwise), 0);
        assert_eq!(
            wall_kicks(TetrominoType::T, Rotation::East, RotationDirection::Clockwise)[1],
            (-1, 0)
        );
        // 0→L lands on West going counter-clockwise
        assert_eq!(kick_index(Rotation::West, RotationDirection::CounterClockwise), 7);
    }

    #[test]
    fn test_reverse_transition_negates_kicks() {
        // R→0 undoes 0→R, so its kicks are the negation
        for kind in [TetrominoType::T, TetrominoType::I] {
            let forward = wall_kicks(kind, Rotation::East, RotationDirection::Clockwise);
            let back = wall_kicks(kind, Rotation::North, RotationDirection::CounterClockwise);
            for (a, b) in forward.iter().zip(back.iter()) {
                assert_eq!((a.0, a.1), (-b.0, -b.1));
            }
        }
    }
}
