//! Active falling piece logic

use crate::board::Board;
use crate::srs::wall_kicks;
use crate::tetromino::{Rotation, RotationDirection, TetrominoType, rotate_offsets};

/// An active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub piece_type: TetrominoType,
    /// Current rotation state
    pub rotation: Rotation,
    /// Anchor position (x, y); y grows upward
    pub x: i32,
    pub y: i32,
    /// Current cell offsets relative to the anchor
    pub cells: [(i32, i32); 4],
    /// Which wall kick was used for the last rotation
    /// 0 = no rotation since the last move, 1-5 = kick index
    pub last_kick: u8,
}

impl Piece {
    /// Create a new piece in its spawn state at `(x, y)`
    pub fn spawn(piece_type: TetrominoType, (x, y): (i32, i32)) -> Self {
        Self {
            piece_type,
            rotation: Rotation::North,
            x,
            y,
            cells: piece_type.cells(),
            last_kick: 0,
        }
    }

    /// Get the absolute positions of all 4 blocks
    pub fn block_positions(&self) -> [(i32, i32); 4] {
        self.positions_at(self.x, self.y)
    }

    fn positions_at(&self, x: i32, y: i32) -> [(i32, i32); 4] {
        self.cells.map(|(dx, dy)| (x + dx, y + dy))
    }

    /// Translate by (dx, dy) if the destination is free
    pub fn try_move(&mut self, dx: i32, dy: i32, board: &Board) -> bool {
        if !board.are_positions_valid(&self.positions_at(self.x + dx, self.y + dy)) {
            return false;
        }
        self.x += dx;
        self.y += dy;
        self.last_kick = 0;
        true
    }

    pub fn move_left(&mut self, board: &Board) -> bool {
        self.try_move(-1, 0, board)
    }

    pub fn move_right(&mut self, board: &Board) -> bool {
        self.try_move(1, 0, board)
    }

    pub fn move_down(&mut self, board: &Board) -> bool {
        self.try_move(0, -1, board)
    }

    /// Try to rotate, using SRS wall kicks
    pub fn rotate(&mut self, direction: RotationDirection, board: &Board) -> bool {
        let new_rotation = self.rotation.rotate(direction);
        let new_cells = rotate_offsets(self.piece_type, self.cells, direction);
        let kicks = wall_kicks(self.piece_type, new_rotation, direction);

        for (kick_idx, (kick_x, kick_y)) in kicks.iter().enumerate() {
            let (x, y) = (self.x + kick_x, self.y + kick_y);
            let positions = new_cells.map(|(dx, dy)| (x + dx, y + dy));
            if board.are_positions_valid(&positions) {
                self.x = x;
                self.y = y;
                self.rotation = new_rotation;
                self.cells = new_cells;
                self.last_kick = (kick_idx + 1) as u8;
                return true;
            }
        }

        false
    }

    /// Hard drop - move down as far as possible and return distance dropped
    pub fn hard_drop(&mut self, board: &Board) -> i32 {
        let mut distance = 0;
        while self.move_down(board) {
            distance += 1;
        }
        distance
    }

    /// Get the ghost piece anchor row (where the piece would land)
    pub fn ghost_y(&self, board: &Board) -> i32 {
        let mut ghost_y = self.y;
        while board.are_positions_valid(&self.positions_at(self.x, ghost_y - 1)) {
            ghost_y -= 1;
        }
        ghost_y
    }
}
