//! Serializable read model of a session

use crate::game::{GameState, Session};
use crate::tetromino::{Rotation, TetrominoType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: TetrominoType,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
    /// Absolute (x, y) of the four blocks
    pub cells: Vec<(i32, i32)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: GameState,
    pub width: usize,
    pub height: usize,
    /// Top row first; `.` empty, piece letter filled. The active piece is not drawn in.
    pub board: Vec<String>,
    pub active: Option<ActiveSnapshot>,
    pub next: TetrominoType,
    pub held: Option<TetrominoType>,
    pub points: u64,
    pub lines: u32,
    pub pieces: u64,
}

impl Snapshot {
    pub fn of(session: &Session) -> Self {
        let board = session.board();
        Self {
            state: session.state(),
            width: board.width(),
            height: board.height(),
            board: board.to_rows(),
            active: session.active().map(|piece| ActiveSnapshot {
                kind: piece.piece_type,
                rotation: piece.rotation,
                x: piece.x,
                y: piece.y,
                cells: piece.block_positions().to_vec(),
            }),
            next: session.next(),
            held: session.held(),
            points: session.score().points,
            lines: session.score().lines,
            pieces: session.pieces_spawned(),
        }
    }
}
