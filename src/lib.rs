//! BLOCKFALL - a headless falling-block puzzle simulation
//!
//! Board occupancy, collision checks, rotation with SRS wall kicks, line
//! clears and a next/hold queue, with no rendering or input device attached.

pub mod board;
pub mod game;
pub mod piece;
pub mod queue;
pub mod score;
pub mod script;
pub mod settings;
pub mod snapshot;
pub mod srs;
pub mod tetromino;

pub use board::{Board, Cell};
pub use game::{Action, GameConfig, GameState, Session};
pub use piece::Piece;
pub use queue::{PieceQueue, Randomizer};
pub use score::Score;
pub use settings::{Settings, SettingsError};
pub use snapshot::Snapshot;
pub use tetromino::{Rotation, RotationDirection, TetrominoType};
