//! Core game state and logic
//!
//! A [`Session`] owns the board, the falling piece, the next/hold queue and
//! the score. It is driven by discrete calls: inputs through the move,
//! rotate, drop and hold methods (or [`Session::process_action`]) and time
//! through [`Session::tick`].

use crate::board::{Board, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::piece::Piece;
use crate::queue::{PieceQueue, Randomizer};
use crate::score::{DEFAULT_LINE_AWARD, Score};
use crate::snapshot::Snapshot;
use crate::tetromino::{RotationDirection, TetrominoType};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Default gravity: one row per second
pub const DEFAULT_FALL_INTERVAL: Duration = Duration::from_millis(1000);

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameState {
    Playing,
    /// Terminal: a piece could not spawn. Only [`Session::reset`] leaves it.
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveDown,
    HardDrop,
    RotateCw,
    RotateCcw,
    Hold,
}

/// Everything a session needs to know up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Anchor cell new pieces appear at
    pub spawn: (i32, i32),
    pub fall_interval: Duration,
    pub line_award: u64,
    pub randomizer: Randomizer,
    pub seed: u64,
    /// Allow only one hold until the next piece locks
    pub hold_once_per_drop: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            spawn: default_spawn(DEFAULT_WIDTH, DEFAULT_HEIGHT),
            fall_interval: DEFAULT_FALL_INTERVAL,
            line_award: DEFAULT_LINE_AWARD,
            randomizer: Randomizer::default(),
            seed: 0,
            hold_once_per_drop: false,
        }
    }
}

/// Top centre, leaving room for the row above the anchor
pub fn default_spawn(width: usize, height: usize) -> (i32, i32) {
    (width as i32 / 2 - 1, height as i32 - 2)
}

/// Whether every kind fits inside a `width` x `height` board in its spawn
/// state at `spawn`
pub fn spawn_fits(width: usize, height: usize, (x, y): (i32, i32)) -> bool {
    let (width, height) = (width as i32, height as i32);
    TetrominoType::all().iter().all(|kind| {
        kind.cells()
            .iter()
            .all(|&(dx, dy)| (0..width).contains(&(x + dx)) && (0..height).contains(&(y + dy)))
    })
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    board: Board,
    /// Current falling piece
    active: Option<Piece>,
    queue: PieceQueue,
    score: Score,
    state: GameState,
    /// Time accumulated toward the next gravity step
    fall_elapsed: Duration,
    /// Whether hold has been used since the last lock
    hold_used: bool,
    pieces_spawned: u64,
}

impl Session {
    /// Create a new session on an empty board; no piece is active yet
    pub fn new(config: GameConfig) -> Self {
        let board = Board::new(config.width, config.height);
        Self::with_board(config, board)
    }

    /// Create a session over an existing board.
    /// The config's dimensions are replaced by the board's.
    pub fn with_board(config: GameConfig, board: Board) -> Self {
        let queue = PieceQueue::new(config.randomizer, config.seed);
        Self::with_queue(config, board, queue)
    }

    /// Create a session with a prepared board and piece queue.
    /// A spawn point that no longer fits the board moves to its top centre.
    pub fn with_queue(mut config: GameConfig, board: Board, queue: PieceQueue) -> Self {
        config.width = board.width();
        config.height = board.height();
        if !spawn_fits(config.width, config.height, config.spawn) {
            config.spawn = default_spawn(config.width, config.height);
        }
        Self {
            queue,
            score: Score::new(config.line_award),
            config,
            board,
            active: None,
            state: GameState::Playing,
            fall_elapsed: Duration::ZERO,
            hold_used: false,
            pieces_spawned: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    /// The kind that spawns next
    pub fn next(&self) -> TetrominoType {
        self.queue.peek()
    }

    pub fn held(&self) -> Option<TetrominoType> {
        self.queue.held()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn pieces_spawned(&self) -> u64 {
        self.pieces_spawned
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(self)
    }

    /// Start over: empty board, zero score, queue reseeded from the config
    pub fn reset(&mut self) {
        self.board = Board::new(self.config.width, self.config.height);
        self.queue = PieceQueue::new(self.config.randomizer, self.config.seed);
        self.score.reset();
        self.active = None;
        self.state = GameState::Playing;
        self.fall_elapsed = Duration::ZERO;
        self.hold_used = false;
        self.pieces_spawned = 0;
        debug!("session reset");
    }

    /// Make the queued piece active at the spawn point.
    /// Returns false, and ends the game, when the spawn point is blocked.
    pub fn spawn(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        let kind = self.queue.take_next();
        self.hold_used = false;
        self.place_at_spawn(kind)
    }

    fn place_at_spawn(&mut self, kind: TetrominoType) -> bool {
        let piece = Piece::spawn(kind, self.config.spawn);
        self.fall_elapsed = Duration::ZERO;

        if !self.board.are_positions_valid(&piece.block_positions()) {
            self.active = None;
            self.state = GameState::GameOver;
            info!(
                piece = ?kind,
                points = self.score.points,
                lines = self.score.lines,
                "spawn blocked, game over"
            );
            return false;
        }

        debug!(piece = ?kind, next = ?self.queue.peek(), "spawned piece");
        self.active = Some(piece);
        self.pieces_spawned += 1;
        true
    }

    /// Process an action
    pub fn process_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::MoveDown => self.move_down(),
            Action::HardDrop => self.hard_drop().is_some(),
            Action::RotateCw => self.rotate_cw(),
            Action::RotateCcw => self.rotate_ccw(),
            Action::Hold => self.hold(),
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.translate(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.translate(1, 0)
    }

    /// Move one row down. Never locks; gravity and hard drop do that.
    pub fn move_down(&mut self) -> bool {
        self.translate(0, -1)
    }

    fn translate(&mut self, dx: i32, dy: i32) -> bool {
        match self.active.as_mut() {
            Some(piece) if self.state == GameState::Playing => piece.try_move(dx, dy, &self.board),
            _ => false,
        }
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.rotate(RotationDirection::Clockwise)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.rotate(RotationDirection::CounterClockwise)
    }

    fn rotate(&mut self, direction: RotationDirection) -> bool {
        match self.active.as_mut() {
            Some(piece) if self.state == GameState::Playing => piece.rotate(direction, &self.board),
            _ => false,
        }
    }

    /// Drop the piece to the floor and lock it.
    /// Returns the lines cleared, or None when there was nothing to drop.
    pub fn hard_drop(&mut self) -> Option<usize> {
        if self.is_game_over() {
            return None;
        }
        let distance = self.active.as_mut()?.hard_drop(&self.board);
        debug!(distance, "hard drop");
        self.lock_active()
    }

    /// Swap the active piece with the held one, or stash it and spawn next
    pub fn hold(&mut self) -> bool {
        if self.is_game_over() || (self.config.hold_once_per_drop && self.hold_used) {
            return false;
        }
        let Some(current) = self.active.take() else {
            return false;
        };

        debug!(piece = ?current.piece_type, held = ?self.queue.held(), "hold");
        let placed = match self.queue.swap_held(current.piece_type) {
            Some(held) => self.place_at_spawn(held),
            None => self.spawn(),
        };
        self.hold_used = true;
        placed
    }

    /// Advance the clock; every elapsed fall interval moves the piece down
    /// one row or locks it when it cannot move.
    ///
    /// With no active piece the call only spawns one and `dt` is not
    /// counted, so the new piece always gets a full interval at the top.
    pub fn tick(&mut self, dt: Duration) {
        if self.is_game_over() {
            return;
        }
        if self.active.is_none() {
            self.spawn();
            return;
        }

        let interval = self.config.fall_interval.max(Duration::from_millis(1));
        self.fall_elapsed = self.fall_elapsed.saturating_add(dt);
        while self.fall_elapsed >= interval && !self.is_game_over() {
            self.fall_elapsed -= interval;
            self.step();
        }
    }

    /// One gravity step
    fn step(&mut self) {
        let moved = match self.active.as_mut() {
            Some(piece) => piece.move_down(&self.board),
            None => {
                self.spawn();
                return;
            }
        };
        if !moved {
            self.lock_active();
        }
    }

    /// Lock the current piece, clear lines and spawn the next one
    fn lock_active(&mut self) -> Option<usize> {
        let piece = self.active.take()?;

        let positions = piece.block_positions();
        self.board.lock_piece(&positions, piece.piece_type);
        debug!(piece = ?piece.piece_type, x = piece.x, y = piece.y, "locked piece");

        let lines = self.board.clear_lines();
        if lines > 0 {
            let gained = self.score.add_lines(lines);
            info!(lines, gained, points = self.score.points, "lines cleared");
        }

        self.spawn();
        Some(lines)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    fn config() -> GameConfig {
        GameConfig {
            seed: 11,
            ..GameConfig::default()
        }
    }

    /// Default-size board with the spawn area filled in
    fn blocked_board() -> Board {
        let mut board = Board::default();
        board.set(4, 18, Cell::Filled(TetrominoType::O));
        board.set(4, 19, Cell::Filled(TetrominoType::O));
        board
    }

    #[test]
    fn test_new_session_has_no_piece() {
        let session = Session::new(config());
        assert!(session.active().is_none());
        assert_eq!(session.state(), GameState::Playing);
    }

    #[test]
    fn test_spawn_takes_next() {
        let mut session = Session::new(config());
        let next = session.next();
        assert!(session.spawn());
        let piece = session.active().unwrap();
        assert_eq!(piece.piece_type, next);
        assert_eq!((piece.x, piece.y), (4, 18));
    }

    #[test]
    fn test_first_tick_spawns() {
        let mut session = Session::new(config());
        session.tick(Duration::from_millis(16));
        assert!(session.active().is_some());
    }

    #[test]
    fn test_tick_applies_gravity() {
        let mut session = Session::new(config());
        session.spawn();
        let y = session.active().unwrap().y;
        session.tick(Duration::from_millis(999));
        assert_eq!(session.active().unwrap().y, y);
        session.tick(Duration::from_millis(1));
        assert_eq!(session.active().unwrap().y, y - 1);
        session.tick(Duration::from_millis(3000));
        assert_eq!(session.active().unwrap().y, y - 4);
    }

    #[test]
    fn test_first_tick_does_not_move_new_piece() {
        let mut session = Session::new(config());
        session.tick(Duration::from_secs(5));
        assert_eq!(session.active().unwrap().y, 18);
        session.tick(DEFAULT_FALL_INTERVAL);
        assert_eq!(session.active().unwrap().y, 17);
    }

    #[test]
    fn test_huge_tick_saturates() {
        let mut session = Session::new(config());
        session.spawn();
        session.tick(Duration::from_millis(500));
        session.tick(Duration::MAX);
        assert!(session.is_game_over());
    }

    #[test]
    fn test_small_board_gets_own_spawn() {
        let mut session = Session::with_board(GameConfig::default(), Board::new(6, 8));
        assert_eq!(session.config().spawn, (2, 6));
        assert!(session.spawn());
        assert!(
            session
                .board()
                .are_positions_valid(&session.active().unwrap().block_positions())
        );
    }

    #[test]
    fn test_fitting_spawn_is_kept() {
        let config = GameConfig {
            spawn: (1, 10),
            ..config()
        };
        let session = Session::with_board(config, Board::new(6, 12));
        assert_eq!(session.config().spawn, (1, 10));
    }

    #[test]
    fn test_spawn_fits() {
        assert!(spawn_fits(10, 20, (4, 18)));
        assert!(!spawn_fits(10, 20, (4, 19)));
        assert!(!spawn_fits(10, 20, (0, 10)));
        assert!(!spawn_fits(10, 20, (8, 10)));
        assert!(spawn_fits(10, 20, (1, 0)));
    }

    #[test]
    fn test_gravity_locks_grounded_piece() {
        let mut session = Session::new(config());
        session.spawn();
        session.move_down();
        while session.move_down() {}
        let kind = session.active().unwrap().piece_type;
        session.tick(DEFAULT_FALL_INTERVAL);
        assert_eq!(session.board().filled_count(), 4);
        assert!(
            session
                .board()
                .rows()
                .any(|(_, row)| row.contains(&Cell::Filled(kind)))
        );
        assert_eq!(session.pieces_spawned(), 2);
    }

    #[test]
    fn test_move_down_never_locks() {
        let mut session = Session::new(config());
        session.spawn();
        while session.move_down() {}
        assert!(!session.move_down());
        assert!(session.active().is_some());
        assert!(session.board().is_empty());
    }

    #[test]
    fn test_hard_drop_locks_and_spawns() {
        let mut session = Session::new(config());
        session.spawn();
        assert_eq!(session.hard_drop(), Some(0));
        assert_eq!(session.board().filled_count(), 4);
        assert!(session.active().is_some());
    }

    #[test]
    fn test_hold_once_per_drop() {
        let mut session = Session::new(GameConfig {
            hold_once_per_drop: true,
            ..config()
        });
        session.spawn();
        assert!(session.hold());
        assert!(!session.hold());
        session.hard_drop();
        assert!(session.hold());
    }

    #[test]
    fn test_reset_leaves_game_over() {
        let board = blocked_board();
        let mut session = Session::with_board(config(), board);
        assert!(!session.spawn());
        assert!(session.is_game_over());

        session.reset();
        assert!(!session.is_game_over());
        assert!(session.board().is_empty());
        assert!(session.spawn());
    }

    #[test]
    fn test_inputs_ignored_after_game_over() {
        let board = blocked_board();
        let mut session = Session::with_board(config(), board.clone());
        session.spawn();
        for action in [
            Action::MoveLeft,
            Action::MoveRight,
            Action::MoveDown,
            Action::HardDrop,
            Action::RotateCw,
            Action::RotateCcw,
            Action::Hold,
        ] {
            assert!(!session.process_action(action));
        }
        session.tick(Duration::from_secs(10));
        assert_eq!(session.board(), &board);
        assert!(session.active().is_none());
    }
}
