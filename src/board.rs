//! Game board representation and collision detection

use crate::tetromino::TetrominoType;

/// Standard board dimensions
pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 20;

/// A cell on the board - either empty or filled with a piece's type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(TetrominoType),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    /// `.` for empty, the piece letter otherwise
    pub fn symbol(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Filled(kind) => kind.letter(),
        }
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Rows stored bottom to top, row 0 is the floor
    cells: Vec<Vec<Cell>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![Cell::Empty; width]; height],
        }
    }

    /// Build a board from text rows, top row first.
    /// `.` or space is empty, a piece letter fills the cell with that kind,
    /// anything else (such as `#`) fills it as an O and renders back as `O`.
    pub fn from_rows(width: usize, height: usize, rows: &[&str]) -> Self {
        let mut board = Self::new(width, height);
        let top = height.saturating_sub(rows.len());
        for (i, line) in rows.iter().take(height).enumerate() {
            let y = (height - 1 - (top + i)) as i32;
            for (x, c) in line.chars().take(width).enumerate() {
                let cell = match c {
                    '.' | ' ' => Cell::Empty,
                    c => Cell::Filled(TetrominoType::from_letter(c).unwrap_or(TetrominoType::O)),
                };
                board.set(x as i32, y, cell);
            }
        }
        board
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Get the cell at (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.cells[y as usize][x as usize])
    }

    /// Set a cell at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        self.cells[y as usize][x as usize] = cell;
        true
    }

    /// Check if a position is valid (within bounds and empty)
    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|cell| cell.is_empty())
    }

    /// Check if a set of block positions are all valid
    pub fn are_positions_valid(&self, positions: &[(i32, i32)]) -> bool {
        positions
            .iter()
            .all(|&(x, y)| self.is_valid_position(x, y))
    }

    /// Lock a piece onto the board
    pub fn lock_piece(&mut self, positions: &[(i32, i32)], piece_type: TetrominoType) {
        for &(x, y) in positions {
            self.set(x, y, Cell::Filled(piece_type));
        }
    }

    /// Clear completed lines and return the number cleared.
    ///
    /// Rows are scanned bottom to top. A full row is emptied and everything
    /// above it moves down one row; the same row index is then checked
    /// again since a full row may have dropped into it.
    pub fn clear_lines(&mut self) -> usize {
        let mut lines_cleared = 0;
        let mut row = 0;

        while row < self.height {
            if self.is_line_full(row) {
                self.clear_row(row);
                lines_cleared += 1;
            } else {
                row += 1;
            }
        }

        lines_cleared
    }

    /// Empty a row and shift every row above it down by one
    fn clear_row(&mut self, row: usize) {
        self.cells[row].fill(Cell::Empty);
        for y in row..self.height - 1 {
            self.cells[y] = self.cells[y + 1].clone();
        }
        self.cells[self.height - 1] = vec![Cell::Empty; self.width];
    }

    /// Check if a line is completely filled. Rows of a zero-width board
    /// are never full.
    pub fn is_line_full(&self, row: usize) -> bool {
        self.width > 0
            && self
                .cells
                .get(row)
                .is_some_and(|cells| cells.iter().all(|cell| cell.is_filled()))
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_filled()).count())
            .sum()
    }

    /// Iterate rows bottom to top
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[Cell])> {
        self.cells.iter().map(Vec::as_slice).enumerate()
    }

    /// Render rows as text, top row first
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .rev()
            .map(|row| row.iter().map(Cell::symbol).collect())
            .collect()
    }
}
