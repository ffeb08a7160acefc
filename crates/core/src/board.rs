//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the board (negative y) are never stored.

use crate::pieces::Pos;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Surface features of a board, used by the placement heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoardMetrics {
    /// Sum of column heights.
    pub aggregate_height: u32,
    /// Empty cells with a filled cell somewhere above them in the same column.
    pub holes: u32,
    /// Sum of absolute height differences between adjacent columns.
    pub bumpiness: u32,
    /// Tallest column.
    pub max_height: u32,
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    /// Build a board from text rows, aligned to the bottom of the grid.
    ///
    /// `.` is empty, a piece letter (`I`, `O`, `T`, `S`, `Z`, `J`, `L`) fills the
    /// cell with that kind and `#` fills it with `I`. Returns `None` when there
    /// are more than 20 rows, a row is not 10 wide, or a character is unknown.
    pub fn from_ascii(rows: &[&str]) -> Option<Self> {
        if rows.len() > HEIGHT {
            return None;
        }
        let mut board = Self::new();
        let top = HEIGHT - rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.chars().count() != WIDTH {
                return None;
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => Cell::Empty,
                    '#' => Cell::Filled(PieceKind::I),
                    other => Cell::Filled(PieceKind::from_str(&other.to_string())?),
                };
                board.cells[(top + i) * WIDTH + x] = cell;
            }
        }
        Some(board)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Filled(_)))
    }

    /// Check whether every cell may hold a piece.
    ///
    /// A cell fails when its column is outside the board, its row is at or
    /// below the floor, or it is on the board and already filled. Cells above
    /// the board (negative row) only have their column checked.
    pub fn cells_valid(&self, cells: &[Pos]) -> bool {
        cells.iter().all(|&(x, y)| {
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                return false;
            }
            y < 0 || !self.is_occupied(x, y)
        })
    }

    /// Write `kind` into every on-board cell of `cells`.
    ///
    /// Cells above the board are dropped. No collision check is done here;
    /// callers validate with [`Board::cells_valid`] first.
    pub fn lock(&mut self, cells: &[Pos], kind: PieceKind) {
        for &(x, y) in cells {
            if y >= 0 {
                self.set(x, y, Cell::Filled(kind));
            }
        }
    }

    /// Borrow row `y`.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| !cell.is_empty())
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Surviving rows keep their relative order and slide down; the same
    /// number of empty rows appear at the top. Uses a two-pointer pass with
    /// no allocation.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut write_y = HEIGHT;

        // Scan from bottom to top
        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * WIDTH;
                    let dst_start = write_y * WIDTH;
                    self.cells
                        .copy_within(src_start..src_start + WIDTH, dst_start);
                }
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_y * WIDTH].fill(Cell::Empty);

        cleared
    }

    /// Non-mutating variant of [`Board::clear_full_rows`].
    pub fn with_full_rows_cleared(&self) -> (Board, usize) {
        let mut next = self.clone();
        let cleared = next.clear_full_rows();
        (next, cleared)
    }

    /// Height of every column: `20 - row` of its topmost filled cell, 0 if empty.
    pub fn column_heights(&self) -> [u32; WIDTH] {
        let mut heights = [0u32; WIDTH];
        for (x, h) in heights.iter_mut().enumerate() {
            if let Some(top) = (0..HEIGHT).find(|&y| !self.cells[y * WIDTH + x].is_empty()) {
                *h = (HEIGHT - top) as u32;
            }
        }
        heights
    }

    /// Compute surface metrics. Pure: the board is not modified.
    pub fn metrics(&self) -> BoardMetrics {
        let mut heights = [0u32; WIDTH];
        let mut holes = 0u32;

        for (x, height) in heights.iter_mut().enumerate() {
            let mut block_seen = false;
            for y in 0..HEIGHT {
                if !self.cells[y * WIDTH + x].is_empty() {
                    if !block_seen {
                        *height = (HEIGHT - y) as u32;
                        block_seen = true;
                    }
                } else if block_seen {
                    holes += 1;
                }
            }
        }

        let aggregate_height = heights.iter().sum();
        let bumpiness = heights
            .windows(2)
            .map(|pair| pair[0].abs_diff(pair[1]))
            .sum();
        let max_height = heights.iter().copied().max().unwrap_or(0);

        BoardMetrics {
            aggregate_height,
            holes,
            bumpiness,
            max_height,
        }
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
