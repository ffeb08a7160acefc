use crate::autoplay::HistoryEntry;
use crate::core::{Cells, Phase, Tetromino};
use crate::search::Evaluation;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

pub type Grid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    pub cells: Cells,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            x: value.x,
            y: value.y,
            cells: value.cells(),
        }
    }
}

/// Resting cells of the autoplayer's last plan.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSnapshot {
    pub kind: PieceKind,
    pub rotation: usize,
    pub x: i8,
    pub y: i8,
    pub cells: Cells,
}

/// Read-only view of one frame, owned so the renderer never borrows the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub board: Grid,
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub target: Option<TargetSnapshot>,
    pub score: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub autoplay: bool,
    pub game_over: bool,
    pub phase: Phase,
    /// Oldest first.
    pub history: Vec<HistoryEntry>,
    pub evaluation: Option<Evaluation>,
}

impl Snapshot {
    /// Cell at `(x, y)`, `None` off the board.
    pub fn cell(&self, x: i8, y: i8) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.board
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }
}
