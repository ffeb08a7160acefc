//! Placement search and heuristic evaluation.
//!
//! A greedy one-piece planner: for every distinct rotation of the falling
//! piece and every column, simulate a hard drop from row 0, lock the piece on
//! a copy of the board, clear full rows, and score the result with a weighted
//! sum of surface features. The live board is never touched.

use crate::core::{unique_rotations, Board, BoardMetrics, Cells, Shape};
use crate::types::{PieceKind, BOARD_WIDTH, LINE_SCORE_UNIT};

/// Leftmost anchor column tried. Anchors left of the board are tolerated so
/// masks whose filled cells start right of their box edge still reach column 0.
pub const SEARCH_MIN_X: i8 = -2;

/// Row every candidate is dropped from, regardless of where the piece is.
pub const SEARCH_START_Y: i8 = 0;

/// Linear weights of the placement heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub lines: f64,
    pub aggregate_height: f64,
    pub holes: f64,
    pub bumpiness: f64,
    pub max_height: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            lines: 1.0,
            aggregate_height: -0.35,
            holes: -0.7,
            bumpiness: -0.18,
            max_height: -0.25,
        }
    }
}

/// Weighted value of each heuristic term.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Contributions {
    pub lines: f64,
    pub aggregate_height: f64,
    pub holes: f64,
    pub bumpiness: f64,
    pub max_height: f64,
}

impl Contributions {
    pub fn total(&self) -> f64 {
        self.lines + self.aggregate_height + self.holes + self.bumpiness + self.max_height
    }
}

/// Heuristic verdict on a post-placement board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Value compared by the search.
    pub score: f64,
    /// Display-only: `lines_cleared * 100`.
    pub reward: u32,
    /// Display-only: `aggregate + 5 * holes + 2 * bumpiness + 3 * max_height`.
    pub penalty: u32,
    pub lines_cleared: u32,
    pub metrics: BoardMetrics,
    pub contributions: Contributions,
}

impl Weights {
    /// Score `board` (already cleared) given the lines the placement removed.
    pub fn evaluate(&self, board: &Board, lines_cleared: u32) -> Evaluation {
        let metrics = board.metrics();
        let contributions = Contributions {
            lines: self.lines * lines_cleared as f64,
            aggregate_height: self.aggregate_height * metrics.aggregate_height as f64,
            holes: self.holes * metrics.holes as f64,
            bumpiness: self.bumpiness * metrics.bumpiness as f64,
            max_height: self.max_height * metrics.max_height as f64,
        };

        Evaluation {
            score: contributions.total(),
            reward: lines_cleared * LINE_SCORE_UNIT,
            penalty: metrics.aggregate_height
                + metrics.holes * 5
                + metrics.bumpiness * 2
                + metrics.max_height * 3,
            lines_cleared,
            metrics,
            contributions,
        }
    }
}

/// One reachable resting position of the piece.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub kind: PieceKind,
    /// Index into `unique_rotations` of the searched shape.
    pub rotation: usize,
    pub shape: Shape,
    pub x: i8,
    /// Resting row of the anchor.
    pub y: i8,
    pub cells: Cells,
    /// Board after locking and clearing.
    pub board: Board,
    pub evaluation: Evaluation,
}

/// Exhaustive greedy placement search.
#[derive(Debug, Clone, Copy, Default)]
pub struct Planner {
    weights: Weights,
}

impl Planner {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    /// Every valid placement, rotation-major then by ascending column.
    pub fn placements(&self, board: &Board, shape: Shape, kind: PieceKind) -> Vec<Placement> {
        let mut out = Vec::new();

        for (rotation, rot) in unique_rotations(shape).into_iter().enumerate() {
            for x in SEARCH_MIN_X..BOARD_WIDTH as i8 {
                if !board.cells_valid(&rot.cells_at(x, SEARCH_START_Y)) {
                    continue;
                }

                let mut y = SEARCH_START_Y;
                while board.cells_valid(&rot.cells_at(x, y + 1)) {
                    y += 1;
                }

                let cells = rot.cells_at(x, y);
                if !board.cells_valid(&cells) {
                    continue;
                }

                let mut after = board.clone();
                after.lock(&cells, kind);
                let cleared = after.clear_full_rows() as u32;
                let evaluation = self.weights.evaluate(&after, cleared);

                out.push(Placement {
                    kind,
                    rotation,
                    shape: rot,
                    x,
                    y,
                    cells,
                    board: after,
                    evaluation,
                });
            }
        }

        out
    }

    /// Highest-scoring placement; ties keep the first one found.
    ///
    /// `None` means the piece fits nowhere from the search row.
    pub fn best(&self, board: &Board, shape: Shape, kind: PieceKind) -> Option<Placement> {
        let mut best: Option<Placement> = None;
        for candidate in self.placements(board, shape, kind) {
            let better = match &best {
                Some(current) => candidate.evaluation.score > current.evaluation.score,
                None => true,
            };
            if better {
                best = Some(candidate);
            }
        }
        best
    }
}
