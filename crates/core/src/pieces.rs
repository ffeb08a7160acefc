//! Pieces module - tetromino shape masks and rotation
//!
//! Every piece is a 4x4 boolean mask stored as four row bitmasks (bit `c` of
//! row `r` is the cell at column `c`). Masks are immutable values: rotating
//! produces a new mask.
//!
//! Templates are stored aligned to the top-left corner of their box, and
//! [`Shape::rotate`] re-aligns after each quarter turn. Symmetric pieces
//! therefore collapse to fewer distinct states: O has one, I/S/Z have two,
//! T/J/L have four.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Board coordinate `(x, y)`; `y` may be negative above the visible area.
pub type Pos = (i8, i8);

/// Cells covered by a tetromino (always four).
pub type Cells = ArrayVec<Pos, 4>;

/// Distinct rotation states of a shape, in rotation order.
pub type RotationCycle = ArrayVec<Shape, 4>;

/// A 4x4 shape mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: [u8; 4],
}

impl Shape {
    /// Build a mask from four 4-character rows where `#` marks a filled cell.
    pub const fn from_ascii(rows: [&str; 4]) -> Self {
        let mut out = [0u8; 4];
        let mut r = 0;
        while r < 4 {
            let bytes = rows[r].as_bytes();
            assert!(bytes.len() == 4, "shape rows must be 4 cells wide");
            let mut c = 0;
            while c < 4 {
                if bytes[c] == b'#' {
                    out[r] |= 1 << c;
                }
                c += 1;
            }
            r += 1;
        }
        Self { rows: out }
    }

    /// Whether the mask cell at `(row, col)` is filled. Out-of-box is empty.
    #[inline]
    pub fn filled(&self, row: usize, col: usize) -> bool {
        row < 4 && col < 4 && self.rows[row] & (1 << col) != 0
    }

    pub fn cell_count(&self) -> u32 {
        self.rows.iter().map(|r| r.count_ones()).sum()
    }

    /// Lowest filled row of the mask (0 for an empty mask).
    pub fn bottom_row(&self) -> usize {
        (0..4).rev().find(|&r| self.rows[r] != 0).unwrap_or(0)
    }

    /// Raw clockwise quarter turn inside the 4x4 box: `out[r][c] = in[3 - c][r]`.
    pub fn quarter_turn(&self) -> Shape {
        let mut rows = [0u8; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for c in 0..4 {
                if self.filled(3 - c, r) {
                    *row |= 1 << c;
                }
            }
        }
        Shape { rows }
    }

    /// Shift the filled cells up and left until they touch row 0 and column 0.
    pub fn align_top_left(&self) -> Shape {
        let Some(top) = (0..4).find(|&r| self.rows[r] != 0) else {
            return *self;
        };
        let left = self
            .rows
            .iter()
            .filter(|&&r| r != 0)
            .map(|r| r.trailing_zeros())
            .min()
            .unwrap_or(0);

        let mut rows = [0u8; 4];
        for r in top..4 {
            rows[r - top] = self.rows[r] >> left;
        }
        Shape { rows }
    }

    /// Quarter turn followed by top-left alignment.
    pub fn rotate(&self) -> Shape {
        self.quarter_turn().align_top_left()
    }

    /// Board cells covered by this mask with its top-left corner at `(x, y)`.
    ///
    /// Cells are listed in row-major order.
    pub fn cells_at(&self, x: i8, y: i8) -> Cells {
        let mut cells = Cells::new();
        for r in 0..4 {
            for c in 0..4 {
                if self.filled(r, c) {
                    cells.push((x + c as i8, y + r as i8));
                }
            }
        }
        cells
    }
}

const I_SHAPE: Shape = Shape::from_ascii(["####", "....", "....", "...."]);
const O_SHAPE: Shape = Shape::from_ascii(["##..", "##..", "....", "...."]);
const T_SHAPE: Shape = Shape::from_ascii([".#..", "###.", "....", "...."]);
const S_SHAPE: Shape = Shape::from_ascii([".##.", "##..", "....", "...."]);
const Z_SHAPE: Shape = Shape::from_ascii(["##..", ".##.", "....", "...."]);
const J_SHAPE: Shape = Shape::from_ascii(["#...", "###.", "....", "...."]);
const L_SHAPE: Shape = Shape::from_ascii(["..#.", "###.", "....", "...."]);

/// Spawn orientation of a piece kind.
pub fn template(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

/// Distinct masks reached by rotating `shape` up to four times, first-seen order.
pub fn unique_rotations(shape: Shape) -> RotationCycle {
    let mut rotations = RotationCycle::new();
    let mut current = shape;
    for _ in 0..4 {
        if !rotations.contains(&current) {
            rotations.push(current);
        }
        current = current.rotate();
    }
    rotations
}

/// Rotation cycle of a kind, starting from its spawn orientation.
pub fn rotation_cycle(kind: PieceKind) -> RotationCycle {
    unique_rotations(template(kind))
}

/// Cells of `shape` anchored at `(x, y)`.
pub fn cells_of(shape: Shape, x: i8, y: i8) -> Cells {
    shape.cells_at(x, y)
}
