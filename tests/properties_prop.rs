//! Property tests for board, piece and search invariants.
//!
//! Boards are generated as random fill patterns; pieces and cell lists are
//! drawn from the full coordinate range, including out-of-bounds values.

use proptest::prelude::*;

use autotris::core::{rotation_cycle, template, unique_rotations, Board, Pos, Tetromino};
use autotris::engine::{build_actions, AutoAction, Planner};
use autotris::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;

fn piece_kind() -> impl Strategy<Value = PieceKind> {
    (0..PieceKind::ALL.len()).prop_map(|i| PieceKind::ALL[i])
}

/// Each row independently: empty, full, or a random pattern.
fn board() -> impl Strategy<Value = Board> {
    prop::collection::vec((0u8..4, any::<u16>()), H).prop_map(|rows| {
        let mut board = Board::new();
        for (y, (mode, bits)) in rows.into_iter().enumerate() {
            for x in 0..W {
                let filled = match mode {
                    0 => false,
                    1 => true,
                    _ => bits & (1 << x) != 0,
                };
                if filled {
                    board.set(x as i8, y as i8, Cell::Filled(PieceKind::T));
                }
            }
        }
        board
    })
}

/// Boards whose top rows are clear, so every piece has somewhere to go.
fn open_board() -> impl Strategy<Value = Board> {
    board().prop_map(|mut b| {
        for y in 0..6 {
            for x in 0..W {
                b.set(x as i8, y, Cell::Empty);
            }
        }
        b
    })
}

proptest! {
    #[test]
    fn cells_valid_rejects_out_of_range(
        board in board(),
        cells in prop::collection::vec((-3i8..13, -4i8..24), 0..4),
        bad_x in prop_oneof![-5i8..0, 10i8..15],
        bad_y in 20i8..30,
        pick_x in any::<bool>(),
    ) {
        let bad: Pos = if pick_x { (bad_x, 5) } else { (3, bad_y) };
        let mut cells = cells;
        cells.push(bad);
        prop_assert!(!board.cells_valid(&cells));
    }

    #[test]
    fn clear_full_rows_prepends_empty_rows(board in board()) {
        let full: Vec<usize> = (0..H).filter(|&y| board.is_row_full(y)).collect();
        let survivors: Vec<Vec<Cell>> = (0..H)
            .filter(|y| !full.contains(y))
            .map(|y| board.row(y).to_vec())
            .collect();

        let (cleared, k) = board.with_full_rows_cleared();
        prop_assert_eq!(k, full.len());
        prop_assert_eq!(cleared.height(), BOARD_HEIGHT);
        for y in 0..k {
            prop_assert!(cleared.row(y).iter().all(|c| c.is_empty()));
        }
        for (i, row) in survivors.iter().enumerate() {
            prop_assert_eq!(cleared.row(k + i), row.as_slice());
        }
    }

    #[test]
    fn metrics_are_pure(board in board()) {
        let before = board.clone();
        prop_assert_eq!(board.metrics(), board.metrics());
        prop_assert_eq!(board, before);
    }

    #[test]
    fn rotation_is_cyclic(kind in piece_kind(), turns in 0usize..12) {
        let shape = template(kind);
        let mut rotated = shape;
        for _ in 0..turns {
            rotated = rotated.rotate();
        }
        for _ in 0..(4 - turns % 4) {
            rotated = rotated.rotate();
        }
        prop_assert_eq!(rotated, shape);
        prop_assert!(unique_rotations(shape).contains(&shape.rotate()));
    }

    #[test]
    fn best_placement_dominates(board in board(), kind in piece_kind()) {
        let planner = Planner::default();
        let shape = template(kind);
        let candidates = planner.placements(&board, shape, kind);
        match planner.best(&board, shape, kind) {
            Some(best) => {
                for c in &candidates {
                    prop_assert!(best.evaluation.score >= c.evaluation.score);
                }
                let first = candidates
                    .iter()
                    .find(|c| c.evaluation.score == best.evaluation.score);
                prop_assert_eq!(first, Some(&best));
            }
            None => prop_assert!(candidates.is_empty()),
        }
    }

    #[test]
    fn action_queue_length_matches_plan(
        board in open_board(),
        kind in piece_kind(),
        rotation in 0usize..4,
    ) {
        let cycle = rotation_cycle(kind);
        let piece = Tetromino { rotation: rotation % cycle.len(), ..Tetromino::new(kind) };
        let best = Planner::default().best(&board, piece.shape(), kind);
        prop_assert!(best.is_some());
        let best = best.unwrap();

        let actions = build_actions(&piece, &best).unwrap();
        let turns = actions.iter().filter(|a| **a == AutoAction::Rotate).count();
        prop_assert_eq!(turns, best.rotation % cycle.len());
        prop_assert_eq!(
            actions.len(),
            turns + (best.x - piece.x).unsigned_abs() as usize + 1
        );
    }
}
