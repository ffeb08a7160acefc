//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules and state management.
//! It has **no dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: Board operations are plain functions over a value type
//! - **Portable**: Can run in any environment (terminal, headless, benches)
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision checks, line clearing and surface metrics
//! - [`pieces`]: Tetromino masks, rotation and rotation-cycle de-duplication
//! - [`rng`]: Seeded uniform piece source with a one-piece preview
//! - [`game_state`]: Active piece, gravity ramp, locking and scoring
//!
//! # Game Rules
//!
//! - Pieces spawn above the board at column 3 and fall in
//! - Rotation steps through the piece's distinct orientations, without kicks
//! - A blocked fall step locks the piece; cells still above the board vanish
//! - Clearing `n` lines at once scores `n * n * 100` and speeds gravity up by `20ms` per line
//! - The game ends when a new piece cannot enter the board
//!
//! # Example
//!
//! ```
//! use autotris_core::GameState;
//! use autotris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // The forced fall step locks the piece.
//! let event = game.tick(0).expect("hard drop forces a lock");
//! assert_eq!(event.lines_cleared, 0);
//! assert_eq!(game.board().filled_count(), 4);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;

pub use autotris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardMetrics};
pub use game_state::{GameState, LockEvent, Phase, Tetromino};
pub use pieces::{
    cells_of, rotation_cycle, template, unique_rotations, Cells, Pos, RotationCycle, Shape,
};
pub use rng::{PieceSource, SimpleRng};
