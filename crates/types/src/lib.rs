//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, autoplayer search, terminal rendering).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn anchor**: (`BOARD_WIDTH / 2 - 2`, -2), i.e. above the visible area
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FPS` | 60 | Frame cap for the event loop |
//! | `INITIAL_DROP_MS` | 700 | Gravity interval at game start |
//! | `DROP_STEP_MS` | 20 | Gravity speed-up per cleared line |
//! | `DROP_INTERVAL_FLOOR_MS` | 120 | Fastest gravity |
//! | `AI_INTERVAL_MS` | 120 | Autoplayer pacing between replayed actions |
//! | `AI_INTERVAL_MIN_MS` | 20 | Lower clamp for a configured pacing |
//!
//! # Examples
//!
//! ```
//! use autotris_types::{Cell, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! let cell = Cell::Filled(piece);
//! assert!(!cell.is_empty());
//! assert_eq!(cell.kind(), Some(PieceKind::T));
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column of the spawn anchor (top-left corner of the 4x4 mask).
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 2;

/// Row of the spawn anchor. Negative: pieces fall in from above the board.
pub const SPAWN_Y: i8 = -2;

/// Default frame cap of the terminal loop.
pub const DEFAULT_FPS: u32 = 60;

/// Gravity interval when a game starts.
pub const INITIAL_DROP_MS: u32 = 700;

/// Gravity speed-up applied per cleared line.
pub const DROP_STEP_MS: u32 = 20;

/// Gravity never gets faster than this.
pub const DROP_INTERVAL_FLOOR_MS: u32 = 120;

/// Pacing between two replayed autoplayer actions.
pub const AI_INTERVAL_MS: u32 = 120;

/// Lower clamp for a configured autoplayer pacing.
pub const AI_INTERVAL_MIN_MS: u32 = 20;

/// Number of (reward, penalty) pairs kept for the history chart.
pub const HISTORY_CAPACITY: usize = 60;

/// Score unit for line clears: a lock clearing `n` lines scores `n * n * LINE_SCORE_UNIT`.
pub const LINE_SCORE_UNIT: u32 = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(INITIAL_DROP_MS, 700);
        assert_eq!(DROP_STEP_MS, 20);
        assert_eq!(DROP_INTERVAL_FLOOR_MS, 120);
        assert_eq!(AI_INTERVAL_MS, 120);
        assert!(AI_INTERVAL_MIN_MS <= AI_INTERVAL_MS);
    }

    #[test]
    fn spawn_anchor_is_centered_above_board() {
        assert_eq!(SPAWN_X, 3);
        assert!(SPAWN_Y < 0);
    }

    #[test]
    fn movement_intents() {
        assert!(GameAction::HardDrop.is_movement());
        assert!(GameAction::Rotate.is_movement());
        assert!(!GameAction::ToggleAutoplay.is_movement());
        assert!(!GameAction::Quit.is_movement());
    }

    #[test]
    fn cell_accessors() {
        assert!(Cell::Empty.is_empty());
        assert_eq!(Cell::Empty.kind(), None);
        assert_eq!(Cell::from(Some(PieceKind::L)), Cell::Filled(PieceKind::L));
        assert_eq!(Cell::from(None), Cell::Empty);
    }
}

/// The seven tetromino piece kinds
///
/// The kind doubles as the colour identity of locked cells:
/// - **I**: horizontal bar
/// - **O**: 2x2 square
/// - **T**: T-shaped
/// - **S**: S-shaped
/// - **Z**: Z-shaped (mirror of S)
/// - **J**: J-shaped
/// - **L**: L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use autotris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Position in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }
}

/// A single board cell: either empty or occupied by a piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(PieceKind),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn kind(&self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Filled(kind) => Some(*kind),
        }
    }
}

impl From<Option<PieceKind>> for Cell {
    fn from(value: Option<PieceKind>) -> Self {
        match value {
            Some(kind) => Cell::Filled(kind),
            None => Cell::Empty,
        }
    }
}

/// Discrete intents delivered by the input layer
///
/// Movement intents are ignored while the autoplayer is driving the piece or
/// once the game is over. `ToggleAutoplay` and `Quit` are always honored
/// (toggling is a no-op after game over).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    ToggleAutoplay,
    Quit,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "toggleautoplay" => Some(GameAction::ToggleAutoplay),
            "quit" => Some(GameAction::Quit),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::ToggleAutoplay => "toggleAutoplay",
            GameAction::Quit => "quit",
        }
    }

    /// Whether this intent moves the active piece.
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            GameAction::MoveLeft
                | GameAction::MoveRight
                | GameAction::SoftDrop
                | GameAction::Rotate
                | GameAction::HardDrop
        )
    }
}
