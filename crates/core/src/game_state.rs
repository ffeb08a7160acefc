//! Game state module - falling piece, gravity and locking
//!
//! This module ties together the board, the piece catalog and the piece source.
//! It owns the active piece, the score and the gravity ramp, and exposes the
//! named operations the game loop drives (`move_left`, `rotate`, `hard_drop`,
//! `tick`, ...).

use log::{debug, info};

use crate::types::*;
use crate::pieces::{rotation_cycle, Cells, Shape};
use crate::{Board, PieceSource};

/// Lifecycle of the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// An active piece exists and can still move.
    Falling,
    /// The piece has settled and is being written into the board.
    ///
    /// Transient: only held inside [`GameState::lock_piece`], which leaves
    /// the game `Falling` or `GameOver` before returning.
    Locking,
    /// Terminal: no more spawns, movement is ignored.
    GameOver,
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    /// Index into the kind's rotation cycle.
    pub rotation: usize,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at the spawn anchor
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Mask for the current rotation
    pub fn shape(&self) -> Shape {
        rotation_cycle(self.kind)[self.rotation]
    }

    /// Number of distinct rotation states of this kind.
    pub fn cycle_len(&self) -> usize {
        rotation_cycle(self.kind).len()
    }

    /// Still at the spawn anchor in its first rotation state.
    pub fn at_spawn(&self) -> bool {
        self.x == SPAWN_X && self.y == SPAWN_Y && self.rotation == 0
    }

    /// Board cells covered by the piece
    pub fn cells(&self) -> Cells {
        self.shape().cells_at(self.x, self.y)
    }

    /// Check if all cells are at valid positions on the board
    pub fn is_valid(&self, board: &Board) -> bool {
        board.cells_valid(&self.cells())
    }

    /// Same piece shifted by `(dx, dy)`.
    pub fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Same piece in its next rotation state.
    pub fn rotated(self) -> Self {
        Self {
            rotation: (self.rotation + 1) % self.cycle_len(),
            ..self
        }
    }

    /// Row at which the piece rests if dropped straight down from here.
    pub fn landing_y(&self, board: &Board) -> i8 {
        let mut piece = *self;
        while piece.shifted(0, 1).is_valid(board) {
            piece.y += 1;
        }
        piece.y
    }
}

/// Outcome of locking a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub kind: Option<PieceKind>,
    pub lines_cleared: u32,
    pub score_delta: u32,
    /// The next piece could not spawn.
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    pieces: PieceSource,
    phase: Phase,
    started: bool,
    score: u32,
    lines: u32,
    pieces_locked: u32,
    drop_interval_ms: u32,
    drop_timer_ms: u32,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_board(Board::new(), seed)
    }

    /// Create a game on a prepared board.
    pub fn with_board(board: Board, seed: u32) -> Self {
        Self {
            board,
            active: None,
            pieces: PieceSource::new(seed),
            phase: Phase::Falling,
            started: false,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            drop_interval_ms: INITIAL_DROP_MS,
            drop_timer_ms: 0,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn seed(&self) -> u32 {
        self.pieces.seed()
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    /// Preview of the piece that spawns after the active one.
    pub fn next_piece(&self) -> PieceKind {
        self.pieces.peek()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scripted setups.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Spawn a new piece from the source
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.pieces.draw();
        self.spawn_kind(kind)
    }

    /// Spawn `kind` at the spawn anchor, replacing any active piece.
    ///
    /// Fails (and ends the game) when the spawn cells collide or when the
    /// piece could not enter the visible board at the spawn column.
    ///
    /// The entry rule is stricter than a collision test at the anchor: a
    /// piece that could still slide sideways above the board is refused once
    /// its own columns are blocked on the entry rows.
    pub fn spawn_kind(&mut self, kind: PieceKind) -> bool {
        let piece = Tetromino::new(kind);
        let entry = Tetromino {
            y: -(piece.shape().bottom_row() as i8),
            ..piece
        };

        if !piece.is_valid(&self.board) || !entry.is_valid(&self.board) {
            self.end_game(&format!("{} blocked at spawn", kind.as_str()));
            return false;
        }

        self.active = Some(piece);
        self.phase = Phase::Falling;
        true
    }

    /// End the game now, discarding the active piece.
    ///
    /// Used when the current piece has nowhere left to go.
    pub fn top_out(&mut self) {
        if self.phase == Phase::GameOver {
            return;
        }
        let reason = match self.active {
            Some(piece) => format!("no placement for {}", piece.kind.as_str()),
            None => "no active piece".to_string(),
        };
        self.end_game(&reason);
    }

    fn end_game(&mut self, reason: &str) {
        self.active = None;
        self.phase = Phase::GameOver;
        info!(
            "game over: {} (score {}, lines {}, pieces {})",
            reason, self.score, self.lines, self.pieces_locked
        );
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if moved.is_valid(&self.board) {
            self.active = Some(moved);
            return true;
        }
        false
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move down one row if possible.
    pub fn soft_drop(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Advance to the next rotation state if it fits in place.
    pub fn rotate(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.rotated();
        if rotated.is_valid(&self.board) {
            self.active = Some(rotated);
            return true;
        }
        false
    }

    /// Drop to the resting row and force the next fall step to fire.
    ///
    /// The piece is not locked here; the next [`GameState::tick`] finds it
    /// blocked and locks it.
    pub fn hard_drop(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        self.active = Some(Tetromino {
            y: active.landing_y(&self.board),
            ..active
        });
        self.drop_timer_ms = self.drop_interval_ms;
        true
    }

    /// One gravity step: move down, or lock when blocked.
    pub fn fall_step(&mut self) -> Option<LockEvent> {
        if self.phase != Phase::Falling || self.active.is_none() {
            return None;
        }
        if self.try_move(0, 1) {
            return None;
        }
        Some(self.lock_piece())
    }

    /// Lock the active piece onto the board and handle line clears
    pub fn lock_piece(&mut self) -> LockEvent {
        let Some(active) = self.active.take() else {
            return LockEvent::default();
        };
        self.phase = Phase::Locking;

        self.board.lock(&active.cells(), active.kind);
        let cleared = self.board.clear_full_rows() as u32;
        self.pieces_locked += 1;

        let score_delta = cleared * cleared * LINE_SCORE_UNIT;
        if cleared > 0 {
            self.score += score_delta;
            self.lines += cleared;
            self.drop_interval_ms = self
                .drop_interval_ms
                .saturating_sub(cleared * DROP_STEP_MS)
                .max(DROP_INTERVAL_FLOOR_MS);
            debug!(
                "cleared {} line(s): score {}, drop interval {}ms",
                cleared, self.score, self.drop_interval_ms
            );
        }

        let spawned = self.spawn_piece();
        LockEvent {
            kind: Some(active.kind),
            lines_cleared: cleared,
            score_delta,
            game_over: !spawned,
        }
    }

    /// Advance the gravity timer by `elapsed_ms` and run a fall step when due.
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<LockEvent> {
        if !self.started || self.phase == Phase::GameOver {
            return None;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms < self.drop_interval_ms {
            return None;
        }
        self.drop_timer_ms = 0;
        self.fall_step()
    }

    /// Apply a movement intent. Non-movement intents are not handled here.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::ToggleAutoplay | GameAction::Quit => false,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started_with(kind: PieceKind) -> GameState {
        let mut state = GameState::new(12345);
        state.start();
        assert!(state.spawn_kind(kind));
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(!state.started);
        assert_eq!(state.phase, Phase::Falling);
        assert_eq!(state.score, 0);
        assert_eq!(state.drop_interval_ms, INITIAL_DROP_MS);
        assert!(state.active.is_none());
    }

    #[test]
    fn test_game_start() {
        let mut state = GameState::new(12345);
        state.start();
        assert!(state.started);

        let active = state.active.unwrap();
        assert_eq!((active.x, active.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(active.rotation, 0);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut state = GameState::new(12345);
        state.start();
        let first = state.active;
        state.start();
        assert_eq!(state.active, first);
    }

    #[test]
    fn test_tetromino_rotated_wraps_cycle() {
        let o = Tetromino::new(PieceKind::O);
        assert_eq!(o.rotated().rotation, 0);

        let i = Tetromino::new(PieceKind::I);
        assert_eq!(i.rotated().rotation, 1);
        assert_eq!(i.rotated().rotated().rotation, 0);
    }

    #[test]
    fn test_move_stops_at_wall() {
        let mut state = started_with(PieceKind::O);
        let mut moved = 0;
        for _ in 0..10 {
            if state.move_left() {
                moved += 1;
            }
        }
        assert_eq!(moved, SPAWN_X as i32);
        assert_eq!(state.active.unwrap().x, 0);
    }

    #[test]
    fn test_rotate_blocked_keeps_state() {
        let mut state = started_with(PieceKind::I);
        while state.soft_drop() {}
        let before = state.active.unwrap();
        assert_eq!(before.y, 19);

        // A vertical bar would reach below the floor.
        assert!(!state.rotate());
        assert_eq!(state.active.unwrap(), before);
    }

    #[test]
    fn test_hard_drop_forces_next_tick() {
        let mut state = started_with(PieceKind::T);
        assert!(state.hard_drop());
        assert_eq!(state.drop_timer_ms, state.drop_interval_ms);
        assert_eq!(state.active.unwrap().y, 18);

        let event = state.tick(0).expect("blocked piece locks on the forced tick");
        assert_eq!(event.kind, Some(PieceKind::T));
        assert_eq!(state.board.filled_count(), 4);
    }

    #[test]
    fn test_tick_waits_for_interval() {
        let mut state = started_with(PieceKind::L);
        let y0 = state.active.unwrap().y;
        assert!(state.tick(INITIAL_DROP_MS - 1).is_none());
        assert_eq!(state.active.unwrap().y, y0);
        assert!(state.tick(1).is_none());
        assert_eq!(state.active.unwrap().y, y0 + 1);
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn test_lock_clears_lines_and_speeds_up() {
        let board = Board::from_ascii(&["IIIIIIII..", "IIIIIIII.."]).unwrap();
        let mut state = GameState::with_board(board, 1);
        state.start();
        assert!(state.spawn_kind(PieceKind::O));
        for _ in 0..10 {
            state.move_right();
        }
        assert_eq!(state.active.unwrap().x, 8);

        state.hard_drop();
        let event = state.fall_step().unwrap();

        assert_eq!(event.lines_cleared, 2);
        assert_eq!(event.score_delta, 400);
        assert_eq!(state.score, 400);
        assert_eq!(state.lines, 2);
        assert_eq!(state.drop_interval_ms, INITIAL_DROP_MS - 2 * DROP_STEP_MS);
        assert_eq!(state.board.filled_count(), 0);
    }

    #[test]
    fn test_drop_interval_has_floor() {
        let board = Board::from_ascii(&["IIIIIIIII."; 4]).unwrap();
        let mut state = GameState::with_board(board, 3);
        state.drop_interval_ms = DROP_INTERVAL_FLOOR_MS + 10;
        state.start();
        assert!(state.spawn_kind(PieceKind::I));
        assert!(state.rotate());
        for _ in 0..10 {
            state.move_right();
        }
        assert_eq!(state.active.unwrap().x, 9);

        state.hard_drop();
        let event = state.fall_step().unwrap();
        assert_eq!(event.lines_cleared, 4);
        assert_eq!(event.score_delta, 1600);
        assert_eq!(state.drop_interval_ms, DROP_INTERVAL_FLOOR_MS);
    }

    #[test]
    fn test_spawn_blocked_is_game_over() {
        let mut state = GameState::new(1);
        for x in 0..BOARD_WIDTH as i8 {
            state.board.set(x, 0, Cell::Filled(PieceKind::Z));
        }
        state.start();
        assert!(state.game_over());
        assert!(state.active.is_none());
        assert!(!state.move_left());
        assert!(state.tick(10_000).is_none());
    }

    #[test]
    fn test_cells_above_board_are_dropped_on_lock() {
        let mut state = started_with(PieceKind::O);
        // Columns 0-1 are stacked up to row 1, so an O parked there locks at y = -1.
        for y in 1..20 {
            state.board.set(0, y, Cell::Filled(PieceKind::J));
            state.board.set(1, y, Cell::Filled(PieceKind::J));
        }
        for _ in 0..5 {
            state.move_left();
        }
        assert_eq!(state.active.unwrap().x, 0);
        state.hard_drop();
        assert_eq!(state.active.unwrap().y, -1);
        let before = state.board.filled_count();
        state.fall_step().unwrap();
        assert_eq!(state.board.filled_count(), before + 2);
    }

    #[test]
    fn test_entry_rule_refuses_piece_that_could_slide() {
        let mut state = GameState::new(1);
        state.board.set(SPAWN_X, 0, Cell::Filled(PieceKind::Z));
        // The anchor itself is clear; only the entry row is blocked.
        assert!(Tetromino::new(PieceKind::I).is_valid(&state.board));
        assert!(!state.spawn_kind(PieceKind::I));
        assert!(state.game_over());
    }

    #[test]
    fn test_locking_phase_is_never_observed() {
        let mut state = started_with(PieceKind::O);
        state.hard_drop();
        assert!(state.tick(0).is_some());
        assert_eq!(state.phase(), Phase::Falling);
    }

    #[test]
    fn test_top_out_ends_game() {
        let mut state = started_with(PieceKind::T);
        assert!(state.active().is_some_and(|p| p.at_spawn()));
        state.top_out();
        assert!(state.game_over());
        assert!(state.active().is_none());
        assert!(!state.move_left());
        assert!(state.tick(10_000).is_none());
    }

    #[test]
    fn test_moved_piece_is_not_at_spawn() {
        let mut state = started_with(PieceKind::T);
        assert!(state.move_left());
        assert!(!state.active().is_some_and(|p| p.at_spawn()));
    }

    #[test]
    fn test_apply_action_ignores_loop_intents() {
        let mut state = started_with(PieceKind::T);
        assert!(!state.apply_action(GameAction::ToggleAutoplay));
        assert!(!state.apply_action(GameAction::Quit));
        assert!(state.apply_action(GameAction::MoveRight));
        assert_eq!(state.active.unwrap().x, SPAWN_X + 1);
    }
}
