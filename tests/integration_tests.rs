//! Integration tests for the game loop

use autotris::core::{Board, GameState, Phase};
use autotris::engine::{Autoplayer, Control, Session};
use autotris::types::{
    Cell, GameAction, PieceKind, AI_INTERVAL_MS, DROP_STEP_MS, HISTORY_CAPACITY, INITIAL_DROP_MS,
};

fn session_on(board: Board, kind: PieceKind, autoplay: bool) -> Session {
    let mut session = Session::from_parts(
        GameState::with_board(board, 12345),
        Autoplayer::new(autoplay, AI_INTERVAL_MS),
    );
    assert!(session.state_mut().spawn_kind(kind));
    session
}

#[test]
fn test_game_lifecycle() {
    let session = Session::new(12345, false, AI_INTERVAL_MS);
    assert!(session.state().started());
    assert!(session.state().active().is_some());
    assert_eq!(session.state().phase(), Phase::Falling);
    assert!(!session.game_over());
    assert_eq!(session.state().score(), 0);
}

#[test]
fn test_hard_drop_i_on_empty_board() {
    let mut session = session_on(Board::new(), PieceKind::I, false);
    assert_eq!(session.state().active().unwrap().x, 3);

    session.handle_action(GameAction::HardDrop);
    let event = session.update(0).expect("hard drop locks on the next fall tick");

    assert_eq!(event.kind, Some(PieceKind::I));
    assert_eq!(event.lines_cleared, 0);
    assert_eq!(session.state().score(), 0);

    let board = session.state().board();
    assert_eq!(board.filled_count(), 4);
    for x in 3..7 {
        assert_eq!(board.get(x, 19), Some(Cell::Filled(PieceKind::I)));
    }
}

#[test]
fn test_completing_a_row_scores_and_speeds_up() {
    let board = Board::from_ascii(&["IIIIIIIII."]).unwrap();
    let mut session = session_on(board, PieceKind::I, false);

    session.handle_action(GameAction::Rotate);
    for _ in 0..10 {
        session.handle_action(GameAction::MoveRight);
    }
    assert_eq!(session.state().active().unwrap().x, 9);
    session.handle_action(GameAction::HardDrop);

    let event = session.update(0).unwrap();
    assert_eq!(event.lines_cleared, 1);
    assert_eq!(event.score_delta, 100);
    assert_eq!(session.state().score(), 100);
    assert_eq!(session.state().lines(), 1);
    assert_eq!(session.state().drop_interval_ms(), INITIAL_DROP_MS - DROP_STEP_MS);
    // The rest of the bar stays in column 9.
    assert_eq!(session.state().board().filled_count(), 3);
}

#[test]
fn test_spawn_occupied_is_game_over() {
    let mut board = Board::new();
    board.set(4, 0, Cell::Filled(PieceKind::Z));
    board.set(5, 0, Cell::Filled(PieceKind::Z));
    board.set(4, 1, Cell::Filled(PieceKind::Z));
    let mut session = Session::from_parts(
        GameState::with_board(board.clone(), 1),
        Autoplayer::new(false, AI_INTERVAL_MS),
    );

    assert!(session.game_over());
    assert_eq!(session.state().phase(), Phase::GameOver);

    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::Rotate,
        GameAction::SoftDrop,
        GameAction::HardDrop,
    ] {
        assert_eq!(session.handle_action(action), Control::Continue);
    }
    assert!(session.update(10_000).is_none());
    assert_eq!(session.state().board(), &board);
    assert!(session.snapshot().game_over);
}

#[test]
fn test_no_placement_at_spawn_is_game_over() {
    // Row 0 is open, every row below leaves only column 0: an O enters but
    // has no resting place anywhere.
    let board = Board::from_ascii(&[".SSSSSSSSS"; 19]).unwrap();
    let mut session = session_on(board, PieceKind::O, true);

    assert!(session.update(1).is_none());
    assert!(session.game_over());
    assert_eq!(session.state().phase(), Phase::GameOver);
    assert!(!session.autoplay_enabled());
    assert!(session.autoplayer().queue().is_empty());
    assert!(session.autoplayer().history().is_empty());

    // Stays over: later frames neither re-plan nor move anything.
    for _ in 0..100 {
        assert!(session.update(16).is_none());
    }
    assert!(session.state().active().is_none());
    assert_eq!(session.state().pieces_locked(), 0);
}

#[test]
fn test_no_placement_mid_fall_keeps_playing() {
    let board = Board::from_ascii(&[".SSSSSSSSS"; 19]).unwrap();
    let mut session = session_on(board, PieceKind::O, false);
    assert!(session.state_mut().move_left());

    session.handle_action(GameAction::ToggleAutoplay);
    session.update(1);
    assert!(!session.game_over());
    assert!(session.autoplay_enabled());
    assert!(session.autoplayer().history().is_empty());
}

#[test]
fn test_manual_input_ignored_under_autoplay() {
    let mut session = session_on(Board::new(), PieceKind::T, true);
    let before = session.state().active();
    session.handle_action(GameAction::MoveLeft);
    session.handle_action(GameAction::HardDrop);
    assert_eq!(session.state().active(), before);

    session.handle_action(GameAction::ToggleAutoplay);
    assert!(!session.autoplay_enabled());
    session.handle_action(GameAction::MoveLeft);
    assert_eq!(session.state().active().unwrap().x, before.unwrap().x - 1);
}

#[test]
fn test_toggle_drops_pending_plan() {
    let mut session = session_on(Board::new(), PieceKind::L, true);
    session.update(1);
    assert!(!session.autoplayer().queue().is_empty());

    session.handle_action(GameAction::ToggleAutoplay);
    assert!(session.autoplayer().queue().is_empty());
    session.handle_action(GameAction::ToggleAutoplay);
    assert!(session.autoplay_enabled());
    assert!(session.autoplayer().queue().is_empty());
}

#[test]
fn test_lock_clears_autoplay_queue() {
    let mut session = session_on(Board::new(), PieceKind::S, true);
    session.update(1);
    assert!(!session.autoplayer().queue().is_empty());

    session.state_mut().hard_drop();
    assert!(session.update(0).is_some());
    assert!(session.autoplayer().queue().is_empty());

    // Next frame plans for the new piece.
    session.update(0);
    assert!(!session.autoplayer().queue().is_empty());
}

#[test]
fn test_autoplay_paces_actions() {
    let mut session = session_on(Board::new(), PieceKind::J, true);
    session.update(1);
    let planned = session.autoplayer().queue().len();

    session.update(AI_INTERVAL_MS - 2);
    assert_eq!(session.autoplayer().queue().len(), planned);
    session.update(1);
    assert_eq!(session.autoplayer().queue().len(), planned - 1);
}

#[test]
fn test_autoplay_lands_planned_cells() {
    let mut session = session_on(Board::new(), PieceKind::T, true);
    session.update(1);
    let target = session.autoplayer().last_plan().unwrap().cells.clone();

    let mut locked = None;
    for _ in 0..100 {
        if let Some(event) = session.update(AI_INTERVAL_MS) {
            locked = Some(event);
            break;
        }
    }
    assert_eq!(locked.and_then(|e| e.kind), Some(PieceKind::T));
    for &(x, y) in &target {
        assert_eq!(
            session.state().board().get(x, y),
            Some(Cell::Filled(PieceKind::T))
        );
    }
}

#[test]
fn test_autoplay_long_run() {
    let mut session = Session::new(2024, true, 20);
    for _ in 0..20_000 {
        session.update(20);
        if session.game_over() {
            break;
        }
    }

    let state = session.state();
    assert!(state.pieces_locked() > 0);
    let history = session.autoplayer().history();
    assert!(history.len() <= HISTORY_CAPACITY);
    if state.pieces_locked() as usize > HISTORY_CAPACITY {
        assert_eq!(history.len(), HISTORY_CAPACITY);
    }
    if session.game_over() {
        session.update(20);
        assert!(!session.autoplay_enabled());
        assert!(session.autoplayer().queue().is_empty());
        session.handle_action(GameAction::ToggleAutoplay);
        assert!(!session.autoplay_enabled());
    }
}

#[test]
fn test_same_seed_same_game() {
    let run = |seed| {
        let mut session = Session::new(seed, true, AI_INTERVAL_MS);
        for _ in 0..3_000 {
            session.update(16);
        }
        session.snapshot()
    };
    assert_eq!(run(77), run(77));
}

#[test]
fn test_quit() {
    let mut session = Session::new(1, true, AI_INTERVAL_MS);
    assert_eq!(session.handle_action(GameAction::Quit), Control::Quit);
}
