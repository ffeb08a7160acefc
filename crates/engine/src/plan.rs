//! Translating a chosen placement into primitive piece actions.

use std::collections::VecDeque;
use std::fmt;

use crate::core::{unique_rotations, GameState, Tetromino};
use crate::search::Placement;

/// Primitive step the autoplayer feeds to the game, one per AI tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutoAction {
    Rotate,
    Left,
    Right,
    Drop,
}

impl AutoAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AutoAction::Rotate => "rotate",
            AutoAction::Left => "left",
            AutoAction::Right => "right",
            AutoAction::Drop => "drop",
        }
    }
}

pub type ActionQueue = VecDeque<AutoAction>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    NoActive,
    NotPlayable,
    ShapeNotInCycle,
    RotationOutOfRange,
}

impl PlanError {
    pub fn code(self) -> &'static str {
        match self {
            PlanError::NoActive | PlanError::NotPlayable => "not_playable",
            PlanError::ShapeNotInCycle | PlanError::RotationOutOfRange => "invalid_plan",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlanError::NoActive => "no active piece",
            PlanError::NotPlayable => "game is not playable",
            PlanError::ShapeNotInCycle => "active shape is missing from its rotation cycle",
            PlanError::RotationOutOfRange => "target rotation is not in the rotation cycle",
        }
    }
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for PlanError {}

/// Rotations first, then the lateral shift, then a hard drop.
///
/// The rotation count is measured from the piece's current mask along the
/// cycle the search enumerated, so it matches the number of rotate presses.
pub fn build_actions(active: &Tetromino, placement: &Placement) -> Result<ActionQueue, PlanError> {
    let cycle = unique_rotations(active.shape());
    let current = cycle
        .iter()
        .position(|shape| *shape == active.shape())
        .ok_or(PlanError::ShapeNotInCycle)?;
    if cycle.get(placement.rotation) != Some(&placement.shape) {
        return Err(PlanError::RotationOutOfRange);
    }

    let len = cycle.len() as isize;
    let turns = (placement.rotation as isize - current as isize).rem_euclid(len) as usize;
    let dx = placement.x - active.x;

    let mut actions = ActionQueue::with_capacity(turns + dx.unsigned_abs() as usize + 1);
    actions.extend(std::iter::repeat(AutoAction::Rotate).take(turns));
    let lateral = if dx < 0 {
        AutoAction::Left
    } else {
        AutoAction::Right
    };
    actions.extend(std::iter::repeat(lateral).take(dx.unsigned_abs() as usize));
    actions.push_back(AutoAction::Drop);
    Ok(actions)
}

/// Feed one step to the game. Blocked steps are no-ops and report `false`.
pub fn apply_auto_action(state: &mut GameState, action: AutoAction) -> bool {
    match action {
        AutoAction::Rotate => state.rotate(),
        AutoAction::Left => state.move_left(),
        AutoAction::Right => state.move_right(),
        AutoAction::Drop => state.hard_drop(),
    }
}

/// Check a placement can be planned from the state's current piece.
pub fn plan_for(state: &GameState, placement: &Placement) -> Result<ActionQueue, PlanError> {
    if !state.started() || state.game_over() {
        return Err(PlanError::NotPlayable);
    }
    let Some(active) = state.active() else {
        return Err(PlanError::NoActive);
    };
    build_actions(&active, placement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Board;
    use crate::search::Planner;
    use crate::types::PieceKind;

    fn placement_for(active: &Tetromino, rotation: usize, x: i8) -> Placement {
        Planner::default()
            .placements(&Board::new(), active.shape(), active.kind)
            .into_iter()
            .find(|p| p.rotation == rotation && p.x == x)
            .unwrap()
    }

    #[test]
    fn rotations_then_moves_then_drop() {
        let active = Tetromino::new(PieceKind::T);
        let placement = placement_for(&active, 2, 0);
        let actions: Vec<_> = build_actions(&active, &placement).unwrap().into();
        assert_eq!(
            actions,
            vec![
                AutoAction::Rotate,
                AutoAction::Rotate,
                AutoAction::Left,
                AutoAction::Left,
                AutoAction::Left,
                AutoAction::Drop,
            ]
        );
    }

    #[test]
    fn in_place_plan_is_single_drop() {
        let active = Tetromino::new(PieceKind::O);
        let placement = placement_for(&active, 0, active.x);
        let actions: Vec<_> = build_actions(&active, &placement).unwrap().into();
        assert_eq!(actions, vec![AutoAction::Drop]);
    }

    #[test]
    fn queue_length_is_turns_plus_distance_plus_one() {
        let active = Tetromino::new(PieceKind::I);
        let placement = placement_for(&active, 1, 9);
        let actions = build_actions(&active, &placement).unwrap();
        assert_eq!(actions.len(), 1 + 6 + 1);
        assert_eq!(actions.back(), Some(&AutoAction::Drop));
    }

    #[test]
    fn foreign_rotation_is_rejected() {
        let active = Tetromino::new(PieceKind::O);
        let mut placement = placement_for(&active, 0, 2);
        placement.rotation = 3;
        assert_eq!(
            build_actions(&active, &placement),
            Err(PlanError::RotationOutOfRange)
        );
    }

    #[test]
    fn plan_requires_started_game() {
        let state = GameState::new(4);
        let active = Tetromino::new(PieceKind::O);
        let placement = placement_for(&active, 0, 2);
        assert_eq!(plan_for(&state, &placement), Err(PlanError::NotPlayable));
    }

    #[test]
    fn error_display_has_code_and_message() {
        let text = PlanError::ShapeNotInCycle.to_string();
        assert!(text.starts_with("invalid_plan: "));
    }
}
