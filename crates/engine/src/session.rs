//! Session - the per-frame game loop state machine.
//!
//! Combines a [`GameState`] with an [`Autoplayer`]. The binary feeds it
//! intents and elapsed wall-clock time; rendering reads a [`Snapshot`].

use log::{debug, info};

use crate::autoplay::Autoplayer;
use crate::core::{GameState, LockEvent};
use crate::plan::apply_auto_action;
use crate::snapshot::{ActiveSnapshot, Grid, Snapshot, TargetSnapshot};
use crate::types::{Cell, GameAction, BOARD_HEIGHT, BOARD_WIDTH};

/// What the loop should do after an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    autoplayer: Autoplayer,
}

impl Session {
    pub fn new(seed: u32, autoplay: bool, ai_interval_ms: u32) -> Self {
        Self::from_parts(GameState::new(seed), Autoplayer::new(autoplay, ai_interval_ms))
    }

    /// Wrap an existing game; it is started if it was not.
    pub fn from_parts(mut state: GameState, autoplayer: Autoplayer) -> Self {
        state.start();
        Self { state, autoplayer }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn autoplayer(&self) -> &Autoplayer {
        &self.autoplayer
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.autoplayer.enabled()
    }

    pub fn game_over(&self) -> bool {
        self.state.game_over()
    }

    /// Apply one input intent.
    ///
    /// Movement is ignored while autoplay runs or after game over.
    pub fn handle_action(&mut self, action: GameAction) -> Control {
        match action {
            GameAction::Quit => return Control::Quit,
            GameAction::ToggleAutoplay => {
                if !self.state.game_over() {
                    self.autoplayer.toggle();
                }
            }
            action if action.is_movement() => {
                if !self.autoplayer.enabled() && !self.state.game_over() {
                    self.state.apply_action(action);
                }
            }
            _ => {}
        }
        Control::Continue
    }

    /// Advance one frame by `elapsed_ms`.
    ///
    /// Order: AI timer, game-over shutdown or planning, one paced AI step,
    /// then gravity. Returns the lock that happened this frame, if any.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<LockEvent> {
        self.autoplayer.advance(elapsed_ms);

        if self.state.game_over() {
            if self.autoplayer.enabled() {
                info!("game over: autoplay stopped");
                self.autoplayer.set_enabled(false);
            }
            self.autoplayer.clear_queue();
        } else if self.autoplayer.enabled() && self.autoplayer.queue().is_empty() {
            if let Some(active) = self.state.active() {
                match self.autoplayer.plan(self.state.board(), &active) {
                    Ok(true) => {}
                    Ok(false) if active.at_spawn() => {
                        self.state.top_out();
                        self.autoplayer.set_enabled(false);
                    }
                    // Mid-fall: gravity settles the piece, retry next frame.
                    Ok(false) => {}
                    Err(err) => self.autoplayer.disable(err),
                }
            }
        }

        if !self.state.game_over() {
            if let Some(action) = self.autoplayer.next_action() {
                if !apply_auto_action(&mut self.state, action) {
                    debug!("autoplay step {} blocked", action.as_str());
                }
            }
        }

        let event = self.state.tick(elapsed_ms);
        if event.is_some() {
            self.autoplayer.clear_queue();
        }
        event
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut board: Grid = [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        for (dst, src) in board.iter_mut().zip(self.state.board().rows()) {
            dst.copy_from_slice(src);
        }

        let target = self.autoplayer.last_plan().map(|plan| TargetSnapshot {
            kind: plan.kind,
            rotation: plan.rotation,
            x: plan.x,
            y: plan.y,
            cells: plan.cells.clone(),
        });

        Snapshot {
            board,
            active: self.state.active().map(ActiveSnapshot::from),
            next: self.state.next_piece(),
            target,
            score: self.state.score(),
            lines: self.state.lines(),
            drop_interval_ms: self.state.drop_interval_ms(),
            autoplay: self.autoplayer.enabled(),
            game_over: self.state.game_over(),
            phase: self.state.phase(),
            history: self.autoplayer.history().iter().copied().collect(),
            evaluation: self.autoplayer.last_plan().map(|plan| plan.evaluation),
        }
    }
}
