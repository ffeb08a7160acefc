//! Autoplayer: plans a placement per piece and replays it on its own timer.

use std::collections::VecDeque;

use log::{debug, info, warn};

use crate::core::{Board, Tetromino};
use crate::plan::{build_actions, ActionQueue, AutoAction, PlanError};
use crate::search::{Placement, Planner};
use crate::types::{AI_INTERVAL_MIN_MS, HISTORY_CAPACITY};

/// Display values of one plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryEntry {
    pub reward: u32,
    pub penalty: u32,
}

/// Bounded FIFO of recent plans; the oldest entry is evicted first.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Largest reward or penalty held, for chart scaling.
    pub fn peak(&self) -> u32 {
        self.entries
            .iter()
            .map(|e| e.reward.max(e.penalty))
            .max()
            .unwrap_or(0)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

#[derive(Debug, Clone)]
pub struct Autoplayer {
    enabled: bool,
    queue: ActionQueue,
    timer_ms: u32,
    interval_ms: u32,
    planner: Planner,
    history: History,
    last_plan: Option<Placement>,
}

impl Autoplayer {
    /// `interval_ms` is clamped to the minimum AI tick.
    pub fn new(enabled: bool, interval_ms: u32) -> Self {
        Self::with_planner(enabled, interval_ms, Planner::default())
    }

    pub fn with_planner(enabled: bool, interval_ms: u32, planner: Planner) -> Self {
        Self {
            enabled,
            queue: ActionQueue::new(),
            timer_ms: 0,
            interval_ms: interval_ms.max(AI_INTERVAL_MIN_MS),
            planner,
            history: History::default(),
            last_plan: None,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn timer_ms(&self) -> u32 {
        self.timer_ms
    }

    pub fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn last_plan(&self) -> Option<&Placement> {
        self.last_plan.as_ref()
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    /// Flip autoplay and drop any pending steps. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.queue.clear();
        info!("autoplay {}", if enabled { "on" } else { "off" });
    }

    /// Stop after a failure: disable and forget pending steps.
    pub fn disable(&mut self, err: PlanError) {
        warn!("autoplay disabled: {err}");
        self.enabled = false;
        self.queue.clear();
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    pub fn advance(&mut self, elapsed_ms: u32) {
        self.timer_ms = self.timer_ms.saturating_add(elapsed_ms);
    }

    /// Search the board for `active` and queue the resulting steps.
    ///
    /// Returns `Ok(false)` when the piece fits nowhere; the queue stays empty
    /// and the previous plan is kept for display.
    pub fn plan(&mut self, board: &Board, active: &Tetromino) -> Result<bool, PlanError> {
        self.queue.clear();
        let Some(placement) = self.planner.best(board, active.shape(), active.kind) else {
            debug!("no placement for {}", active.kind.as_str());
            return Ok(false);
        };

        self.queue = build_actions(active, &placement)?;
        let eval = &placement.evaluation;
        self.history.push(HistoryEntry {
            reward: eval.reward,
            penalty: eval.penalty,
        });
        debug!(
            "plan {}: rotation {} x {} score {:.2} ({} steps)",
            placement.kind.as_str(),
            placement.rotation,
            placement.x,
            eval.score,
            self.queue.len()
        );
        self.last_plan = Some(placement);
        Ok(true)
    }

    /// Pop the next step once the AI timer is due, resetting the timer.
    pub fn next_action(&mut self) -> Option<AutoAction> {
        if !self.enabled || self.queue.is_empty() || self.timer_ms < self.interval_ms {
            return None;
        }
        self.timer_ms = 0;
        self.queue.pop_front()
    }
}

impl Default for Autoplayer {
    fn default() -> Self {
        Self::new(true, crate::types::AI_INTERVAL_MS)
    }
}
