//! Autoplay engine - placement search, action planning and the game loop.
//!
//! - [`search`]: exhaustive greedy placement search and the weighted heuristic
//! - [`plan`]: placement to primitive steps (rotate, shift, drop)
//! - [`autoplay`]: paced replay of planned steps and the bounded plan history
//! - [`session`]: per-frame loop combining the game and the autoplayer
//! - [`snapshot`]: owned frame view for renderers
//!
//! # Example
//!
//! ```
//! use autotris_engine::Session;
//!
//! let mut session = Session::new(7, true, 120);
//! for _ in 0..600 {
//!     session.update(16);
//! }
//! assert!(session.state().pieces_locked() > 0);
//! ```

pub mod autoplay;
pub mod plan;
pub mod search;
pub mod session;
pub mod snapshot;

pub use autotris_core as core;
pub use autotris_types as types;

pub use autoplay::{Autoplayer, History, HistoryEntry};
pub use plan::{apply_auto_action, build_actions, plan_for, ActionQueue, AutoAction, PlanError};
pub use search::{Contributions, Evaluation, Placement, Planner, Weights};
pub use session::{Control, Session};
pub use snapshot::{ActiveSnapshot, Grid, Snapshot, TargetSnapshot};
