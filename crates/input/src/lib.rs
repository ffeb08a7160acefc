//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] intents.
//! The binding table is fixed.

pub mod map;

pub use autotris_types as types;

pub use map::{handle_key_event, should_quit};
