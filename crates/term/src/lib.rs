//! Terminal renderer for the game.
//!
//! Renders into a plain framebuffer instead of a widget toolkit and flushes
//! only the changed runs to the terminal. Board cells are drawn 2 columns
//! wide to keep them roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use autotris_engine as engine;
pub use autotris_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{
    encode_diff_into, encode_full_into, restore_terminal, terminal_entered, TerminalRenderer,
};
