//! Text renderer for board snapshots.
//!
//! Output is deliberately plain: one line per grid row, top to bottom, each
//! line the row's cell markers joined together. No borders, colors or cursor
//! control.

pub mod renderer;

pub use text_tetris_core as core;
pub use text_tetris_types as types;

pub use renderer::{render_to_string, TextRenderer};
