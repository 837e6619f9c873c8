//! Text Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof as `text_tetris::{core,term,types}`
//! and hosts the scripted demo session used by the binary.

pub mod demo;

pub use text_tetris_core as core;
pub use text_tetris_term as term;
pub use text_tetris_types as types;
