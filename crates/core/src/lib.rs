//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the whole game-state machine of the falling-block
//! engine. It has **no dependencies** on rendering, input or I/O:
//!
//! - **Deterministic**: a seeded [`SimpleRng`] or a [`ScriptedSource`] fixes the shape sequence
//! - **Testable**: every transition is a plain method call
//! - **Synchronous**: no timers; the caller decides how often to [`Board::tick`]
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size cell grid with bounds-aware occupancy and row clearing
//! - [`pieces`]: shape tables, the shape catalog and the rotation cursor
//! - [`board`]: the state machine (spawn, fall, rotate, slam, lock, clear)
//! - [`rng`]: shape sources (seeded LCG, scripted sequences)
//! - [`snapshot`]: read-only grid copies for renderers
//! - [`config`]: board dimensions and seed
//!
//! # Game Rules
//!
//! - Pieces spawn at `(row 0, col width / 2)` in rotation state 0
//! - A blocked spawn ends the game; nothing is stamped for it
//! - Each tick moves the active piece down one row, or locks it if it cannot move
//! - Rotation is rejected outright when blocked (no wall kicks)
//! - Cells outside the grid always count as occupied
//! - Full rows are cleared after every lock and everything above settles down
//!
//! # Example
//!
//! ```
//! use text_tetris_core::{Board, ScriptedSource, ShapeCatalog};
//!
//! // Always spawn lines (catalog index 1)
//! let mut board =
//!     Board::with_source(16, 25, ShapeCatalog::standard(), ScriptedSource::repeat(1)).unwrap();
//!
//! board.tick(); // spawn at (0, 8)
//! board.tick(); // fall to (1, 8)
//! assert!(board.rotate(1)); // horizontal -> vertical
//!
//! let snapshot = board.snapshot();
//! assert_eq!(snapshot.cell(4, 8), Some('X'));
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use text_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{footprint, ActivePiece, Board, Footprint, LockEvent};
pub use config::BoardConfig;
pub use error::{Result, TetrisError};
pub use grid::Grid;
pub use pieces::{Piece, RotationState, ShapeCatalog, ShapeDef};
pub use rng::{ScriptedSource, ShapeSource, SimpleRng};
pub use snapshot::{ActiveSnapshot, BoardSnapshot};
