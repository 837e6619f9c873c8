//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! Everything here is plain data with no external dependencies, so it can be
//! shared by the game logic, the text renderer and the demo binary alike.
//!
//! # Board Dimensions
//!
//! Dimensions are configuration, not fixed constants. The defaults match the
//! classic text demo:
//!
//! - **Width**: 16 columns (indexed 0-15)
//! - **Height**: 25 rows (indexed 0-24, row 0 at the top)
//! - **Spawn anchor**: `(row 0, col width / 2)`
//!
//! # Cell Markers
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `OCCUPIED_MARKER` | `'X'` | Locked or falling cell |
//! | `EMPTY_MARKER` | `' '` | Free cell |
//!
//! # Examples
//!
//! ```
//! use text_tetris_types::{Position, ShapeKind, DEFAULT_BOARD_WIDTH};
//!
//! let kind = ShapeKind::from_name("Line").unwrap();
//! assert_eq!(kind, ShapeKind::Line);
//! assert_eq!(kind.as_str(), "line");
//!
//! let spawn = Position::new(0, (DEFAULT_BOARD_WIDTH / 2) as i16);
//! assert_eq!(spawn.offset((1, 2)), Position::new(2, 9));
//! ```

use std::fmt;

/// Default board width in cells (16 columns)
pub const DEFAULT_BOARD_WIDTH: u16 = 16;

/// Default board height in cells (25 rows)
pub const DEFAULT_BOARD_HEIGHT: u16 = 25;

/// Largest accepted width or height
pub const MAX_BOARD_DIMENSION: u16 = 1024;

/// Upper bound on the number of cells in a single rotation state
pub const MAX_SHAPE_CELLS: usize = 4;

/// Marker used for an occupied cell in text snapshots
pub const OCCUPIED_MARKER: char = 'X';

/// Marker used for an empty cell in text snapshots
pub const EMPTY_MARKER: char = ' ';

/// Offset of a single mino relative to the piece anchor, as `(col, row)`.
///
/// Both components are unsigned, so offsets can never point above or left of
/// the anchor.
pub type MinoOffset = (u8, u8);

/// The registered piece shapes
///
/// - **Square**: 2x2 block, a single rotation state
/// - **Line**: 4-long bar, horizontal and vertical states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    Square,
    Line,
}

impl ShapeKind {
    /// Every shape kind, in catalog order
    pub const ALL: [ShapeKind; 2] = [ShapeKind::Square, ShapeKind::Line];

    /// Parse a shape kind from its name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use text_tetris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_name("square"), Some(ShapeKind::Square));
    /// assert_eq!(ShapeKind::from_name("LINE"), Some(ShapeKind::Line));
    /// assert_eq!(ShapeKind::from_name("zigzag"), None);
    /// ```
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "square" => Some(ShapeKind::Square),
            "line" => Some(ShapeKind::Line),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Square => "square",
            ShapeKind::Line => "line",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grid coordinate, row 0 at the top
///
/// Signed so that candidate placements left of or above the grid can be
/// represented and rejected by bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: i16,
    pub col: i16,
}

impl Position {
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// Translate by a mino offset `(col, row)`
    ///
    /// Saturates at `i16::MAX`, which is always outside any valid grid.
    pub fn offset(self, (dcol, drow): MinoOffset) -> Self {
        Self {
            row: self.row.saturating_add(drow as i16),
            col: self.col.saturating_add(dcol as i16),
        }
    }

    /// The position one row below
    pub fn down(self) -> Self {
        Self {
            row: self.row.saturating_add(1),
            col: self.col,
        }
    }

    /// The position shifted horizontally by `delta` columns, `None` on overflow
    pub fn shifted(self, delta: i16) -> Option<Self> {
        Some(Self {
            row: self.row,
            col: self.col.checked_add(delta)?,
        })
    }
}

/// A cell on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied,
}

impl Cell {
    pub fn is_occupied(self) -> bool {
        matches!(self, Cell::Occupied)
    }

    /// Single-character marker used by text snapshots
    pub fn marker(self) -> char {
        match self {
            Cell::Empty => EMPTY_MARKER,
            Cell::Occupied => OCCUPIED_MARKER,
        }
    }

    /// Parse a snapshot marker; anything other than `OCCUPIED_MARKER` is empty
    pub fn from_marker(c: char) -> Self {
        if c == OCCUPIED_MARKER {
            Cell::Occupied
        } else {
            Cell::Empty
        }
    }
}

/// Lifecycle of a board
///
/// `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardState {
    /// No piece is falling; the next tick spawns one
    Empty,
    /// A piece is falling
    Falling,
    /// A spawn collided; the session is over
    GameOver,
}
