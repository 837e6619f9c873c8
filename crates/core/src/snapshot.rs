//! Snapshot module - read-only copies of the board for renderers

use crate::board::ActivePiece;
use crate::types::{Position, ShapeKind, OCCUPIED_MARKER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub rotation: usize,
    pub anchor: Position,
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(value: &ActivePiece) -> Self {
        Self {
            kind: value.piece().kind(),
            rotation: value.piece().rotation(),
            anchor: value.anchor(),
        }
    }
}

/// Read-only copy of a board for renderers.
///
/// `rows` holds `height` rows of `width` markers, top row first. The falling
/// piece is already stamped into the rows; `active` only describes it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardSnapshot {
    pub width: u16,
    pub height: u16,
    pub rows: Vec<Vec<char>>,
    pub active: Option<ActiveSnapshot>,
    pub game_over: bool,
}

impl BoardSnapshot {
    /// Marker at `(row, col)`, `None` if out of bounds
    pub fn cell(&self, row: usize, col: usize) -> Option<char> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Each row joined into one line, top to bottom
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(|row| row.iter().collect())
    }

    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|&&c| c == OCCUPIED_MARKER)
            .count()
    }
}
