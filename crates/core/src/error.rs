//! Error types for board and catalog construction.
//!
//! Collisions are not errors: a rejected placement is reported as `false` by
//! the board operations, and game over is a state, not a failure.

use text_tetris_types::ShapeKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TetrisError {
    /// A named shape that is not registered in the catalog
    #[error("invalid shape kind: {0}")]
    InvalidShapeKind(String),

    /// Zero, oversized or ragged board dimensions
    #[error("invalid board dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// A malformed rotation table or catalog
    #[error("invalid shape table for {kind}: {reason}")]
    InvalidShapeTable {
        kind: ShapeKind,
        reason: &'static str,
    },

    #[error("shape catalog is empty")]
    EmptyCatalog,
}

pub type Result<T> = std::result::Result<T, TetrisError>;
