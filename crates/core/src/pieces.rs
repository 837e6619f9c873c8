//! Pieces module - shape tables, the shape catalog and the rotation cursor
//!
//! A shape is an ordered list of rotation states; each state is a small set of
//! `(col, row)` offsets from the piece anchor. Pieces do not validate their own
//! placement: peeking at a rotated state (`occupied_offsets`) is separate from
//! committing to it (`apply_rotation`) so the board can test-fit first.

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::error::{Result, TetrisError};
use crate::rng::ShapeSource;
use crate::types::{MinoOffset, ShapeKind, MAX_SHAPE_CELLS};

/// Offsets occupied by one rotation state
pub type RotationState = ArrayVec<MinoOffset, MAX_SHAPE_CELLS>;

/// Square: a 2x2 block with a single state
pub const SQUARE_STATES: &[&[MinoOffset]] = &[&[(0, 0), (0, 1), (1, 0), (1, 1)]];

/// Line: horizontal in state 0, vertical in state 1
pub const LINE_STATES: &[&[MinoOffset]] = &[
    &[(0, 0), (1, 0), (2, 0), (3, 0)],
    &[(0, 0), (0, 1), (0, 2), (0, 3)],
];

/// Built-in rotation table for a shape kind
pub fn standard_states(kind: ShapeKind) -> &'static [&'static [MinoOffset]] {
    match kind {
        ShapeKind::Square => SQUARE_STATES,
        ShapeKind::Line => LINE_STATES,
    }
}

/// A shape kind together with its rotation table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeDef {
    kind: ShapeKind,
    states: Arc<[RotationState]>,
}

impl ShapeDef {
    /// Build a validated rotation table.
    ///
    /// Every shape needs at least one state, and every state needs between 1
    /// and `MAX_SHAPE_CELLS` distinct offsets.
    pub fn new(kind: ShapeKind, states: &[&[MinoOffset]]) -> Result<Self> {
        let invalid = |reason| TetrisError::InvalidShapeTable { kind, reason };

        if states.is_empty() {
            return Err(invalid("no rotation states"));
        }

        let mut table = Vec::with_capacity(states.len());
        for state in states {
            if state.is_empty() {
                return Err(invalid("empty rotation state"));
            }
            if state.len() > MAX_SHAPE_CELLS {
                return Err(invalid("too many cells in rotation state"));
            }

            let mut cells = RotationState::new();
            for &offset in state.iter() {
                if cells.contains(&offset) {
                    return Err(invalid("duplicate offset in rotation state"));
                }
                cells.push(offset);
            }
            table.push(cells);
        }

        Ok(Self {
            kind,
            states: table.into(),
        })
    }

    /// The built-in definition for `kind`
    pub fn standard(kind: ShapeKind) -> Self {
        let states: Vec<RotationState> = standard_states(kind)
            .iter()
            .map(|state| state.iter().copied().collect())
            .collect();
        Self {
            kind,
            states: states.into(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Offsets of rotation state `index` (reduced modulo the state count)
    pub fn state(&self, index: usize) -> &[MinoOffset] {
        &self.states[index % self.states.len()]
    }
}

/// Immutable registry of the shapes a game can spawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeCatalog {
    shapes: Vec<ShapeDef>,
}

impl ShapeCatalog {
    /// Square and line, in that order
    pub fn standard() -> Self {
        Self {
            shapes: ShapeKind::ALL.into_iter().map(ShapeDef::standard).collect(),
        }
    }

    /// Build a catalog from custom definitions; kinds must be unique
    pub fn new(shapes: Vec<ShapeDef>) -> Result<Self> {
        if shapes.is_empty() {
            return Err(TetrisError::EmptyCatalog);
        }
        for (i, shape) in shapes.iter().enumerate() {
            if shapes[..i].iter().any(|s| s.kind == shape.kind) {
                return Err(TetrisError::InvalidShapeTable {
                    kind: shape.kind,
                    reason: "kind registered twice",
                });
            }
        }
        Ok(Self { shapes })
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, kind: ShapeKind) -> Option<&ShapeDef> {
        self.shapes.iter().find(|s| s.kind == kind)
    }

    pub fn contains(&self, kind: ShapeKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn kinds(&self) -> impl Iterator<Item = ShapeKind> + '_ {
        self.shapes.iter().map(|s| s.kind)
    }

    pub fn shapes(&self) -> &[ShapeDef] {
        &self.shapes
    }

    /// Uniform choice over the registered shapes
    pub fn pick<S: ShapeSource + ?Sized>(&self, source: &mut S) -> &ShapeDef {
        let index = source.pick(self.shapes.len()) % self.shapes.len();
        &self.shapes[index]
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// A shape instance with a rotation cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    states: Arc<[RotationState]>,
    cursor: usize,
}

impl Piece {
    /// Create a piece of `kind`, or of a uniformly chosen kind when `None`.
    ///
    /// Fails with [`TetrisError::InvalidShapeKind`] if `kind` is not in the
    /// catalog.
    pub fn create<S: ShapeSource + ?Sized>(
        catalog: &ShapeCatalog,
        kind: Option<ShapeKind>,
        source: &mut S,
    ) -> Result<Self> {
        let def = match kind {
            Some(kind) => catalog
                .get(kind)
                .ok_or_else(|| TetrisError::InvalidShapeKind(kind.as_str().to_string()))?,
            None => catalog.pick(source),
        };
        Ok(Self::from_def(def))
    }

    /// Create a piece from a shape name such as `"line"`
    pub fn from_name(catalog: &ShapeCatalog, name: &str) -> Result<Self> {
        ShapeKind::from_name(name)
            .and_then(|kind| catalog.get(kind))
            .map(Self::from_def)
            .ok_or_else(|| TetrisError::InvalidShapeKind(name.to_string()))
    }

    /// Fresh piece in rotation state 0
    pub fn from_def(def: &ShapeDef) -> Self {
        Self {
            kind: def.kind,
            states: Arc::clone(&def.states),
            cursor: 0,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Current rotation state index
    pub fn rotation(&self) -> usize {
        self.cursor
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Offsets for the state `rotation_delta` steps away from the current one.
    ///
    /// Does not move the cursor.
    pub fn occupied_offsets(&self, rotation_delta: i32) -> &[MinoOffset] {
        &self.states[self.rotation_index(rotation_delta)]
    }

    /// Move the cursor by `delta` states. No placement validation.
    pub fn apply_rotation(&mut self, delta: i32) {
        self.cursor = self.rotation_index(delta);
    }

    fn rotation_index(&self, delta: i32) -> usize {
        let count = self.states.len() as i64;
        (self.cursor as i64 + delta as i64).rem_euclid(count) as usize
    }
}
