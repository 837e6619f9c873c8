//! Board module - the game state machine
//!
//! The board owns the grid, the falling piece and the game-over flag, and
//! drives spawn → fall → lock → clear → (spawn | game over).
//!
//! The falling piece is stamped into the grid like any locked cell. Every move
//! goes through one placement routine: vacate the current footprint, test the
//! candidate footprint, then restamp either the candidate (success) or the
//! previous footprint (failure). Out-of-grid cells count as occupied.

use arrayvec::ArrayVec;
use tracing::{debug, info, trace};

use crate::config::BoardConfig;
use crate::error::Result;
use crate::grid::Grid;
use crate::pieces::{Piece, ShapeCatalog};
use crate::rng::{ShapeSource, SimpleRng};
use crate::snapshot::{ActiveSnapshot, BoardSnapshot};
use crate::types::{BoardState, MinoOffset, Position, ShapeKind, MAX_SHAPE_CELLS};

/// Grid cells covered by a piece at one rotation and anchor
pub type Footprint = ArrayVec<Position, MAX_SHAPE_CELLS>;

/// Translate shape offsets to grid positions
pub fn footprint(offsets: &[MinoOffset], anchor: Position) -> Footprint {
    offsets.iter().map(|&offset| anchor.offset(offset)).collect()
}

/// The falling piece and where it is anchored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    piece: Piece,
    anchor: Position,
}

impl ActivePiece {
    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn anchor(&self) -> Position {
        self.anchor
    }

    /// Footprint at the current anchor, `rotation_delta` states away
    pub fn footprint(&self, rotation_delta: i32) -> Footprint {
        footprint(self.piece.occupied_offsets(rotation_delta), self.anchor)
    }
}

/// What happened on the most recent lock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: ShapeKind,
    pub rotation: usize,
    pub anchor: Position,
    /// Cleared row indices, bottom to top, as they were before the clear
    pub cleared_rows: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FallOutcome {
    Moved,
    Locked,
    Idle,
}

/// Game board: grid + active piece + game-over flag
#[derive(Debug, Clone)]
pub struct Board<S = SimpleRng> {
    grid: Grid,
    catalog: ShapeCatalog,
    source: S,
    active: Option<ActivePiece>,
    game_over: bool,
    /// Successful spawns this session
    pieces_spawned: u32,
    /// Total rows removed by row clearing
    rows_cleared: u32,
    last_lock: Option<LockEvent>,
}

impl Board<SimpleRng> {
    /// Standard shapes, clock-seeded random choice
    pub fn new(width: u16, height: u16) -> Result<Self> {
        Self::with_source(
            width,
            height,
            ShapeCatalog::standard(),
            SimpleRng::from_clock(),
        )
    }

    /// Standard shapes, reproducible sequence
    pub fn with_seed(width: u16, height: u16, seed: u32) -> Result<Self> {
        Self::with_source(width, height, ShapeCatalog::standard(), SimpleRng::new(seed))
    }

    pub fn from_config(config: &BoardConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => SimpleRng::new(seed),
            None => SimpleRng::from_clock(),
        };
        Self::with_source(config.width, config.height, ShapeCatalog::standard(), rng)
    }
}

impl<S: ShapeSource> Board<S> {
    /// Empty board with a custom catalog and shape source
    pub fn with_source(width: u16, height: u16, catalog: ShapeCatalog, source: S) -> Result<Self> {
        Ok(Self::with_grid(Grid::new(width, height)?, catalog, source))
    }

    /// Board over a pre-filled grid. Every occupied cell is treated as locked
    pub fn with_grid(grid: Grid, catalog: ShapeCatalog, source: S) -> Self {
        Self {
            grid,
            catalog,
            source,
            active: None,
            game_over: false,
            pieces_spawned: 0,
            rows_cleared: 0,
            last_lock: None,
        }
    }

    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn have_active_piece(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn state(&self) -> BoardState {
        if self.game_over {
            BoardState::GameOver
        } else if self.active.is_some() {
            BoardState::Falling
        } else {
            BoardState::Empty
        }
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    pub fn last_lock(&self) -> Option<&LockEvent> {
        self.last_lock.as_ref()
    }

    /// Anchor for new pieces: top row, middle column (rounded down)
    pub fn spawn_position(&self) -> Position {
        Position::new(0, (self.grid.width() / 2) as i16)
    }

    /// Advance one step: spawn if nothing is falling, otherwise fall one row.
    ///
    /// No-op once the game is over.
    pub fn tick(&mut self) {
        if self.game_over {
            return;
        }
        if self.active.is_none() {
            self.spawn_new_piece();
        } else {
            self.fall_step();
        }
    }

    /// Rotate the active piece by `delta` states if the result fits.
    ///
    /// No wall kicks: a blocked rotation leaves the piece untouched. Returns
    /// whether the rotation was applied.
    pub fn rotate(&mut self, delta: i32) -> bool {
        if self.game_over {
            return false;
        }
        let Some(anchor) = self.active.as_ref().map(ActivePiece::anchor) else {
            return false;
        };
        self.try_place(delta, anchor)
    }

    /// Move the active piece `delta_cols` columns sideways if the result fits
    pub fn shift(&mut self, delta_cols: i16) -> bool {
        if self.game_over {
            return false;
        }
        let Some(target) = self
            .active
            .as_ref()
            .and_then(|active| active.anchor().shifted(delta_cols))
        else {
            return false;
        };
        self.try_place(0, target)
    }

    /// Hard drop: fall until the active piece locks.
    ///
    /// Returns the number of rows the piece fell.
    pub fn slam(&mut self) -> u16 {
        let mut dropped = 0;
        // Each Moved raises the anchor row, which is bounded by the height.
        while !self.game_over && self.active.is_some() {
            match self.fall_step() {
                FallOutcome::Moved => dropped += 1,
                FallOutcome::Locked | FallOutcome::Idle => break,
            }
        }
        dropped
    }

    /// Spawn a random piece at the spawn anchor.
    ///
    /// If the spawn footprint is blocked the game is over and nothing is
    /// stamped. Refused while a piece is still falling or after game over.
    pub fn spawn_new_piece(&mut self) -> bool {
        if self.game_over || self.active.is_some() {
            return false;
        }

        let piece = Piece::from_def(self.catalog.pick(&mut self.source));
        let anchor = self.spawn_position();
        let cells = footprint(piece.occupied_offsets(0), anchor);

        if cells.iter().any(|&pos| self.grid.is_blocked(pos)) {
            self.game_over = true;
            info!(
                kind = %piece.kind(),
                row = anchor.row,
                col = anchor.col,
                pieces_spawned = self.pieces_spawned,
                rows_cleared = self.rows_cleared,
                "spawn blocked, game over"
            );
            return false;
        }

        for &pos in &cells {
            self.grid.set_point(pos);
        }
        self.pieces_spawned += 1;
        debug!(kind = %piece.kind(), row = anchor.row, col = anchor.col, "spawned piece");
        self.active = Some(ActivePiece { piece, anchor });
        true
    }

    /// Move down one row, or lock in place if the row below is blocked
    fn fall_step(&mut self) -> FallOutcome {
        let Some(anchor) = self.active.as_ref().map(ActivePiece::anchor) else {
            return FallOutcome::Idle;
        };
        if self.try_place(0, anchor.down()) {
            FallOutcome::Moved
        } else {
            self.lock_active();
            FallOutcome::Locked
        }
    }

    /// Drop the active placement (its cells stay occupied) and clear full rows
    fn lock_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        let cleared_rows = self.grid.clear_full_rows();
        self.rows_cleared += cleared_rows.len() as u32;

        debug!(
            kind = %active.piece.kind(),
            row = active.anchor.row,
            col = active.anchor.col,
            cleared = cleared_rows.len(),
            "piece locked"
        );
        if !cleared_rows.is_empty() {
            debug!(rows = ?cleared_rows, total = self.rows_cleared, "cleared rows");
        }

        self.last_lock = Some(LockEvent {
            kind: active.piece.kind(),
            rotation: active.piece.rotation(),
            anchor: active.anchor,
            cleared_rows,
        });
    }

    /// Vacate, test, restamp. Commits anchor and rotation only on success
    fn try_place(&mut self, rotation_delta: i32, target: Position) -> bool {
        let Some(active) = self.active.as_ref() else {
            return false;
        };
        let old = active.footprint(0);
        let new = footprint(active.piece.occupied_offsets(rotation_delta), target);

        for &pos in &old {
            self.grid.clear_point(pos);
        }

        let fits = new.iter().all(|&pos| !self.grid.is_blocked(pos));
        let stamp = if fits { &new } else { &old };
        for &pos in stamp {
            self.grid.set_point(pos);
        }

        if fits {
            if let Some(active) = self.active.as_mut() {
                active.anchor = target;
                active.piece.apply_rotation(rotation_delta);
            }
        } else {
            trace!(
                row = target.row,
                col = target.col,
                rotation_delta,
                "placement rejected"
            );
        }
        fits
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut out = BoardSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }

    /// Fill `out`, reusing its row buffers
    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.rows.resize_with(self.grid.height() as usize, Vec::new);
        for (dst, src) in out.rows.iter_mut().zip(self.grid.rows()) {
            dst.clear();
            dst.extend(src.iter().map(|cell| cell.marker()));
        }
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.game_over = self.game_over;
    }
}
