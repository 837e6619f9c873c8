//! Grid module - the cell array owned by the board
//!
//! The grid is a `width x height` rectangle where each cell is empty or
//! occupied. Uses a flat vector in row-major order (`row * width + col`) with
//! row 0 at the top. Dimensions are fixed at construction.
//!
//! Coordinates outside `[0, height) x [0, width)` are never stored: reads treat
//! them as blocked, writes are refused.

use crate::error::{Result, TetrisError};
use crate::types::{Cell, Position, MAX_BOARD_DIMENSION};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: u16, height: u16) -> Result<Self> {
        if width == 0 || height == 0 || width > MAX_BOARD_DIMENSION || height > MAX_BOARD_DIMENSION
        {
            return Err(TetrisError::InvalidDimensions {
                width: width as usize,
                height: height as usize,
            });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        })
    }

    /// Build a grid from text rows, top row first.
    ///
    /// `'X'` marks an occupied cell, any other character an empty one. All
    /// rows must have the same length.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let ragged = rows.iter().any(|r| r.chars().count() != width);
        if ragged || width > MAX_BOARD_DIMENSION as usize || rows.len() > MAX_BOARD_DIMENSION as usize
        {
            return Err(TetrisError::InvalidDimensions {
                width,
                height: rows.len(),
            });
        }

        let mut grid = Self::new(width as u16, rows.len() as u16)?;
        for (row, line) in rows.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                grid.cells[row * width + col] = Cell::from_marker(c);
            }
        }
        Ok(grid)
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if self.is_out_of_bounds(pos) {
            return None;
        }
        Some(pos.row as usize * self.width as usize + pos.col as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get cell at `pos`, `None` if out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Occupy the cell at `pos`. Returns false if out of bounds
    pub fn set_point(&mut self, pos: Position) -> bool {
        self.write(pos, Cell::Occupied)
    }

    /// Empty the cell at `pos`. Returns false if out of bounds
    pub fn clear_point(&mut self, pos: Position) -> bool {
        self.write(pos, Cell::Empty)
    }

    fn write(&mut self, pos: Position, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and occupied
    pub fn is_occupied(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(Cell::Occupied))
    }

    /// Out of bounds or occupied; a piece cell may not go here
    pub fn is_blocked(&self, pos: Position) -> bool {
        !matches!(self.get(pos), Some(Cell::Empty))
    }

    pub fn is_out_of_bounds(&self, pos: Position) -> bool {
        pos.row < 0
            || pos.col < 0
            || pos.row >= self.height as i16
            || pos.col >= self.width as i16
    }

    /// Cells of one row, left to right. Panics if `row >= height`
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width as usize)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.height as usize {
            return false;
        }
        self.row(row).iter().all(|cell| cell.is_occupied())
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top).
    ///
    /// Single bottom-to-top compaction pass: every surviving row moves down by
    /// the number of full rows below it, and the vacated rows at the top are
    /// emptied.
    pub fn clear_full_rows(&mut self) -> Vec<usize> {
        let mut cleared_rows = Vec::new();
        let width = self.width as usize;
        let mut write_row = self.height as usize;

        // Scan from bottom to top
        for read_row in (0..self.height as usize).rev() {
            if self.is_row_full(read_row) {
                cleared_rows.push(read_row);
            } else {
                // Not full, move it down to the write position
                write_row -= 1;
                if write_row != read_row {
                    let src_start = read_row * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_row * width);
                }
            }
        }

        // Clear the remaining rows at the top
        for cell in &mut self.cells[..write_row * width] {
            *cell = Cell::Empty;
        }

        cleared_rows
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Render rows as marker strings, top to bottom
    pub fn to_lines(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|c| c.marker()).collect())
            .collect()
    }
}
