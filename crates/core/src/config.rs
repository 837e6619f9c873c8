//! Runtime configuration for a board.

use crate::error::{Result, TetrisError};
use crate::types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, MAX_BOARD_DIMENSION};

/// Board dimensions and the optional RNG seed.
///
/// With `seed: None` the board seeds its shape source from the system clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub width: u16,
    pub height: u16,
    pub seed: Option<u32>,
}

impl BoardConfig {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Both dimensions must lie in `1..=MAX_BOARD_DIMENSION`
    pub fn validate(&self) -> Result<()> {
        let valid = |d: u16| (1..=MAX_BOARD_DIMENSION).contains(&d);
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(TetrisError::InvalidDimensions {
                width: self.width as usize,
                height: self.height as usize,
            })
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}
