//! Board dimensions and table limits.

use std::fmt;

use crate::RoomError;

/// Smallest playable board (3×3).
pub const MIN_GRID_SIZE: usize = 3;

/// Largest playable board (7×7). Also the bound the transport checks
/// row/column indices against before a room is even looked up.
pub const MAX_GRID_SIZE: usize = 7;

/// Board size used when a create request doesn't name one.
pub const DEFAULT_GRID_SIZE: usize = 5;

/// A game can't start with fewer players than this.
pub const MIN_PLAYERS_TO_START: usize = 2;

// ---------------------------------------------------------------------------
// GridSize
// ---------------------------------------------------------------------------

/// The side length of a room's square board, always within
/// [`MIN_GRID_SIZE`]`..=`[`MAX_GRID_SIZE`].
///
/// Constructing one is the only place the bound is checked; everything
/// downstream (deck building, word sampling, grid allocation) takes a
/// `GridSize` and can rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridSize(usize);

impl GridSize {
    /// Validates `size` against the playable range.
    ///
    /// # Errors
    /// [`RoomError::InvalidGridSize`] when `size` is outside `3..=7`.
    pub fn new(size: usize) -> Result<Self, RoomError> {
        if (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            Ok(Self(size))
        } else {
            Err(RoomError::InvalidGridSize(size))
        }
    }

    /// Like [`new`](Self::new), but treats a missing or zero size as the
    /// default, the way create requests are interpreted.
    pub fn or_default(size: Option<usize>) -> Result<Self, RoomError> {
        match size {
            None | Some(0) => Ok(Self::default()),
            Some(n) => Self::new(n),
        }
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Number of cells (and therefore cards) on the board.
    pub fn cell_count(self) -> usize {
        self.0 * self.0
    }

    /// Returns `true` if `(row, column)` addresses a cell on this board.
    pub fn contains(self, row: usize, column: usize) -> bool {
        row < self.0 && column < self.0
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self(DEFAULT_GRID_SIZE)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.0)
    }
}
