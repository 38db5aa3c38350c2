//! The shared board: which cells are settled, and how each player sees it.

use crossclues_protocol::{CellView, PlayerName};

use crate::GridSize;

/// One intersection of a row word and a column word.
///
/// A cell settles exactly once: either it was guessed correctly, or the
/// player holding its card discarded it after a wrong guess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub guessed_correctly: bool,
    /// Private: only ever revealed to the discarder themself.
    pub discarded_by: Option<PlayerName>,
}

impl Cell {
    pub fn is_resolved(&self) -> bool {
        self.guessed_correctly || self.discarded_by.is_some()
    }
}

/// A square board of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: GridSize,
    cells: Vec<Cell>,
}

impl Grid {
    /// A fresh board with every cell open.
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![Cell::default(); size.cell_count()],
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.index(row, column).map(|i| &self.cells[i])
    }

    /// Settles a cell: correct guesses mark it guessed, wrong ones record
    /// who discarded it.
    ///
    /// Returns `false` (and changes nothing) if the coordinate is off the
    /// board or the cell is already settled. Rooms only call this for a
    /// card the player was holding, so neither happens in play.
    pub fn resolve(
        &mut self,
        row: usize,
        column: usize,
        player: &PlayerName,
        correct: bool,
    ) -> bool {
        let Some(cell) = self.index(row, column).map(|i| &mut self.cells[i])
        else {
            return false;
        };
        if cell.is_resolved() {
            return false;
        }
        if correct {
            cell.guessed_correctly = true;
        } else {
            cell.discarded_by = Some(player.clone());
        }
        true
    }

    /// The board as `viewer` is allowed to see it.
    pub fn project(&self, viewer: &PlayerName) -> Vec<Vec<CellView>> {
        self.cells
            .chunks(self.size.get())
            .map(|row| {
                row.iter()
                    .map(|cell| CellView {
                        guessed_correctly: cell.guessed_correctly,
                        discarded_by_me: cell.discarded_by.as_ref()
                            == Some(viewer),
                    })
                    .collect()
            })
            .collect()
    }

    /// `true` once every cell is settled. Drives game over.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Cell::is_resolved)
    }

    pub fn correct_count(&self) -> usize {
        self.cells.iter().filter(|c| c.guessed_correctly).count()
    }

    fn index(&self, row: usize, column: usize) -> Option<usize> {
        self.size
            .contains(row, column)
            .then(|| row * self.size.get() + column)
    }
}
