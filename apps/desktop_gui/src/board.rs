//! Client-side view of the 81-cell grid.
//!
//! The board never computes correctness or legality. It only renders what
//! the engine asserts, one cell at a time: `apply` routes a push event to
//! exactly one cell and merges the fields present in the payload, leaving
//! absent fields unchanged. The cells are created once and overwritten in
//! place for the lifetime of the application.

use shared::domain::{CellState, Notes, CELL_COUNT, GRID_SIZE};
use shared::protocol::CellUpdate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellView {
    /// 0 means empty.
    pub value: u8,
    pub state: CellState,
    pub notes: Notes,
}

impl CellView {
    /// The note overlay is only meaningful on a blank cell; a set value
    /// hides it regardless of the stored flags.
    pub fn shows_notes(&self) -> bool {
        self.value == 0
    }
}

pub struct Board {
    cells: [CellView; CELL_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            cells: [CellView::default(); CELL_COUNT],
        }
    }
}

impl Board {
    pub fn cell(&self, row: usize, col: usize) -> &CellView {
        &self.cells[row * GRID_SIZE + col]
    }

    /// Applies an authoritative per-cell update. Last write per field wins;
    /// out-of-range coordinates are logged and dropped.
    pub fn apply(&mut self, update: &CellUpdate) {
        let (row, col) = (update.row as usize, update.col as usize);
        if row >= GRID_SIZE || col >= GRID_SIZE {
            tracing::warn!(row, col, "cell update outside the grid");
            return;
        }
        let cell = &mut self.cells[row * GRID_SIZE + col];
        if let Some(value) = update.value {
            cell.value = value;
        }
        if let Some(state) = update.state {
            cell.state = state;
        }
        if let Some(notes) = update.notes {
            cell.notes = notes;
        }
    }

    /// Optimistic local note flip for input responsiveness. Returns false
    /// (and changes nothing) on a cell that has a value; a later
    /// authoritative `notes` push always overwrites the local flags.
    pub fn toggle_note(&mut self, row: usize, col: usize, digit: u8) -> bool {
        if row >= GRID_SIZE || col >= GRID_SIZE || !(1..=9).contains(&digit) {
            return false;
        }
        let cell = &mut self.cells[row * GRID_SIZE + col];
        if cell.value != 0 {
            return false;
        }
        cell.notes[digit as usize - 1] = !cell.notes[digit as usize - 1];
        true
    }
}
