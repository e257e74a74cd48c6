//! Memory tape
//!
//! This module defines the [`Tape`], the engine's addressable memory: an
//! ordered sequence of [`Cell`]s with a movable cursor. The tape starts with
//! a single cell and grows lazily.
//!
//! # Growth and Wrapping
//!
//! - Moving right from the last cell appends exactly one new zeroed cell
//!   (never more, never pre-allocated).
//! - Moving left from index 0 wraps to the last *existing* cell. The tape is
//!   circular at its left boundary only; the right edge never wraps.
//!
//! The cursor is always a valid index. Each execution owns its tape
//! exclusively; tapes are never shared.

use super::cell::Cell;

/// An extensible sequence of cells with a selection cursor
#[derive(Debug, Clone)]
pub struct Tape {
    cells: Vec<Cell>,
    selected: usize,
}

impl Tape {
    /// Create a tape holding a single zeroed cell
    pub fn new() -> Self {
        Tape {
            cells: vec![Cell::new()],
            selected: 0,
        }
    }

    /// Move the cursor one cell to the right, growing the tape by one
    /// zeroed cell if the cursor was on the last cell
    pub fn right(&mut self) {
        if self.selected + 1 >= self.cells.len() {
            self.cells.push(Cell::new());
        }
        self.selected += 1;
    }

    /// Move the cursor one cell to the left, wrapping from the first cell
    /// to the last existing cell
    pub fn left(&mut self) {
        if self.selected == 0 {
            self.selected = self.cells.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    /// The currently selected cell
    pub fn current(&self) -> &Cell {
        &self.cells[self.selected]
    }

    /// Mutable access to the currently selected cell
    pub fn current_mut(&mut self) -> &mut Cell {
        &mut self.cells[self.selected]
    }

    /// Index of the selected cell
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Number of cells currently allocated
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the tape has no cells (never true: a tape always holds at
    /// least one cell)
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}
