//! Bounded memory cell
//!
//! This module defines the [`Cell`] struct, a single memory register holding
//! a value in `[0, CELL_LIMIT)`. All writes pass through one normalization
//! point, so a cell can never hold an out-of-range value.
//!
//! # Value Range
//!
//! Values wrap modularly at [`CELL_LIMIT`] (256), including for negative
//! intermediate results: decrementing a zero cell yields 255, not an error
//! and not a clamp.
//!
//! # Seeding
//!
//! Cells start at 0 by default. They can also be seeded from an integer
//! (normalized), a character (its code point, normalized), or a boolean
//! (0 or 1) via the `From` impls.

/// Exclusive upper bound for cell values. The tape's modulus.
pub const CELL_LIMIT: i64 = 256;

/// A single bounded memory register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    value: u8,
}

impl Cell {
    /// Create a zeroed cell
    pub fn new() -> Self {
        Cell { value: 0 }
    }

    /// The current value
    pub fn get(&self) -> u8 {
        self.value
    }

    /// The current value's character rendering (code points 0..=255)
    pub fn read(&self) -> char {
        char::from(self.value)
    }

    /// Overwrite the value, normalized into range
    pub fn set(&mut self, value: i64) {
        self.value = Self::normalize(value);
    }

    /// Increment by one, wrapping at the limit
    pub fn up(&mut self) {
        self.set(i64::from(self.value) + 1);
    }

    /// Decrement by one, wrapping below zero
    pub fn down(&mut self) {
        self.set(i64::from(self.value) - 1);
    }

    /// Whether the value is zero (the loop exit condition)
    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Reduce an arbitrary integer into `[0, CELL_LIMIT)`
    ///
    /// Uses euclidean remainder so negative inputs wrap upward:
    /// `normalize(-1) == 255`.
    fn normalize(value: i64) -> u8 {
        value.rem_euclid(CELL_LIMIT) as u8
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell {
            value: Self::normalize(value),
        }
    }
}

impl From<char> for Cell {
    fn from(c: char) -> Self {
        Cell::from(i64::from(u32::from(c)))
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell {
            value: u8::from(b),
        }
    }
}
