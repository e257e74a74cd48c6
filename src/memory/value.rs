//! Output value representation
//!
//! This module defines [`Value`], one unit of program output: the numeric
//! code an output instruction read from the selected cell, together with its
//! character rendering. Execution results are ordered sequences of these.

use super::cell::Cell;
use std::fmt;

/// One produced output unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Value {
    code: u8,
}

impl Value {
    pub fn new(code: u8) -> Self {
        Value { code }
    }

    /// The numeric code point
    pub fn code(&self) -> u8 {
        self.code
    }

    /// The character rendering (code points 0..=255)
    pub fn to_char(&self) -> char {
        char::from(self.code)
    }
}

impl From<Cell> for Value {
    fn from(cell: Cell) -> Self {
        Value { code: cell.get() }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
