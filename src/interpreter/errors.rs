//! Runtime error types for the execution engines
//!
//! This module defines [`RuntimeError`], which represents the errors both
//! execution strategies can report (as opposed to build errors, which the
//! parser reports).
//!
//! Note that in interpret mode a tripped loop ceiling is *not* one of these:
//! the interpreter degrades the result instead (partial output, error flag).
//! Only compiled mode hard-fails with [`RuntimeError::LoopLimitExceeded`].

use std::fmt;

/// Runtime errors reported by the execution facades
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Execution was requested before a successful build
    NotBuilt,

    /// Loop iteration ceiling exceeded in compiled mode
    LoopLimitExceeded {
        /// Source position of the loop's closing bracket
        at: usize,
        limit: usize,
    },

    /// Rejected loop ceiling configuration (must be positive)
    InvalidLoopLimit { given: usize },
}

impl RuntimeError {
    /// Source position the error points at, if it has one
    pub fn position(&self) -> Option<usize> {
        match self {
            RuntimeError::LoopLimitExceeded { at, .. } => Some(*at),
            RuntimeError::NotBuilt => None,
            RuntimeError::InvalidLoopLimit { .. } => None,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::NotBuilt => {
                write!(f, "No program has been built")
            }
            RuntimeError::LoopLimitExceeded { at, limit } => {
                write!(
                    f,
                    "Loop iteration limit {} exceeded at position {} (possibly an endless loop)",
                    limit, at
                )
            }
            RuntimeError::InvalidLoopLimit { given } => {
                write!(f, "Loop limit must be positive, got {}", given)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
