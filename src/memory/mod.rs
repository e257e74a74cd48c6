//! Memory model for the execution engine
//!
//! This module provides the core memory abstractions:
//! - [`cell`]: a single bounded register with modular wraparound
//! - [`tape`]: the extensible cell sequence with a movable cursor
//! - [`value`]: one produced output unit (code point + character)
//!
//! # Numeric Model
//!
//! Every cell value lives in `[0, 256)`; all arithmetic wraps modularly,
//! including through negative intermediates:
//! ```text
//! 0 - 1  →  255        255 + 1  →  0
//! ```
//!
//! The tape starts with one cell and grows one cell at a time, only when the
//! cursor moves right past the end. Moving left from the first cell wraps to
//! the last existing cell; the right edge never wraps.

pub mod cell;
pub mod tape;
pub mod value;
