//! Tree-walking execution engine
//!
//! This module provides the interpret-mode execution path:
//! - [`engine`]: the [`engine::Interpreter`] facade and block walker
//! - [`errors`]: runtime error types, shared with the compiled path
//!
//! # Execution Model
//!
//! The engine walks the block tree entry by entry against a fresh tape.
//! With tracing enabled it records one [`crate::trace::TraceEntry`] per
//! instruction executed (plus loop boundary entries), which the replay UI
//! and the full-log dump consume afterwards.
//!
//! # Loop Ceiling
//!
//! Loops are bounded by a per-invocation iteration ceiling. In this engine
//! exceeding it abandons the one loop and degrades the result: execution
//! continues after the loop with partial output preserved. The compiled
//! path in [`crate::compiler`] instead fails the whole program.

pub mod engine;
pub mod errors;
