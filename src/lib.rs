//! # Introduction
//!
//! BrainTTY parses and executes Brainfuck, recording the full tape state before
//! and after every operation.  The recorded trace is then navigated forward and
//! backward through a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Builder → Block tree → Interpreter ─→ Output + Trace → TUI
//!                            └──→ Compiler ────→ Output
//! ```
//!
//! 1. [`parser`] — scans the source and builds a tree of nested loop blocks.
//! 2. [`interpreter`] — walks the block tree, executes operations, and records
//!    a [`trace::TraceEntry`] for each step.
//! 3. [`compiler`] — pre-assembles the block tree into closures for replay
//!    without tracing overhead.
//! 4. [`memory`] — the tape model: wrapping [`memory::cell::Cell`]s on a
//!    grow-on-demand [`memory::tape::Tape`].
//! 5. [`trace`] — the recorded step log with tape snapshots and replay cursor.
//! 6. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported language
//!
//! The eight classic commands: `>` `<` `+` `-` `.` `,` `[` `]`.
//! Every other character is inert and skipped with a warning.  Cells hold
//! values in `[0, 256)` and wrap on overflow; the tape grows one cell at a
//! time to the right and wraps around to the last cell on the left edge.

pub mod compiler;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod trace;
pub mod ui;
