//! Source parser
//!
//! This module transforms source text into a block tree:
//! - [`builder`]: one-pass construction (source text → [`ast::Block`])
//! - [`ast`]: block tree definitions
//!
//! # Language
//!
//! Eight characters are meaningful: `>` `<` `+` `-` `.` `,` parse to literal
//! entries, `[` and `]` delimit loop bodies. Every other character is inert
//! and parses to a skip entry, so sources can carry free-form commentary
//! inline, the traditional way.
//!
//! # Builder Implementation
//!
//! Single linear pass with an explicit stack of open blocks: `[` pushes the
//! current block and descends into a fresh loop body, `]` pops and splices
//! the closed loop into its parent. The finished tree carries no parent
//! links. A `]` at the root is a build error; a `[` left open at
//! end-of-source absorbs the trailing code into its body.

pub mod ast;
pub mod builder;
