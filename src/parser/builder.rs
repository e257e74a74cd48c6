//! Block tree builder
//!
//! Builds the [`Block`] tree for a source string in one linear pass,
//! holding enclosing blocks on an explicit stack while a loop body is open.
//! Positions throughout are character indices into the source.

use crate::parser::ast::{Block, Entry, Opcode};
use std::fmt;

/// Build error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildError {
    pub message: String,
    /// Character index the error points at
    pub at: usize,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Build error at position {}: {}", self.at, self.message)
    }
}

impl std::error::Error for BuildError {}

/// Build the block tree for a source string
///
/// `[` opens a loop body and descends into it; `]` closes the innermost
/// open loop and splices it into its parent. A `]` with no open loop is a
/// [`BuildError`] carrying the bracket's position. Loops still open at
/// end-of-source are closed implicitly, innermost first, so trailing code
/// stays inside their bodies and runs under the loop's own termination
/// rule.
pub fn build(source: &str) -> Result<Block, BuildError> {
    let mut current = Block::new();
    let mut open: Vec<Block> = Vec::new();

    for (at, c) in source.chars().enumerate() {
        match c {
            '[' => {
                open.push(current);
                current = Block::open(at);
            }
            ']' => match open.pop() {
                Some(mut parent) => {
                    parent.push(Entry::Loop(current));
                    current = parent;
                }
                None => {
                    return Err(BuildError {
                        message: "Unmatched ']' with no open loop".to_string(),
                        at,
                    });
                }
            },
            _ => match Opcode::from_char(c) {
                Some(op) => current.push(Entry::Op { op, at }),
                None => current.push(Entry::Skip { ch: c, at }),
            },
        }
    }

    while let Some(mut parent) = open.pop() {
        parent.push(Entry::Loop(current));
        current = parent;
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_program() {
        let block = build("+-><.,").unwrap();

        assert_eq!(block.entries.len(), 6);
        assert_eq!(block.open_at, None);
        assert!(matches!(
            block.entries[0],
            Entry::Op {
                op: Opcode::Up,
                at: 0
            }
        ));
        assert!(matches!(
            block.entries[4],
            Entry::Op {
                op: Opcode::Output,
                at: 4
            }
        ));
        assert!(matches!(
            block.entries[5],
            Entry::Op {
                op: Opcode::Input,
                at: 5
            }
        ));
    }

    #[test]
    fn test_nested_loops() {
        let block = build("+[>[-]<]").unwrap();

        assert_eq!(block.entries.len(), 2);
        let outer = match &block.entries[1] {
            Entry::Loop(b) => b,
            other => panic!("Expected loop, got {:?}", other),
        };
        assert_eq!(outer.open_at, Some(1));
        assert_eq!(outer.close_at(), Some(7));
        assert_eq!(outer.entries.len(), 3);

        let inner = match &outer.entries[1] {
            Entry::Loop(b) => b,
            other => panic!("Expected inner loop, got {:?}", other),
        };
        assert_eq!(inner.open_at, Some(3));
        assert_eq!(inner.close_at(), Some(5));
        assert!(matches!(
            inner.entries[0],
            Entry::Op {
                op: Opcode::Down,
                at: 4
            }
        ));
    }

    #[test]
    fn test_inert_characters_become_skips() {
        let block = build("+ hi\n-").unwrap();

        assert_eq!(block.entries.len(), 6);
        assert!(matches!(block.entries[1], Entry::Skip { ch: ' ', at: 1 }));
        assert!(matches!(block.entries[2], Entry::Skip { ch: 'h', at: 2 }));
        assert!(matches!(block.entries[4], Entry::Skip { ch: '\n', at: 4 }));
        assert!(matches!(
            block.entries[5],
            Entry::Op {
                op: Opcode::Down,
                at: 5
            }
        ));
    }

    #[test]
    fn test_unmatched_close_is_an_error() {
        let err = build("+]").unwrap_err();

        assert_eq!(err.at, 1);
        assert!(
            err.to_string().contains("position 1"),
            "Display should name the position: {}",
            err
        );

        // Root-level close with loops properly closed before it
        let err = build("[-]]").unwrap_err();
        assert_eq!(err.at, 3);
    }

    #[test]
    fn test_unclosed_loop_absorbs_trailing_code() {
        let block = build(",[+.").unwrap();

        assert_eq!(block.entries.len(), 2);
        let open_loop = match &block.entries[1] {
            Entry::Loop(b) => b,
            other => panic!("Expected loop, got {:?}", other),
        };
        assert_eq!(open_loop.open_at, Some(1));
        assert_eq!(open_loop.entries.len(), 2);
        // The derived close position is one past the last character
        assert_eq!(open_loop.close_at(), Some(4));
    }

    #[test]
    fn test_unclosed_nesting_folds_innermost_first() {
        let block = build("[[+").unwrap();

        let outer = match &block.entries[0] {
            Entry::Loop(b) => b,
            other => panic!("Expected loop, got {:?}", other),
        };
        let inner = match &outer.entries[0] {
            Entry::Loop(b) => b,
            other => panic!("Expected inner loop, got {:?}", other),
        };
        assert_eq!(inner.open_at, Some(1));
        assert!(matches!(
            inner.entries[0],
            Entry::Op {
                op: Opcode::Up,
                at: 2
            }
        ));
    }

    #[test]
    fn test_empty_source() {
        let block = build("").unwrap();
        assert!(block.entries.is_empty());
        assert_eq!(block.open_at, None);
    }

    #[test]
    fn test_zero_iteration_loop_shape() {
        let block = build("[]").unwrap();
        assert_eq!(block.entries.len(), 1);
        match &block.entries[0] {
            Entry::Loop(b) => {
                assert!(b.entries.is_empty());
                assert_eq!(b.close_at(), Some(1));
            }
            other => panic!("Expected loop, got {:?}", other),
        }
    }
}
