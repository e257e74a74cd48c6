//! Closure-compiled execution
//!
//! The second execution strategy: reduce the block tree once into composed
//! closures, then run the composition against a fresh tape without
//! re-walking the tree. Each literal instruction becomes one small
//! operation over the tape and the threaded execution state; each loop
//! becomes a host loop around its compiled body. Inert characters compile
//! to nothing.
//!
//! Compiled execution is the fast, strict path: it keeps no trace, and a
//! tripped loop ceiling is a hard failure for the whole program, where the
//! tree-walking engine would degrade the result and continue. The ceiling
//! itself is counted identically in both, so a program that degrades there
//! fails here and vice versa.

use crate::interpreter::engine::DEFAULT_LOOP_LIMIT;
use crate::interpreter::errors::RuntimeError;
use crate::memory::tape::Tape;
use crate::parser::ast::{Block, Entry, Opcode};
use crate::parser::builder::{self, BuildError};

/// One compiled operation over the shared execution state
type Op = Box<dyn Fn(&mut Tape, &mut Exec) -> Result<(), RuntimeError>>;

/// Mutable state threaded sequentially through a compiled run
struct Exec {
    input: Vec<char>,
    cursor: usize,
    out: String,
    limit: usize,
}

/// The closure-composed executable form of a block tree
pub struct CompiledProgram {
    root: Vec<Op>,
}

impl CompiledProgram {
    /// Run the composition against a fresh tape and return the output
    pub fn run(&self, input: &str, loop_limit: usize) -> Result<String, RuntimeError> {
        let mut tape = Tape::new();
        let mut exec = Exec {
            input: input.chars().collect(),
            cursor: 0,
            out: String::new(),
            limit: loop_limit,
        };
        for op in &self.root {
            op(&mut tape, &mut exec)?;
        }
        Ok(exec.out)
    }
}

/// Compile a block tree into its composed executable form
pub fn compile(block: &Block) -> CompiledProgram {
    CompiledProgram {
        root: assemble(block),
    }
}

/// Compile each entry of a block, preserving source order
fn assemble(block: &Block) -> Vec<Op> {
    let mut ops: Vec<Op> = Vec::new();
    for entry in &block.entries {
        match entry {
            Entry::Op { op, .. } => ops.push(literal(*op)),
            Entry::Skip { .. } => {}
            Entry::Loop(body) => ops.push(looped(body)),
        }
    }
    ops
}

fn literal(op: Opcode) -> Op {
    match op {
        Opcode::Right => Box::new(|tape, _| {
            tape.right();
            Ok(())
        }),
        Opcode::Left => Box::new(|tape, _| {
            tape.left();
            Ok(())
        }),
        Opcode::Up => Box::new(|tape, _| {
            tape.current_mut().up();
            Ok(())
        }),
        Opcode::Down => Box::new(|tape, _| {
            tape.current_mut().down();
            Ok(())
        }),
        Opcode::Output => Box::new(|tape, exec| {
            exec.out.push(tape.current().read());
            Ok(())
        }),
        Opcode::Input => Box::new(|tape, exec| {
            match exec.input.get(exec.cursor) {
                Some(&c) => tape.current_mut().set(i64::from(u32::from(c))),
                None => tape.current_mut().set(0),
            }
            exec.cursor += 1;
            Ok(())
        }),
    }
}

/// Compile a loop: re-invoke the compiled body while the selected cell is
/// non-zero, failing hard once the pass counter exceeds the ceiling
fn looped(body: &Block) -> Op {
    let ops = assemble(body);
    // Loop blocks always carry their bracket positions
    let close = body.close_at().unwrap_or_default();

    Box::new(move |tape, exec| {
        let mut passes: usize = 0;
        while !tape.current().is_zero() {
            passes += 1;
            if passes > exec.limit {
                return Err(RuntimeError::LoopLimitExceeded {
                    at: close,
                    limit: exec.limit,
                });
            }
            for op in &ops {
                op(tape, exec)?;
            }
        }
        Ok(())
    })
}

/// The compiled-mode facade: build once, run any number of times
pub struct Compiler {
    program: Option<CompiledProgram>,
    loop_limit: usize,
}

impl Compiler {
    pub fn new() -> Self {
        Compiler {
            program: None,
            loop_limit: DEFAULT_LOOP_LIMIT,
        }
    }

    /// Parse and compile a program from source
    ///
    /// Fails on an unmatched `]`; on failure any previously compiled
    /// program is discarded.
    pub fn build(&mut self, source: &str) -> Result<(), BuildError> {
        self.program = None;
        let block = builder::build(source)?;
        self.program = Some(compile(&block));
        Ok(())
    }

    /// Run the compiled program
    ///
    /// Fails if nothing has been built, or with
    /// [`RuntimeError::LoopLimitExceeded`] if any loop trips the ceiling;
    /// compiled mode produces no partial output.
    pub fn run(&self, input: &str) -> Result<String, RuntimeError> {
        let program = self.program.as_ref().ok_or(RuntimeError::NotBuilt)?;
        program.run(input, self.loop_limit)
    }

    /// Set the loop-iteration ceiling; zero is rejected and the prior
    /// value retained
    pub fn set_loop_limit(&mut self, limit: usize) -> Result<(), RuntimeError> {
        if limit == 0 {
            return Err(RuntimeError::InvalidLoopLimit { given: limit });
        }
        self.loop_limit = limit;
        Ok(())
    }

    pub fn loop_limit(&self) -> usize {
        self.loop_limit
    }

    pub fn is_built(&self) -> bool {
        self.program.is_some()
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}
