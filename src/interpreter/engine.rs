// Tree-walking execution engine and interpreter facade

use crate::interpreter::errors::RuntimeError;
use crate::memory::tape::Tape;
use crate::memory::value::Value;
use crate::parser::ast::{Block, Entry, Opcode};
use crate::parser::builder::{self, BuildError};
use crate::trace::{TapeSnapshot, TraceEntry, TraceLog};
use rustc_hash::FxHashMap;

/// Default loop-iteration ceiling
pub const DEFAULT_LOOP_LIMIT: usize = 2000;

/// Results of one execution
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    /// Whether the run degraded: a loop was abandoned at the iteration
    /// ceiling and the output below is partial
    pub error: bool,

    /// The produced output as a string
    pub result: String,

    /// The produced output in order, one value per output instruction
    pub responses: Vec<Value>,

    /// Inert characters skipped during execution, tallied per character
    pub skipped: FxHashMap<char, usize>,
}

/// The interpret-mode facade: build once, execute any number of times
///
/// The built block tree is immutable and reusable; every execute call runs
/// it against a fresh tape with its own input cursor, so sequential
/// executions never observe each other.
pub struct Interpreter {
    /// Built program, `None` until a successful build
    program: Option<Block>,

    /// Source of the built program, kept for trace rendering and the UI
    source: String,

    /// Loop-iteration ceiling applied to every loop invocation
    loop_limit: usize,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            program: None,
            source: String::new(),
            loop_limit: DEFAULT_LOOP_LIMIT,
        }
    }

    /// Build a program from source
    ///
    /// Fails on an unmatched `]`. On failure any previously built program
    /// is discarded, so later execute calls report
    /// [`RuntimeError::NotBuilt`] until a build succeeds.
    pub fn build(&mut self, source: &str) -> Result<(), BuildError> {
        self.program = None;
        self.source.clear();
        let block = builder::build(source)?;
        self.program = Some(block);
        self.source.push_str(source);
        Ok(())
    }

    /// Execute the built program and return its output string
    ///
    /// The only failure in interpret mode is executing before a successful
    /// build; a tripped loop ceiling degrades the result instead (see
    /// [`Interpreter::execute_detailed`] for the flag).
    pub fn execute(&self, input: &str, feedback: bool) -> Result<String, RuntimeError> {
        let (execution, _) = self.run(input, feedback, false)?;
        Ok(execution.result)
    }

    /// Execute and return the full [`Execution`] detail
    pub fn execute_detailed(&self, input: &str, feedback: bool) -> Result<Execution, RuntimeError> {
        let (execution, _) = self.run(input, feedback, false)?;
        Ok(execution)
    }

    /// Execute with tracing and return the detail plus the recorded trace
    pub fn execute_traced(
        &self,
        input: &str,
        feedback: bool,
    ) -> Result<(Execution, TraceLog), RuntimeError> {
        let (execution, trace) = self.run(input, feedback, true)?;
        Ok((execution, trace.unwrap_or_default()))
    }

    /// Indented listing of the built program's block tree
    pub fn structure(&self) -> Result<String, RuntimeError> {
        let program = self.program.as_ref().ok_or(RuntimeError::NotBuilt)?;
        Ok(program.structure())
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

    // ========== Getter methods ==========

    pub fn loop_limit(&self) -> usize {
        self.loop_limit
    }

    /// Source of the built program (empty before the first build)
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_built(&self) -> bool {
        self.program.is_some()
    }

    fn run(
        &self,
        input: &str,
        feedback: bool,
        tracing: bool,
    ) -> Result<(Execution, Option<TraceLog>), RuntimeError> {
        let program = self.program.as_ref().ok_or(RuntimeError::NotBuilt)?;

        let mut run = Run {
            tape: Tape::new(),
            input: input.chars().collect(),
            cursor: 0,
            limit: self.loop_limit,
            feedback,
            trace: tracing.then(TraceLog::new),
            responses: Vec::new(),
            degraded: false,
            skipped: FxHashMap::default(),
        };
        run.block(program);

        let result: String = run.responses.iter().map(|v| v.to_char()).collect();
        let execution = Execution {
            error: run.degraded,
            result,
            responses: run.responses,
            skipped: run.skipped,
        };
        Ok((execution, run.trace))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// State of one tree-walking execution
struct Run {
    tape: Tape,
    input: Vec<char>,
    cursor: usize,
    limit: usize,
    feedback: bool,
    trace: Option<TraceLog>,
    responses: Vec<Value>,
    degraded: bool,
    skipped: FxHashMap<char, usize>,
}

impl Run {
    /// Execute a block's entries in order
    fn block(&mut self, block: &Block) {
        for entry in &block.entries {
            match entry {
                Entry::Op { op, at } => self.op(*op, *at),
                Entry::Skip { ch, at } => self.skip(*ch, *at),
                Entry::Loop(body) => self.looped(body),
            }
        }
    }

    /// Execute a loop body while the selected cell is non-zero
    ///
    /// The pass counter resets on every loop entry; the ceiling is checked
    /// before each pass. Exceeding it abandons this loop only: the run is
    /// flagged degraded and execution continues after the loop.
    fn looped(&mut self, body: &Block) {
        // Loop blocks always carry their bracket positions; the root block
        // never reaches here.
        let open = body.open_at.unwrap_or_default();
        let close = body.close_at().unwrap_or_default();

        self.boundary(open, "Entering loop".to_string(), false);

        let mut passes: usize = 0;
        while !self.tape.current().is_zero() {
            passes += 1;
            if passes > self.limit {
                self.degraded = true;
                if self.feedback {
                    eprintln!(
                        "warning: loop iteration limit {} exceeded; abandoning loop",
                        self.limit
                    );
                }
                self.boundary(
                    close,
                    format!(
                        "Loop iteration limit {} exceeded; abandoning loop",
                        self.limit
                    ),
                    true,
                );
                return;
            }
            self.block(body);
        }

        self.boundary(close, "Leaving loop".to_string(), false);
    }

    /// Execute one literal instruction, recording a trace entry if tracing
    fn op(&mut self, op: Opcode, at: usize) {
        let tracing = self.trace.is_some();
        let before = tracing.then(|| TapeSnapshot::capture(&self.tape));
        let input_pos = self.cursor;

        let mut action = String::new();
        let mut note = String::new();
        let mut emitted = None;

        match op {
            Opcode::Right => {
                self.tape.right();
                if tracing {
                    action.push_str("Move cursor right");
                    note.push_str("Now selected");
                }
            }
            Opcode::Left => {
                self.tape.left();
                if tracing {
                    action.push_str("Move cursor left");
                    note.push_str("Now selected");
                }
            }
            Opcode::Up => {
                self.tape.current_mut().up();
                if tracing {
                    action.push_str("Increment cell");
                    note.push_str("Added 1");
                }
            }
            Opcode::Down => {
                self.tape.current_mut().down();
                if tracing {
                    action.push_str("Decrement cell");
                    note.push_str("Subtracted 1");
                }
            }
            Opcode::Output => {
                let value = Value::from(*self.tape.current());
                self.responses.push(value);
                emitted = Some(value);
                if tracing {
                    action = format!(
                        "Output cell value: '{}' (code {})",
                        value.to_char(),
                        value.code()
                    );
                    note.push_str("Read current value");
                }
            }
            Opcode::Input => {
                match self.input.get(self.cursor) {
                    Some(&c) => {
                        self.tape.current_mut().set(i64::from(u32::from(c)));
                        if tracing {
                            action = format!("Read input '{}' (code {})", c, u32::from(c));
                            note = format!("Set to {}", self.tape.current().get());
                        }
                    }
                    None => {
                        self.tape.current_mut().set(0);
                        if self.feedback {
                            eprintln!("warning: input exhausted; cell set to 0");
                        }
                        if tracing {
                            action.push_str("Input exhausted, cell set to 0");
                            note.push_str("Set to 0");
                        }
                    }
                }
                // Exhausted reads advance past the end as well
                self.cursor += 1;
            }
        }

        if let Some(before) = before {
            let after = TapeSnapshot::capture(&self.tape);
            if let Some(log) = &mut self.trace {
                log.push(TraceEntry {
                    code_pos: at,
                    input_pos,
                    before,
                    after,
                    action,
                    note,
                    emitted,
                    is_error: false,
                });
            }
        }
    }

    /// Step over an inert character
    fn skip(&mut self, ch: char, at: usize) {
        *self.skipped.entry(ch).or_insert(0) += 1;
        if self.feedback {
            eprintln!("warning: skipping unrecognized character {:?}", ch);
        }
        if self.trace.is_some() {
            let snapshot = TapeSnapshot::capture(&self.tape);
            if let Some(log) = &mut self.trace {
                log.push(TraceEntry {
                    code_pos: at,
                    input_pos: self.cursor,
                    before: snapshot.clone(),
                    after: snapshot,
                    action: format!("Skipped unrecognized character {:?}", ch),
                    note: "Unchanged".to_string(),
                    emitted: None,
                    is_error: false,
                });
            }
        }
    }

    /// Record a loop boundary entry (state unchanged)
    fn boundary(&mut self, at: usize, action: String, is_error: bool) {
        let input_pos = self.cursor;
        if let Some(log) = &mut self.trace {
            let snapshot = TapeSnapshot::capture(&self.tape);
            log.push(TraceEntry {
                code_pos: at,
                input_pos,
                before: snapshot.clone(),
                after: snapshot,
                action,
                note: "Unchanged".to_string(),
                emitted: None,
                is_error,
            });
        }
    }
}
