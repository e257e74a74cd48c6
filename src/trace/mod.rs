// Execution trace recording and step replay

use crate::memory::tape::Tape;
use crate::memory::value::Value;

/// Tape state captured around one instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapeSnapshot {
    pub cells: Vec<u8>,
    pub selected: usize,
}

impl TapeSnapshot {
    /// Capture the current cell values and selection of a tape
    pub fn capture(tape: &Tape) -> Self {
        TapeSnapshot {
            cells: tape.cells().iter().map(|c| c.get()).collect(),
            selected: tape.selected(),
        }
    }

    /// Rendered cell row, e.g. `[65][0][3]`
    pub fn row(&self) -> String {
        self.cells.iter().map(|v| format!("[{}]", v)).collect()
    }

    /// Column inside [`row`](Self::row) where the selected cell's value
    /// starts, for placing a marker line above it
    pub fn marker_column(&self) -> usize {
        let digits: usize = self.cells[..self.selected]
            .iter()
            .map(|v| v.to_string().len())
            .sum();
        // Two bracket characters per preceding cell, plus our own `[`
        digits + self.selected * 2 + 1
    }
}

/// One recorded observation of a single instruction's effect
#[derive(Debug, Clone)]
pub struct TraceEntry {
    /// Character index into the source this entry points at
    pub code_pos: usize,
    /// Input characters consumed before this instruction ran
    pub input_pos: usize,
    pub before: TapeSnapshot,
    pub after: TapeSnapshot,
    /// What the instruction did
    pub action: String,
    /// Short note attached to the selected cell after execution
    pub note: String,
    /// Output value emitted by this instruction, if any
    pub emitted: Option<Value>,
    /// Whether this entry records a fault (a loop abandoned at the ceiling)
    pub is_error: bool,
}

impl TraceEntry {
    /// Estimate the memory usage of this entry in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough: one byte per captured cell plus the strings and a fixed
        // overhead for the scalar fields
        self.before.cells.len() + self.after.cells.len() + self.action.len() + self.note.len() + 64
    }

    /// Render this entry as a console block: marker lines over the source
    /// and input, the action, the before/after cell rows with the selected
    /// cell marked, and the output accumulated so far
    pub fn render(&self, source: &str, input: &str, output_so_far: &str) -> String {
        let mut out = String::new();
        out.push_str("------------------------------------------------\n");
        out.push_str("Code:\n");
        out.push_str(&marker(self.code_pos));
        out.push('\n');
        out.push_str(source);
        out.push('\n');
        out.push_str("Input:\n");
        out.push_str(&marker(self.input_pos));
        out.push('\n');
        out.push_str(input);
        out.push('\n');
        if self.is_error {
            out.push_str(&format!("ERROR: {}\n", self.action));
        } else {
            out.push_str(&format!("{}\n", self.action));
        }
        out.push_str(&format!("{} selected\n", marker(self.before.marker_column())));
        out.push_str(&self.before.row());
        out.push('\n');
        out.push_str(&format!("{} {}\n", marker(self.after.marker_column()), self.note));
        out.push_str(&self.after.row());
        out.push('\n');
        match self.emitted {
            Some(value) => out.push_str(&format!(
                "\nOutput so far: {:?} (new: '{}' code {})\n",
                output_so_far,
                value.to_char(),
                value.code()
            )),
            None => out.push_str(&format!("\nOutput so far: {:?}\n", output_so_far)),
        }
        out
    }
}

fn marker(column: usize) -> String {
    format!("{}↓", " ".repeat(column))
}

/// Ordered log of trace entries for one traced execution
#[derive(Debug, Default)]
pub struct TraceLog {
    entries: Vec<TraceEntry>,
    estimated_bytes: usize,
}

impl TraceLog {
    pub fn new() -> Self {
        TraceLog {
            entries: Vec::new(),
            estimated_bytes: 0,
        }
    }

    /// Append an entry to the log
    pub fn push(&mut self, entry: TraceEntry) {
        self.estimated_bytes += entry.estimated_size();
        self.entries.push(entry);
    }

    /// Get an entry by index
    pub fn get(&self, index: usize) -> Option<&TraceEntry> {
        self.entries.get(index)
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceEntry> {
        self.entries.iter()
    }

    /// Whether any entry records a fault
    pub fn had_error(&self) -> bool {
        self.entries.iter().any(|e| e.is_error)
    }

    /// Estimated memory held by the recorded entries, in bytes
    pub fn memory_usage(&self) -> usize {
        self.estimated_bytes
    }

    /// Step cursor starting before the first entry
    pub fn replay(&self) -> Replay<'_> {
        Replay {
            log: self,
            position: 0,
        }
    }
}

impl<'a> IntoIterator for &'a TraceLog {
    type Item = &'a TraceEntry;
    type IntoIter = std::slice::Iter<'a, TraceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Step cursor over a trace log
///
/// The replay consumer suspends between entries: each external advance
/// signal yields exactly one entry, and the cursor reports `None` once the
/// log is exhausted. `Replay` also implements [`Iterator`], where each pull
/// is the advance signal.
#[derive(Debug)]
pub struct Replay<'a> {
    log: &'a TraceLog,
    position: usize,
}

impl<'a> Replay<'a> {
    /// Entries yielded so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// Entries not yet yielded
    pub fn remaining(&self) -> usize {
        self.log.len() - self.position
    }

    /// Yield the next entry, or `None` after the last
    pub fn advance(&mut self) -> Option<&'a TraceEntry> {
        let entry = self.log.get(self.position)?;
        self.position += 1;
        Some(entry)
    }
}

impl<'a> Iterator for Replay<'a> {
    type Item = &'a TraceEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}
