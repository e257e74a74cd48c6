// Block tree definitions for parsed programs

/// The six literal tape instructions
///
/// `[` and `]` have no opcode; they exist only as tree structure
/// ([`Entry::Loop`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// `>`: move the tape cursor right
    Right,
    /// `<`: move the tape cursor left
    Left,
    /// `+`: increment the selected cell
    Up,
    /// `-`: decrement the selected cell
    Down,
    /// `.`: emit the selected cell as one output value
    Output,
    /// `,`: read one input character into the selected cell
    Input,
}

impl Opcode {
    /// Map a source character to its opcode, `None` for anything inert
    pub fn from_char(c: char) -> Option<Opcode> {
        match c {
            '>' => Some(Opcode::Right),
            '<' => Some(Opcode::Left),
            '+' => Some(Opcode::Up),
            '-' => Some(Opcode::Down),
            '.' => Some(Opcode::Output),
            ',' => Some(Opcode::Input),
            _ => None,
        }
    }

    /// The instruction's source character
    pub fn symbol(&self) -> char {
        match self {
            Opcode::Right => '>',
            Opcode::Left => '<',
            Opcode::Up => '+',
            Opcode::Down => '-',
            Opcode::Output => '.',
            Opcode::Input => ',',
        }
    }
}

/// One entry of a [`Block`]
///
/// Entries are a tagged choice between a literal instruction, an inert
/// character, and a nested loop; traversal sites match on the variant
/// explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A literal instruction at a source index
    Op { op: Opcode, at: usize },
    /// An inert character, kept so traces and the structure dump can show it
    Skip { ch: char, at: usize },
    /// A nested loop body
    Loop(Block),
}

/// An ordered sequence of entries, the unit of both interpretation and
/// compilation
///
/// A block with `open_at == None` is the program root; otherwise it is a
/// loop body and `open_at` is the source index of its `[`. Blocks hold no
/// parent links; enclosing blocks exist only on the builder's stack while
/// parsing. Once built, a block is immutable and may be executed any number
/// of times.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub entries: Vec<Entry>,
    /// Source index of this block's `[`; `None` for the root block
    pub open_at: Option<usize>,
}

impl Block {
    /// Create an empty root block
    pub fn new() -> Self {
        Block {
            entries: Vec::new(),
            open_at: None,
        }
    }

    /// Create an empty loop body opened at a source index
    pub fn open(at: usize) -> Self {
        Block {
            entries: Vec::new(),
            open_at: Some(at),
        }
    }

    /// Append an entry
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Whether this block is a loop body
    pub fn is_loop(&self) -> bool {
        self.open_at.is_some()
    }

    /// Number of source characters this block's entries cover
    ///
    /// Nested loops count their body plus both brackets, so for a loop
    /// opened at `open_at` the matching `]` sits at
    /// `open_at + 1 + source_len()`.
    pub fn source_len(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| match entry {
                Entry::Op { .. } | Entry::Skip { .. } => 1,
                Entry::Loop(block) => block.source_len() + 2,
            })
            .sum()
    }

    /// Source index of this block's `]`, derived from entry lengths;
    /// `None` for the root
    ///
    /// For a loop left open at end-of-source this is the index one past the
    /// last character, where the missing bracket would have been.
    pub fn close_at(&self) -> Option<usize> {
        self.open_at.map(|at| at + 1 + self.source_len())
    }

    /// Indented listing of the tree, one entry per line
    ///
    /// Entries are numbered from 1 within their block; loops print a
    /// `Loop:` header with their body indented below it.
    pub fn structure(&self) -> String {
        let mut out = String::new();
        self.structure_into("", &mut out);
        out
    }

    fn structure_into(&self, prefix: &str, out: &mut String) {
        for (i, entry) in self.entries.iter().enumerate() {
            match entry {
                Entry::Op { op, .. } => {
                    out.push_str(&format!("{}{} | {}\n", prefix, i + 1, op.symbol()));
                }
                Entry::Skip { ch, .. } => {
                    out.push_str(&format!("{}{} | {}\n", prefix, i + 1, ch));
                }
                Entry::Loop(block) => {
                    out.push_str(&format!("{}{} | Loop:\n", prefix, i + 1));
                    block.structure_into(&format!("{}   ", prefix), out);
                }
            }
        }
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::new()
    }
}
