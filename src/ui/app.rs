//! Main TUI application state and logic

use crate::interpreter::engine::Execution;
use crate::trace::TraceLog;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
};
use std::io;
use std::time::{Duration, Instant};

/// How long auto-play pauses between steps
const PLAY_INTERVAL: Duration = Duration::from_millis(250);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Output,
    Tape,
    Input,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> output -> tape -> input)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Tape,
            FocusedPane::Tape => FocusedPane::Input,
            FocusedPane::Input => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Input,
            FocusedPane::Output => FocusedPane::Source,
            FocusedPane::Tape => FocusedPane::Output,
            FocusedPane::Input => FocusedPane::Tape,
        }
    }
}

/// The main application state
pub struct App {
    /// The recorded trace being replayed
    pub log: TraceLog,

    /// Final results of the recorded run
    pub execution: Execution,

    /// The source code that was executed
    pub source: String,

    /// The input the program read from
    pub input: String,

    /// Current step index into the trace
    pub position: usize,

    /// Byte offset into the final output after each step, for output-so-far slicing
    output_offsets: Vec<usize>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tape_scroll: usize,
    pub output_scroll: usize,

    /// Target visual row for the current source position (None = not initialized yet)
    /// This keeps the highlighted character at a fixed position when stepping
    pub target_source_row: Option<usize>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app replaying the given trace
    pub fn new(log: TraceLog, execution: Execution, source: String, input: String) -> Self {
        let mut output_offsets = Vec::with_capacity(log.len());
        let mut offset = 0;
        for entry in &log {
            if let Some(value) = entry.emitted {
                offset += value.to_char().len_utf8();
            }
            output_offsets.push(offset);
        }

        App {
            log,
            execution,
            source,
            input,
            position: 0,
            output_offsets,
            focused_pane: FocusedPane::Source,
            source_scroll: 0,
            tape_scroll: 0,
            output_scroll: 0,
            target_source_row: None, // Will be set to center on first render
            should_quit: false,
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing {
                if self.last_play_time.elapsed() >= PLAY_INTERVAL {
                    if self.step_forward() {
                        self.output_scroll = usize::MAX;
                    } else {
                        // No more steps available
                        self.is_playing = false;
                    }
                    self.last_play_time = Instant::now();
                }
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Create layout: 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Split into 2 columns
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(pane_area);

        // Left column: Source (top) | Output (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: Tape (top) | Input (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        let entry = self.log.get(self.position);
        let code_pos = entry.map(|e| e.code_pos);
        let input_pos = entry.map(|e| e.input_pos);
        let emitted = entry.and_then(|e| e.emitted);
        let is_error = entry.map_or(false, |e| e.is_error);
        let action = match entry {
            Some(e) => e.action.clone(),
            None => String::from("No steps recorded"),
        };

        // Output emitted up to and including the current step
        let output_end = self.output_offsets.get(self.position).copied().unwrap_or(0);
        let output = &self.execution.result[..output_end];

        // Render each pane
        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source,
            code_pos,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
            &mut self.target_source_row,
        );

        super::panes::render_output_pane(
            frame,
            left_rows[1],
            output,
            emitted,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        super::panes::render_tape_pane(
            frame,
            right_rows[0],
            entry,
            self.focused_pane == FocusedPane::Tape,
            &mut self.tape_scroll,
        );

        super::panes::render_input_pane(
            frame,
            right_rows[1],
            &self.input,
            input_pos,
            self.focused_pane == FocusedPane::Input,
        );

        // Render status bar
        super::panes::render_status_bar(
            frame,
            status_area,
            &action,
            is_error,
            self.position,
            self.log.len(),
            self.log.memory_usage(),
            self.is_playing,
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap() as usize;
                for _ in 0..n {
                    if !self.step_forward() {
                        break;
                    }
                }
                self.output_scroll = usize::MAX;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                if self.step_forward() {
                    self.output_scroll = usize::MAX;
                }
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current position move down visually
                    if let Some(row) = self.target_source_row {
                        self.target_source_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Tape => {
                    self.tape_scroll = self.tape_scroll.saturating_sub(1);
                }
                FocusedPane::Output => {
                    if self.output_scroll > 0 {
                        self.output_scroll = self.output_scroll.saturating_sub(1);
                    }
                }
                FocusedPane::Input => {}
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling down makes the current position move up visually
                    if let Some(row) = self.target_source_row {
                        self.target_source_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Tape => {
                    self.tape_scroll = self.tape_scroll.saturating_add(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_add(1);
                }
                FocusedPane::Input => {}
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(PLAY_INTERVAL)
                            .unwrap_or(Instant::now());
                    }
                }
            }
            KeyCode::Enter => {
                // Jump to the final step
                self.is_playing = false;
                if !self.log.is_empty() {
                    self.position = self.log.len() - 1;
                }
                self.output_scroll = usize::MAX;
            }
            KeyCode::Backspace => {
                // Jump back to the first step
                self.is_playing = false;
                self.position = 0;
                self.output_scroll = 0;
            }
            _ => {}
        }
    }

    /// Step forward in the trace; returns false when already at the final step
    fn step_forward(&mut self) -> bool {
        if self.position + 1 < self.log.len() {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Step backward in the trace; returns false when already at the first step
    fn step_backward(&mut self) -> bool {
        if self.position > 0 {
            self.position -= 1;
            true
        } else {
            false
        }
    }
}
