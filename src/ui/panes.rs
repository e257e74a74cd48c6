//! Rendering logic for each TUI pane

use crate::memory::value::Value;
use crate::trace::{TapeSnapshot, TraceEntry};
use crate::ui::theme::DEFAULT_THEME;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
};

/// Style for a single source character, by symbol class
fn symbol_style(c: char) -> Style {
    match c {
        '[' | ']' => Style::default().fg(DEFAULT_THEME.primary), // Loop brackets
        '>' | '<' => Style::default().fg(DEFAULT_THEME.secondary), // Cursor moves
        '+' | '-' => Style::default().fg(DEFAULT_THEME.fg),      // Cell arithmetic
        '.' | ',' => Style::default().fg(DEFAULT_THEME.success), // I/O
        _ => Style::default().fg(DEFAULT_THEME.comment),         // Inert characters
    }
}

/// Control characters would break the row layout, so show a placeholder
fn display_char(c: char) -> char {
    if c == '\n' || c == '\t' || c.is_control() {
        '·'
    } else {
        c
    }
}

/// Render the source code pane with the current position highlighted
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source: &str,
    code_pos: Option<usize>,
    is_focused: bool,
    scroll_offset: &mut usize,
    target_row: &mut Option<usize>,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let chars: Vec<char> = source.chars().collect();

    if chars.is_empty() {
        let paragraph = Paragraph::new("(empty program)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    // Source is displayed as a flat character grid wrapped to the pane width,
    // so character positions map directly onto visual rows
    let content_width = (area.width.saturating_sub(2)).max(1) as usize;
    let total_rows = (chars.len() + content_width - 1) / content_width;
    let visible_height = (area.height.saturating_sub(2)).max(1) as usize;

    // Initialize target_row to center if not set
    if target_row.is_none() {
        *target_row = Some(visible_height / 2);
    }

    // Get the target row, clamping to stay within visible area
    let target = target_row.unwrap().min(visible_height.saturating_sub(1));
    *target_row = Some(target);

    // Calculate scroll offset to keep the current position at the target visual row
    if let Some(pos) = code_pos {
        let current_row = (pos / content_width).min(total_rows.saturating_sub(1));
        *scroll_offset = current_row.saturating_sub(target);

        // Clamp scroll offset to valid range
        if total_rows > visible_height {
            let max_scroll = total_rows - visible_height;
            *scroll_offset = (*scroll_offset).min(max_scroll);
        } else {
            *scroll_offset = 0;
        }
    }

    let mut visible_lines: Vec<Line> = Vec::new();
    for row in *scroll_offset..(*scroll_offset + visible_height).min(total_rows) {
        let start = row * content_width;
        let end = (start + content_width).min(chars.len());

        let mut spans = Vec::new();
        for (offset, &c) in chars[start..end].iter().enumerate() {
            let at = start + offset;
            let mut style = symbol_style(c);
            if Some(at) == code_pos {
                style = style
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            spans.push(Span::styled(display_char(c).to_string(), style));
        }
        visible_lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Render the input pane, dimming consumed characters and marking the read cursor
pub fn render_input_pane(
    frame: &mut Frame,
    area: Rect,
    input: &str,
    input_pos: Option<usize>,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let chars: Vec<char> = input.chars().collect();

    if chars.is_empty() {
        let block = Block::default()
            .title(" Input ")
            .borders(Borders::ALL)
            .border_style(border_style);
        let paragraph = Paragraph::new("(no input)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let title = match input_pos {
        Some(pos) if pos >= chars.len() => " Input (exhausted) ",
        _ => " Input ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let content_width = (area.width.saturating_sub(2)).max(1) as usize;
    let visible_height = (area.height.saturating_sub(2)).max(1) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for start in (0..chars.len()).step_by(content_width) {
        if lines.len() >= visible_height {
            break;
        }
        let end = (start + content_width).min(chars.len());

        let mut spans = Vec::new();
        for (offset, &c) in chars[start..end].iter().enumerate() {
            let at = start + offset;
            let style = match input_pos {
                // Already consumed
                Some(pos) if at < pos => Style::default().fg(DEFAULT_THEME.comment),
                // Read cursor
                Some(pos) if at == pos => Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD),
                // Still pending
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };
            spans.push(Span::styled(display_char(c).to_string(), style));
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// One snapshot row of the tape pane, scrolled to the visible cell window
fn snapshot_row(
    label: &str,
    snapshot: &TapeSnapshot,
    scroll: usize,
    visible_cells: usize,
    columns: usize,
) -> Line<'static> {
    let mut spans = vec![Span::styled(
        label.to_string(),
        Style::default().fg(DEFAULT_THEME.comment),
    )];

    if scroll > 0 {
        spans.push(Span::styled("…", Style::default().fg(DEFAULT_THEME.comment)));
    }

    for idx in scroll..(scroll + visible_cells).min(columns) {
        match snapshot.cells.get(idx) {
            Some(&value) => {
                let style = if idx == snapshot.selected {
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .bg(DEFAULT_THEME.current_line_bg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(DEFAULT_THEME.fg)
                };
                spans.push(Span::styled(format!("[{:>3}]", value), style));
            }
            // The other row grew past this one; keep columns aligned
            None => spans.push(Span::raw("     ")),
        }
    }

    Line::from(spans)
}

/// Render the tape pane: the selected step's tape before and after the operation
pub fn render_tape_pane(
    frame: &mut Frame,
    area: Rect,
    entry: Option<&TraceEntry>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let entry = match entry {
        Some(entry) => entry,
        None => {
            let block = Block::default()
                .title(" Tape ")
                .borders(Borders::ALL)
                .border_style(border_style);
            let paragraph = Paragraph::new("(no steps recorded)")
                .block(block)
                .style(Style::default().fg(DEFAULT_THEME.comment));
            frame.render_widget(paragraph, area);
            return;
        }
    };

    let before = &entry.before;
    let after = &entry.after;
    let columns = before.cells.len().max(after.cells.len());

    let block = Block::default()
        .title(format!(" Tape ({} cells) ", after.cells.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let label_width = 8; // " before " / "  after "
    let cell_width = 5; // "[255]"
    let content_width = (area.width.saturating_sub(2)).max(1) as usize;
    let visible_cells = (content_width.saturating_sub(label_width) / cell_width).max(1);

    // Keep the selected cell in view
    if after.selected < *scroll_offset {
        *scroll_offset = after.selected;
    } else if after.selected >= *scroll_offset + visible_cells {
        *scroll_offset = after.selected + 1 - visible_cells;
    }
    if columns > visible_cells {
        *scroll_offset = (*scroll_offset).min(columns - visible_cells);
    } else {
        *scroll_offset = 0;
    }

    let note_style = if entry.is_error {
        Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.comment)
    };

    let lines = vec![
        snapshot_row(" before ", before, *scroll_offset, visible_cells, columns),
        snapshot_row("  after ", after, *scroll_offset, visible_cells, columns),
        Line::from(Span::styled(format!("  {}", entry.note), note_style)),
    ];

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Render the output pane with everything emitted up to the selected step
pub fn render_output_pane(
    frame: &mut Frame,
    area: Rect,
    output: &str,
    emitted: Option<Value>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Output ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if output.is_empty() && emitted.is_none() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));

    // Build all items
    let mut all_items: Vec<ListItem> = output
        .split('\n')
        .map(|line| ListItem::new(line.to_string()).style(Style::default().fg(DEFAULT_THEME.fg)))
        .collect();

    if let Some(value) = emitted {
        all_items.push(
            ListItem::new(format!("new: {:?} (code {})", value.to_char(), value.code()))
                .style(Style::default().fg(DEFAULT_THEME.success)),
        );
    }

    // Calculate visible range for scrolling
    let total_items = all_items.len();
    let visible_height = (area.height.saturating_sub(2)).max(1) as usize;

    // Clamp scroll offset only if content exceeds visible area
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    // Take only visible items
    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}

/// Render the status bar at the bottom
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    action: &str,
    is_error: bool,
    current_step: usize,
    total_steps: usize,
    trace_bytes: usize,
    is_playing: bool,
) {
    // Split status bar into left and right
    let layout = ratatui::layout::Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([
            ratatui::layout::Constraint::Percentage(55),
            ratatui::layout::Constraint::Percentage(45),
        ])
        .split(area);

    let step_display = if total_steps == 0 { 0 } else { current_step + 1 };
    let action_style = if is_error {
        Style::default()
            .bg(DEFAULT_THEME.current_line_bg)
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(DEFAULT_THEME.current_line_bg)
            .fg(DEFAULT_THEME.fg)
    };

    // Left side: Step info, current action, trace memory
    let left_spans = vec![
        Span::styled(
            format!(" Step {}/{} ", step_display, total_steps),
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(format!(" {} ", action), action_style),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} trace ", format_bytes(trace_bytes)),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let mut right_spans = vec![
        Span::styled(" ←/→ ", key_style),
        Span::styled(" step ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" 1-9 ", key_style),
        Span::styled(" jump ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ⎵ ", key_style),
        Span::styled(" play ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ↵ / ⌫ ", key_style),
        Span::styled(" end/start ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
    ];

    // Show status indicators based on position and state
    let is_at_start = current_step == 0;
    let is_at_end = total_steps == 0 || current_step + 1 >= total_steps;

    if is_playing {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            " ▶ PLAYING ",
            Style::default()
                .bg(DEFAULT_THEME.secondary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    } else if is_at_end {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            " END ",
            Style::default()
                .bg(DEFAULT_THEME.error)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    } else if is_at_start {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            " START ",
            Style::default()
                .bg(DEFAULT_THEME.success)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}

/// Human-readable byte count for the status bar
fn format_bytes(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0))
    }
}
