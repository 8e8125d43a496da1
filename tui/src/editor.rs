//! Editor view — renders the parameter form with ratatui widgets.
//!
//! Layout, top to bottom: the parameter list (one labeled input per row),
//! the add form when it is open, and a one-line status bar.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};

use param_editor_core::types::ParamEntry;

use crate::app::{App, AppState};


/// Everything a frame needs.
pub struct RenderState<'a> {
    pub app: &'a App,
    pub entries: &'a [ParamEntry],
    pub title: &'a str,
    pub placeholder: &'a str,
}


const LABEL_MIN: usize = 8;
const LABEL_MAX: usize = 30;
const FORM_HEIGHT: u16 = 4;

const HELP_TEXT: &str = concat!(
    "  j/k, arrows  Select parameter\n",
    "  Enter, e     Edit value (Enter/Esc to finish)\n",
    "  d, Delete    Delete parameter\n",
    "  a            Add parameter\n",
    "  :            Command prompt (set/add/delete/view/model)\n",
    "  ?            Toggle this help\n",
    "  q, Ctrl-C    Quit\n",
);


/// Render the whole screen.
pub fn render_frame(frame: &mut Frame, state: &RenderState) {
    let form_height = if state.app.is_add_form_open() { FORM_HEIGHT } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),              // parameter list
            Constraint::Length(form_height), // add form
            Constraint::Length(1),           // status bar
        ])
        .split(frame.area());

    render_param_list(frame, chunks[0], state);
    if state.app.is_add_form_open() {
        render_add_form(frame, chunks[1], state.app, state.placeholder);
    }
    render_status_bar(frame, chunks[2], state.app);

    if state.app.state == AppState::Help {
        render_help(frame, chunks[0]);
    }
}


/// Width of the label column in terminal columns: the longest name, within
/// bounds.
fn label_width(entries: &[ParamEntry]) -> usize {
    entries
        .iter()
        .map(|e| Span::raw(e.name.as_str()).width())
        .max()
        .unwrap_or(0)
        .clamp(LABEL_MIN, LABEL_MAX)
}


/// First row to draw so that `selected` is inside a window of `rows`.
fn scroll_offset(selected: usize, rows: usize) -> usize {
    if rows == 0 {
        0
    } else {
        selected.saturating_sub(rows - 1)
    }
}


/// Render one labeled input per parameter, with the selection highlighted.
fn render_param_list(frame: &mut Frame, area: Rect, state: &RenderState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} ({})", state.title, state.entries.len()));
    let inner = block.inner(area);

    if state.entries.is_empty() {
        let hint = Paragraph::new("No parameters. Press 'a' to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let label_w = label_width(state.entries);
    let value_w = (inner.width as usize).saturating_sub(label_w + 1);
    let visible_rows = (inner.height as usize).saturating_sub(1);
    let offset = scroll_offset(state.app.selected, visible_rows);
    let editing = match state.app.state {
        AppState::EditValue { id } => Some(id),
        _ => None,
    };

    let header = Row::new(vec!["Name", "Value"]).style(Style::default().bold());
    let mut cursor = None;
    let rows: Vec<Row> = state
        .entries
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows)
        .map(|(i, entry)| {
            let selected = i == state.app.selected;
            let value_cell = if editing == Some(entry.id) {
                let (shown, col) = state.app.value_field.visible(value_w);
                cursor = Some((i - offset, col));
                Cell::from(shown).style(Style::default().fg(Color::Cyan))
            } else if entry.value.is_empty() {
                Cell::from(state.placeholder.to_string())
                    .style(Style::default().fg(Color::DarkGray).italic())
            } else {
                Cell::from(entry.value.clone())
            };
            let row_style = if selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            Row::new(vec![Cell::from(entry.name.clone()), value_cell]).style(row_style)
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Length(label_w as u16), Constraint::Fill(1)],
    )
    .header(header)
    .column_spacing(1)
    .block(block);
    frame.render_widget(table, area);

    if let Some((row, col)) = cursor {
        let x = inner.x + label_w as u16 + 1 + col as u16;
        let y = inner.y + 1 + row as u16;
        frame.set_cursor_position((x, y));
    }
}


/// Render the add form: the name input and its controls.
fn render_add_form(frame: &mut Frame, area: Rect, app: &App, placeholder: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title("New parameter");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let label = "Name: ";
    let field_w = (inner.width as usize).saturating_sub(label.len());
    let (shown, col) = app.name_field.visible(field_w);
    let input = if app.name_field.is_empty() {
        Span::raw(placeholder.to_string()).fg(Color::DarkGray).italic()
    } else {
        Span::raw(shown)
    };
    let lines = vec![
        Line::from(vec![Span::raw(label).bold(), input]),
        Line::from("[Enter] OK   [Esc] Cancel").style(Style::default().fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
    frame.set_cursor_position((inner.x + label.len() as u16 + col as u16, inner.y));
}


/// Render the bottom line: the command prompt, a status message, or key hints.
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    if app.state == AppState::CommandEntry {
        let width = (area.width as usize).saturating_sub(2);
        let (shown, col) = app.prompt.visible(width);
        let mut spans = vec![Span::raw(": "), Span::raw(shown)];
        if let Some(err) = app.status_message() {
            spans.push(Span::raw("  "));
            spans.push(Span::raw(err.to_string()).fg(Color::Red));
        }
        let line = Line::from(spans);
        frame.render_widget(Paragraph::new(line).style(Style::default().fg(Color::Cyan)), area);
        frame.set_cursor_position((area.x + 2 + col as u16, area.y));
        return;
    }

    let (text, style) = match app.status_message() {
        Some(msg) => (format!(" {}", msg), Style::default().fg(Color::Yellow)),
        None => (
            format!(" {} | {}", app.state.label(), hints(&app.state)),
            Style::default().fg(Color::DarkGray),
        ),
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}


fn hints(state: &AppState) -> &'static str {
    match state {
        AppState::Browse => "Enter edit  d delete  a add  : command  ? help  q quit",
        AppState::EditValue { .. } => "type to change  Enter/Esc done",
        AppState::AddForm => "Enter OK  Esc cancel",
        AppState::CommandEntry => "Enter run  Esc cancel",
        AppState::Help => "Esc close",
    }
}


/// Render the key reference over the list.
fn render_help(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(HELP_TEXT)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: false });
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
