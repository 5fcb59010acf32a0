//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the terminal loop and the layout helper
//! that splits the screen into header, list body and status line.
//!
//! This module stays "pure rendering": it reads the state and produces widgets. The only thing
//! it writes back is the layout metrics the paging actions need.

use crate::app::{AppState, LayoutMetrics};
use crate::core::fm::Entry;
use crate::core::formatter::{
    entry_glyph, format_entry_size, format_mtime, format_total_size, sanitize_to_exact_width,
};
use crate::core::window::window;
use crate::utils::shorten_home_path;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

/// Minimum width of the right-aligned size column. Fits every humansize output up to
/// "1023.99 MiB".
const SIZE_COLUMN: usize = 11;

/// Rows of the screen that are not list body: header, two gaps and the status line.
pub const CHROME_ROWS: u16 = 4;

/// Render function which renders the entire terminal UI for sift on each frame.
pub fn render(frame: &mut Frame, app: &mut AppState) {
    let [header, _, body, _, status] = layout_chunks(frame.area());

    app.update_layout_metrics(LayoutMetrics {
        list_rows: body.height as usize,
    });

    render_header(frame, app, header);
    render_list(frame, app, body);
    render_status(frame, app, status);
}

/// Splits the screen into header, gap, list body, gap and status line.
pub fn layout_chunks(area: Rect) -> [Rect; 5] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area)
}

fn render_header(frame: &mut Frame, app: &AppState, area: Rect) {
    let nav = app.nav();
    let total = format_total_size(nav.total_size());
    let path = shorten_home_path(nav.current_dir(), app.home());

    let width = area.width as usize;
    let path_width = width.saturating_sub(total.width() + 1);
    let line = Line::from(vec![
        Span::styled(
            sanitize_to_exact_width(&path, path_width),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::raw(total),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_list(frame: &mut Frame, app: &AppState, area: Rect) {
    let nav = app.nav();
    let entries = nav.entries();
    let marker = app.config().general().selection_marker();
    let blank = " ".repeat(marker.width());

    let (first, count) = window(entries.len(), nav.selected_idx(), area.height as usize);

    let lines: Vec<Line> = entries[first..first + count]
        .iter()
        .enumerate()
        .map(|(offset, entry)| {
            let selected = first + offset == nav.selected_idx();
            let prefix = if selected { marker } else { blank.as_str() };
            let row = format_row(prefix, entry, area.width as usize);
            if selected {
                Line::styled(row, Style::default().add_modifier(Modifier::BOLD))
            } else {
                Line::raw(row)
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// One list row: marker, name clipped to the free width, type glyph, right-aligned size.
///
/// The size is never cut. The name gives way so the row stays within `width`.
fn format_row(prefix: &str, entry: &Entry, width: usize) -> String {
    let size = format_entry_size(entry);
    let size_width = if size.is_empty() {
        0
    } else {
        SIZE_COLUMN.max(size.width())
    };
    let glyph = entry_glyph(entry.kind()).map(String::from).unwrap_or_default();

    // one blank between the name and the size column
    let reserved = prefix.width() + glyph.width() + size_width + usize::from(size_width > 0);
    let name_width = width.saturating_sub(reserved);

    let name = entry.name_str();
    let clipped = sanitize_to_exact_width(&name, name.width().min(name_width));

    if size.is_empty() {
        return format!("{prefix}{clipped}{glyph}");
    }

    let used = prefix.width() + clipped.width() + glyph.width();
    let pad = width.saturating_sub(used + size_width).max(1);
    format!(
        "{prefix}{clipped}{glyph}{}{:>w$}",
        " ".repeat(pad),
        size,
        w = size_width
    )
}

fn render_status(frame: &mut Frame, app: &AppState, area: Rect) {
    let actions = app.actions();

    if let Some(prompt) = actions.mode().prompt() {
        let buffer = actions.input_buffer();
        frame.render_widget(
            Paragraph::new(Line::from(vec![Span::raw(prompt), Span::raw(buffer)])),
            area,
        );
        let before_cursor = &buffer[..actions.input_cursor_pos()];
        let x = area.x as usize + prompt.width() + before_cursor.width();
        let x = x.min(area.right().saturating_sub(1) as usize) as u16;
        frame.set_cursor_position(Position::new(x, area.y));
        return;
    }

    let text = match app.status() {
        Some(msg) => msg.to_string(),
        None => status_summary(app),
    };
    frame.render_widget(
        Paragraph::new(sanitize_to_exact_width(&text, area.width as usize)),
        area,
    );
}

fn status_summary(app: &AppState) -> String {
    let nav = app.nav();
    let order = if nav.sort_order().is_by_time() {
        "time"
    } else {
        "name"
    };

    match nav.selected_entry() {
        Some(entry) => format!(
            "{}/{}  {}  sort: {}  filter: {}",
            nav.selected_idx() + 1,
            nav.entries().len(),
            format_mtime(entry.modified()),
            order,
            nav.filter()
        ),
        None => format!("0/0  sort: {}  filter: {}", order, nav.filter()),
    }
}
