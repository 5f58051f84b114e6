mod detail_pane;
mod filter_overlay;
mod list_pane;
mod search_bar;
mod status_bar;

use catalog::{Dimension, SortDirection};
use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, LayoutGeometry, Mode};

pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Outer layout: title bar (1), main content, bottom bar (1).
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(size);

    render_title_bar(frame, outer[0], app);

    let panes = split_panes(outer[1]);
    list_pane::render(frame, panes[0], app);
    detail_pane::render(frame, panes[1], app);

    match app.mode {
        Mode::Search => search_bar::render(frame, outer[2], app),
        Mode::Normal | Mode::Filter => status_bar::render(frame, outer[2], app),
    }

    if app.mode == Mode::Filter {
        filter_overlay::render(frame, size, app);
    }
}

fn split_panes(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area)
}

fn render_title_bar(frame: &mut Frame, area: Rect, app: &App) {
    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(Color::DarkGray);
    let filter_style = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled(" Characters", title_style),
        Span::raw("  "),
        Span::styled(format!("[{}]", app.source_label), label_style),
    ];

    let selection = app.store.selection();
    for dimension in Dimension::all() {
        let selected = selection.selected(dimension);
        if selected.is_empty() {
            continue;
        }
        let values: Vec<&str> = selected.iter().map(String::as_str).collect();
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("{{{dimension}:{}}}", values.join(",")),
            filter_style,
        ));
    }

    if !selection.search.is_empty() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("{{name:{}}}", selection.search),
            filter_style,
        ));
    }

    let arrow = match app.store.sort_direction() {
        SortDirection::Ascending => "\u{2191} first seen",
        SortDirection::Descending => "\u{2193} first seen",
    };
    spans.push(Span::raw("  "));
    spans.push(Span::styled(arrow, label_style));
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        format!(
            "{} of {} ({} total)",
            app.store.window_size(),
            app.store.total_filtered_count(),
            app.store.total_count()
        ),
        label_style,
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Compute layout geometry for mouse hit testing.
/// This mirrors the layout calculations in render() but returns Rect values.
pub fn compute_layout(frame_size: Rect, app: &App) -> LayoutGeometry {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame_size);

    let panes = split_panes(outer[1]);

    let list_inner = Block::default().borders(Borders::ALL).inner(panes[0]);
    let detail_inner = Block::default().borders(Borders::ALL).inner(panes[1]);

    let overlay = match app.mode {
        Mode::Filter => Some(filter_overlay::area(frame_size, app)),
        Mode::Normal | Mode::Search => None,
    };

    LayoutGeometry {
        list_inner,
        detail_inner,
        overlay,
    }
}

/// Scroll offset the list pane renders with, so clicks map to the rows on screen.
pub fn list_scroll_offset(app: &App) -> usize {
    let visible_height = app.layout_geometry.list_inner.height as usize;
    if visible_height == 0 {
        return 0;
    }
    compute_scroll_offset(app.cursor, app.list_scroll_offset, visible_height)
}

/// Scroll offset the filter overlay renders with.
pub fn filter_scroll_offset(app: &App) -> usize {
    let Some(overlay) = app.layout_geometry.overlay else {
        return 0;
    };
    let visible_height = overlay.height.saturating_sub(2) as usize;
    if visible_height == 0 {
        return 0;
    }
    compute_scroll_offset(app.filter_cursor, app.filter_scroll_offset, visible_height)
}

/// Helper to create a centered rectangle with fixed dimensions.
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center);

    let [vertical_area] = vertical.areas(area);
    let [centered] = horizontal.areas(vertical_area);
    centered
}

/// Keep `cursor` visible inside a viewport of `visible_height` rows.
fn compute_scroll_offset(cursor: usize, current_offset: usize, visible_height: usize) -> usize {
    if cursor < current_offset {
        cursor
    } else if cursor >= current_offset + visible_height {
        cursor.saturating_sub(visible_height - 1)
    } else {
        current_offset
    }
}
