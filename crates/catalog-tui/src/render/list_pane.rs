use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};
use ratatui::Frame;

use crate::app::App;
use crate::rows::ListRow;

use super::compute_scroll_offset;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Characters ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some((text, detail)) = app.placeholder() {
        let is_error = detail.is_some();
        let style = if is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut lines = vec![Line::from(Span::styled(text, style))];
        if let Some(detail) = detail {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(detail, Style::default().fg(Color::DarkGray))));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
        return;
    }

    let visible_height = inner.height as usize;
    if visible_height == 0 || app.rows.is_empty() {
        return;
    }

    // Adjust scroll so cursor is always visible.
    let scroll_offset = compute_scroll_offset(app.cursor, app.list_scroll_offset, visible_height);

    let lines: Vec<Line> = app
        .rows
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_height)
        .map(|(idx, row)| render_row(row, idx == app.cursor, app))
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);

    if app.rows.len() > visible_height {
        let mut scrollbar_state = ScrollbarState::new(app.rows.len())
            .position(scroll_offset)
            .viewport_content_length(visible_height);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .track_symbol(Some("│"))
            .thumb_symbol("█");

        frame.render_stateful_widget(scrollbar, inner, &mut scrollbar_state);
    }
}

fn render_row<'a>(row: &ListRow, is_selected: bool, app: &App) -> Line<'a> {
    let selected_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    match row {
        ListRow::Item { position } => {
            let name = app
                .store
                .displayed_item(*position)
                .map(|c| c.name.as_str())
                .unwrap_or("???");

            let style = if is_selected { selected_style } else { Style::default() };
            Line::from(Span::styled(format!("  {name}"), style))
        }
        ListRow::LoadMore { remaining } => {
            let style = if is_selected {
                selected_style
            } else {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            };
            Line::from(Span::styled(format!("  Load more ({remaining} remaining)"), style))
        }
    }
}
