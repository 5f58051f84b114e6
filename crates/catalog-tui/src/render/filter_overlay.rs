use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::rows::FilterRow;

use super::{centered_rect_fixed, compute_scroll_offset};

/// Where the overlay sits within `area`.
pub fn area(area: Rect, app: &App) -> Rect {
    let popup_height = (app.filter_rows.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 40u16.min(area.width.saturating_sub(4));
    centered_rect_fixed(popup_width, popup_height, area)
}

pub fn render(frame: &mut Frame, frame_area: Rect, app: &App) {
    let popup_area = area(frame_area, app);

    // Clear background under the popup.
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Filter ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let visible_height = inner.height as usize;
    if visible_height == 0 {
        return;
    }

    let header_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let normal_style = Style::default().fg(Color::White);
    let selected_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let count_style = Style::default().fg(Color::DarkGray);

    let scroll_offset =
        compute_scroll_offset(app.filter_cursor, app.filter_scroll_offset, visible_height);

    let lines: Vec<Line> = app
        .filter_rows
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_height)
        .map(|(idx, row)| match row {
            FilterRow::Header { dimension, selected } => {
                let suffix = if *selected > 0 {
                    format!(" ({selected} selected)")
                } else {
                    String::new()
                };
                Line::from(vec![
                    Span::styled(dimension.display_label(), header_style),
                    Span::styled(suffix, count_style),
                ])
            }
            FilterRow::Value {
                value,
                count,
                selected,
                ..
            } => {
                let style = if idx == app.filter_cursor {
                    selected_style
                } else {
                    normal_style
                };
                let mark = if *selected { "[x]" } else { "[ ]" };
                Line::from(vec![
                    Span::styled(format!("  {mark} {value}"), style),
                    Span::styled(format!(" ({count})"), count_style),
                ])
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
