use catalog::sort;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};
use ratatui::Frame;

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Detail ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(character) = app.selected_character() else {
        let hint = Paragraph::new("Select a character to view details")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, inner);
        return;
    };

    let label_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(Color::White);
    let dim_style = Style::default().fg(Color::DarkGray);

    let first_seen = match sort::try_sort_key(character) {
        Ok(n) => format!("episode {n}"),
        Err(e) => e.to_string(),
    };

    let field = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(label, label_style),
            Span::styled(value, value_style),
        ])
    };

    let mut lines: Vec<Line> = vec![
        field("Name:       ", character.name.clone()),
        field("Species:    ", character.species.clone()),
        field("Gender:     ", character.gender.clone()),
        field("Status:     ", character.status.clone()),
        field("First seen: ", first_seen),
        Line::from(vec![
            Span::styled("ID:         ", label_style),
            Span::styled(character.id.to_string(), dim_style),
        ]),
        Line::from(vec![
            Span::styled("Image:      ", label_style),
            Span::styled(character.image.clone(), dim_style),
        ]),
    ];

    // Separator
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "\u{2500}".repeat(inner.width as usize),
        dim_style,
    )));
    lines.push(Line::from(Span::styled(
        format!("Episodes ({})", character.episode.len()),
        label_style,
    )));

    for reference in &character.episode {
        lines.push(Line::from(Span::styled(format!("  {reference}"), value_style)));
    }

    let content_length = lines.len();
    let visible_height = inner.height as usize;

    let paragraph = Paragraph::new(lines)
        .scroll((app.detail_scroll, 0))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, inner);

    if content_length > visible_height {
        let mut scrollbar_state = ScrollbarState::new(content_length)
            .position(app.detail_scroll as usize)
            .viewport_content_length(visible_height);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .track_symbol(Some("│"))
            .thumb_symbol("█");

        frame.render_stateful_widget(scrollbar, inner, &mut scrollbar_state);
    }
}
