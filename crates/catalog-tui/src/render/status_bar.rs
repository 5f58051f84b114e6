use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, Mode};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let hint_style = Style::default().fg(Color::DarkGray);

    let line = if let Some(msg) = &app.status_message {
        let style = if msg.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        Line::from(Span::styled(format!(" {}", msg.text), style))
    } else if app.mode == Mode::Filter {
        Line::from(vec![
            Span::styled(" \u{2191}\u{2193} navigate  ", hint_style),
            Span::styled("space toggle  ", hint_style),
            Span::styled("x clear  ", hint_style),
            Span::styled("esc close", hint_style),
        ])
    } else {
        Line::from(vec![
            Span::styled(" \u{2191}\u{2193} navigate  ", hint_style),
            Span::styled("/ search  ", hint_style),
            Span::styled("f filter  ", hint_style),
            Span::styled("o sort  ", hint_style),
            Span::styled("m more  ", hint_style),
            Span::styled("r reload  ", hint_style),
            Span::styled("esc clear  ", hint_style),
            Span::styled("q quit", hint_style),
        ])
    };

    frame.render_widget(Paragraph::new(line), area);
}
