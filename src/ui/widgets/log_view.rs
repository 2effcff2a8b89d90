// src/ui/widgets/log_view.rs

use crate::app::App;
use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation},
};

/// Renders the newest log lines, newest first, with the timestamp dimmed.
pub fn render_log_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title("Logs (scroll with ← →)")
        .borders(Borders::ALL);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let max_width = app
        .log_content
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    app.log_horizontal_scroll_state = app.log_horizontal_scroll_state.content_length(max_width);

    // Lines look like "2026-01-01T10:00:00.000+01:00  INFO message".
    let log_lines: Vec<Line> = app
        .log_content
        .iter()
        .map(|line_str| match line_str.split_once(' ') {
            Some((timestamp, rest)) => Line::from(vec![
                Span::styled(timestamp.to_string(), Style::default().fg(Color::DarkGray)),
                Span::raw(format!(" {}", rest)),
            ]),
            None => Line::from(line_str.as_str()),
        })
        .collect();

    let scroll = u16::try_from(app.log_horizontal_scroll).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(log_lines).scroll((0, scroll)), inner_area);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::HorizontalBottom).thumb_symbol("■");
    let scrollbar_area = Rect {
        x: inner_area.x,
        y: inner_area.y + inner_area.height.saturating_sub(1),
        width: inner_area.width,
        height: 1,
    };
    frame.render_stateful_widget(scrollbar, scrollbar_area, &mut app.log_horizontal_scroll_state);
}
