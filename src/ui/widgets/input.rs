// src/ui/widgets/input.rs
use crate::app::{App, AppState, InputMode};
use ratatui::{prelude::*, widgets::{Block, Borders, Paragraph}};

/// Renders the input box. The title shows which checker Enter will run.
pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let hint = match app.mode {
        InputMode::Domain => "e.g. example.com",
        InputMode::Qr => "decoded QR text, e.g. https://example.com/menu",
    };
    let title = Line::from(vec![
        Span::styled(format!(" {} ", app.mode.title()), Style::new().bold().fg(Color::Black).bg(Color::Cyan)),
        Span::styled(format!(" {} (Tab to switch) ", hint), Style::new().fg(Color::DarkGray)),
    ]);
    let input_block = Block::default().borders(Borders::ALL).title(title);
    let input_paragraph = Paragraph::new(app.input.as_str())
        .block(input_block)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(input_paragraph, area);

    if let AppState::Idle = app.state {
        let width = app.input.chars().count() as u16;
        frame.set_cursor_position((area.x + width + 1, area.y + 1));
    }
}
