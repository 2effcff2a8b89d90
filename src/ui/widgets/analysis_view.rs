// src/ui/widgets/analysis_view.rs

use crate::app::{App, AppState, SPINNER_CHARS};
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use safescope::core::knowledge_base::Polarity;
use safescope::core::models::Assessment;

pub fn render_analysis_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let main_block = Block::default()
        .borders(Borders::ALL)
        .title("Analysis (Navigate with ↑ ↓)");

    let content = match (&app.state, &app.outcome) {
        (AppState::Idle, _) => Some(
            Paragraph::new("Type a domain or QR content and press Enter.")
                .alignment(Alignment::Center),
        ),
        (AppState::Analyzing, _) => {
            let spinner_char = SPINNER_CHARS[app.spinner_frame];
            Some(
                Paragraph::new(Line::from(vec![
                    Span::styled(format!("{} ", spinner_char), Style::default().fg(Color::Cyan)),
                    Span::raw("Analyzing... Please wait."),
                ]))
                .alignment(Alignment::Center),
            )
        }
        (AppState::Finished, Some(Err(message))) => Some(
            Paragraph::new(vec![
                Line::from("ANALYSIS FAILED".bold().fg(Color::Red)),
                Line::from(""),
                Line::from(message.as_str()),
            ])
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center),
        ),
        _ => None,
    };
    if let Some(content) = content {
        frame.render_widget(content.block(main_block), area);
        return;
    }

    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(25),
            Constraint::Min(0),
        ])
        .split(inner_area);

    let flags = app.flags();
    let items: Vec<ListItem> = flags
        .iter()
        .map(|(polarity, flag)| {
            let (icon, style) = match polarity {
                Polarity::Red => ("✗ ", Style::default().fg(Color::Red)),
                Polarity::Green => ("✓ ", Style::default().fg(Color::Green)),
            };
            ListItem::new(Line::from(vec![
                Span::styled(icon, style),
                Span::styled(format!("[{}] ", flag.detail().category), Style::default().fg(Color::DarkGray)),
                Span::styled(flag.message(), style),
            ]))
        })
        .collect();

    if items.is_empty() {
        frame.render_widget(
            Paragraph::new("No flags were raised.").alignment(Alignment::Center),
            chunks[0],
        );
    } else {
        let flag_list = List::new(items)
            .block(Block::default())
            .highlight_style(Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
        frame.render_stateful_widget(flag_list, chunks[0], &mut app.flag_list_state);
    }

    let detail_block = Block::default().borders(Borders::TOP).title("Details");
    let selected = app.flag_list_state.selected().and_then(|i| flags.get(i));
    let detail_text = match selected {
        Some((_, flag)) => Text::from(vec![
            Line::from("WHAT IT MEANS:".yellow().bold()),
            Line::from(flag.detail().description),
        ]),
        None => Text::from("Select a flag above to see details."),
    };
    frame.render_widget(
        Paragraph::new(detail_text).wrap(Wrap { trim: true }).block(detail_block),
        chunks[1],
    );

    if let Some(assessment) = app.assessment() {
        render_recommendations(frame, assessment, chunks[2]);
    }
}

fn render_recommendations(frame: &mut Frame, assessment: &Assessment, area: Rect) {
    let block = Block::default().borders(Borders::TOP).title("Recommendations");
    let lines: Vec<Line> = assessment
        .recommendations
        .iter()
        .map(|r| Line::from(vec![Span::styled("• ", Style::default().fg(Color::Cyan)), Span::raw(r.as_str())]))
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }).block(block), area);
}
