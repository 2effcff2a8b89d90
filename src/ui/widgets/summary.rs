// src/ui/widgets/summary.rs

use crate::app::{App, AppState};
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
};
use safescope::core::models::{Confidence, RiskLevel, SourceStatus};

/// Renders the score, verdict, confidence and per-source status of the
/// last analysis. Empty until an analysis has finished successfully.
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let summary_container = Block::default().borders(Borders::ALL).title("Summary");
    frame.render_widget(summary_container, area);

    let summary_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Score
            Constraint::Length(1), // Gauge
            Constraint::Length(1),
            Constraint::Length(3), // Verdict and confidence
            Constraint::Length(1),
            Constraint::Min(0), // Sources
        ])
        .split(area);

    if !matches!(app.state, AppState::Finished) {
        return;
    }
    let Some(assessment) = app.assessment() else {
        return;
    };

    let score_title = if assessment.authenticity_score.is_some() {
        "Authenticity Score"
    } else {
        "Security Score"
    };
    let score_line = Line::from(format!("{}/100", assessment.score().value()));
    let score_text = Text::from(vec![Line::from(score_title.bold()), score_line]);
    frame.render_widget(Paragraph::new(score_text).alignment(Alignment::Center), summary_chunks[0]);

    let score_gauge = Gauge::default()
        .percent(u16::from(app.displayed_score))
        .label("")
        .style(Style::default().fg(if app.displayed_score >= 80 {
            Color::Green
        } else if app.displayed_score >= 60 {
            Color::Yellow
        } else {
            Color::Red
        }));
    frame.render_widget(score_gauge, summary_chunks[1]);

    let (verdict_text, verdict_style) = match assessment.risk_level {
        RiskLevel::Low => ("LOW RISK", Style::default().fg(Color::Green).bold()),
        RiskLevel::Medium => ("MEDIUM RISK", Style::default().fg(Color::Yellow).bold()),
        RiskLevel::High => ("HIGH RISK", Style::default().fg(Color::Red).bold()),
    };
    let (confidence_text, confidence_style) = match assessment.confidence {
        Confidence::High => ("high", Style::default().fg(Color::Green)),
        Confidence::Partial => ("partial", Style::default().fg(Color::Yellow)),
        Confidence::Low => ("low", Style::default().fg(Color::Red)),
    };
    let verdict = Text::from(vec![
        Line::from(Span::styled(verdict_text, verdict_style)),
        Line::from(vec![Span::raw("Confidence: "), Span::styled(confidence_text, confidence_style)]),
        Line::from(vec![
            Span::styled(assessment.red_flags.len().to_string(), Style::default().fg(Color::Red)),
            Span::raw(" red / "),
            Span::styled(assessment.green_flags.len().to_string(), Style::default().fg(Color::Green)),
            Span::raw(" green"),
        ]),
    ]);
    frame.render_widget(Paragraph::new(verdict).alignment(Alignment::Center), summary_chunks[3]);

    let sources_block = Block::default().title("SOURCES".bold());
    let source_lines: Vec<Line> = assessment
        .sources
        .iter()
        .map(|report| {
            let (icon, style, note) = match &report.status {
                SourceStatus::Ok => ("✓", Style::default().fg(Color::Green), String::new()),
                SourceStatus::TimedOut { after_ms } => {
                    ("⏱", Style::default().fg(Color::Yellow), format!(" (timed out after {} ms)", after_ms))
                }
                SourceStatus::Failed { .. } => ("✗", Style::default().fg(Color::Red), " (failed)".to_string()),
            };
            Line::from(vec![
                Span::styled(format!("{} ", icon), style),
                Span::raw(report.source),
                Span::styled(note, Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(source_lines).block(sources_block), summary_chunks[5]);
}
