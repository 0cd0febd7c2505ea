//! Settings dialog overlay.

use crate::app::{App, SETTINGS_FIELD_LABELS};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;

/// Renders the settings dialog overlay.
///
/// Each field shows its current value beside the label; a blank answer keeps
/// that value.
pub fn render_settings_dialog(frame: &mut Frame, app: &App) {
    let dialog = &app.settings_dialog;
    if !dialog.open {
        return;
    }

    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Settings ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Hint
            Constraint::Length(1), // Spacer
            Constraint::Length(2), // Duration
            Constraint::Length(2), // Arpeggio
            Constraint::Length(2), // Intro
            Constraint::Length(1), // Error
            Constraint::Min(1),    // Instructions
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "(Hit enter to leave a setting unchanged)",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
        chunks[0],
    );

    let settings = app.session.settings();
    let current = [
        settings.chord_duration.to_string(),
        settings.arpeggio_delay.to_string(),
        settings.intro_quality.to_string(),
    ];

    for (i, chunk) in chunks[2..5].iter().enumerate() {
        let focused = i == dialog.focused;
        let label_style = if focused {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut input = vec![
            Span::styled(if focused { "> " } else { "  " }, label_style),
            Span::styled(
                dialog.fields[i].as_str(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if focused {
            input.push(Span::styled(
                "_",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::RAPID_BLINK),
            ));
        }

        let lines = vec![
            Line::from(vec![
                Span::styled(SETTINGS_FIELD_LABELS[i], label_style),
                Span::styled(
                    format!(" [{}]", current[i]),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(input),
        ];
        frame.render_widget(Paragraph::new(lines), *chunk);
    }

    if let Some(error) = &dialog.error {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[5],
        );
    }

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
            Span::styled(" Next field  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
            Span::styled(" Apply  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::styled(" Cancel", Style::default().fg(Color::DarkGray)),
        ])),
        chunks[6],
    );
}
