//! Transport bar rendering.
//!
//! Displays the playing chord, bar number, chord timing, intro chord and
//! where audio is going.

use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Renders the transport bar at the top of the screen.
pub fn render_transport(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" chordline ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(36), // Now playing
            Constraint::Length(8),  // Bar
            Constraint::Length(12), // Duration
            Constraint::Length(12), // Arpeggio
            Constraint::Length(20), // Intro
            Constraint::Min(10),    // Output / status
        ])
        .split(inner);

    let play_status = match (app.now_playing(), app.now_playing_notes()) {
        (Some(label), Some(notes)) => Line::from(vec![
            Span::styled(
                format!(" [>] {} ", label),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(notes, Style::default().fg(Color::DarkGray)),
        ]),
        _ => Line::from(Span::styled(
            " [.] READY",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        )),
    };
    frame.render_widget(Paragraph::new(play_status), chunks[0]);

    let settings = app.session.settings();
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let fields = [
        ("Bar: ", app.session.bar().to_string()),
        ("Dur: ", format!("{:.2}s", settings.chord_duration)),
        ("Arp: ", format!("{:.2}s", settings.arpeggio_delay)),
        ("Intro: ", settings.intro_quality.to_string()),
    ];
    for ((name, text), chunk) in fields.into_iter().zip(&chunks[1..5]) {
        let widget = Paragraph::new(Line::from(vec![
            Span::styled(name, label),
            Span::styled(text, value),
        ]));
        frame.render_widget(widget, *chunk);
    }

    // Status message takes the place of the output device while shown
    let status_line = if let Some((msg, _)) = &app.status_message {
        Line::from(Span::styled(
            msg.as_str(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(vec![
            Span::styled("Out: ", label),
            Span::styled(app.output_label(), value),
        ])
    };
    frame.render_widget(Paragraph::new(status_line), chunks[5]);
}
