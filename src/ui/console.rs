//! Console log and prompt rendering.

use crate::app::{unavailable_message, App, InputMode, LogLine};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

fn log_line(entry: &LogLine) -> Line<'_> {
    match entry {
        LogLine::Info(text) => Line::from(Span::styled(
            text.as_str(),
            Style::default().fg(Color::White),
        )),
        LogLine::Heading(text) => Line::from(Span::styled(
            text.as_str(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        LogLine::Bar(bar) => Line::from(Span::styled(
            format!("Bar {}", bar),
            Style::default().fg(Color::DarkGray),
        )),
        LogLine::Playing(label) => Line::from(vec![
            Span::styled("Now playing: ", Style::default().fg(Color::Green)),
            Span::styled(
                label.as_str(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        LogLine::Unavailable { text, reason } => Line::from(Span::styled(
            unavailable_message(text, reason),
            Style::default().fg(Color::Red),
        )),
        LogLine::Error(text) => Line::from(Span::styled(
            text.as_str(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
    }
}

/// Renders the log, newest lines at the bottom.
pub fn render_log(frame: &mut Frame, area: Rect, app: &App) {
    let title = if app.log_scroll > 0 {
        format!(" Log (+{} below) ", app.log_scroll)
    } else {
        " Log ".to_string()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let height = inner.height as usize;
    let end = app.log.len().saturating_sub(app.log_scroll);
    let start = end.saturating_sub(height);
    let lines: Vec<Line> = app.log[start..end].iter().map(log_line).collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Renders the current question and the input line with a cursor.
pub fn render_prompt(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.mode != InputMode::Settings && !app.show_help;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::Gray }));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut input = vec![
        Span::styled("> ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.input.as_str(),
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
        Line::from(Span::styled(app.prompt(), Style::default().fg(Color::Cyan))),
        Line::from(input),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
