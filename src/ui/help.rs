//! Help overlay rendering.
//!
//! Displays commands, notation examples and key bindings in a modal overlay.

use crate::notation::ChordQuality;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::centered_rect;

/// One row of the help display.
struct HelpEntry {
    key: &'static str,
    description: &'static str,
}

const COMMANDS: &[HelpEntry] = &[
    HelpEntry {
        key: "q",
        description: "Quit",
    },
    HelpEntry {
        key: "s",
        description: "Change chord duration, arpeggio duration and intro chord",
    },
    HelpEntry {
        key: "cat",
        description: "List every chord type with its intervals",
    },
    HelpEntry {
        key: "play cat",
        description: "Play every chord type on a root note",
    },
    HelpEntry {
        key: "r",
        description: "Repeat the intro, walking the cycle of 4ths",
    },
    HelpEntry {
        key: "h",
        description: "Show this help",
    },
];

const NOTATION: &[HelpEntry] = &[
    HelpEntry {
        key: "D maj",
        description: "A D major chord",
    },
    HelpEntry {
        key: "Eb5 min7",
        description: "Note, optional #/b, optional octave 0-8 (default 4)",
    },
    HelpEntry {
        key: "A",
        description: "A single note",
    },
    HelpEntry {
        key: "C maj, C min",
        description: "Commas play chords one after another",
    },
    HelpEntry {
        key: "C.E.G",
        description: "Periods stack notes or chords into one",
    },
    HelpEntry {
        key: "C2.C maj",
        description: "Add a bass note under a chord",
    },
];

const KEYS: &[HelpEntry] = &[
    HelpEntry {
        key: "Enter",
        description: "Submit the line",
    },
    HelpEntry {
        key: "Esc",
        description: "Cancel prompt, dialog or help",
    },
    HelpEntry {
        key: "F1",
        description: "Toggle this help",
    },
    HelpEntry {
        key: "PgUp / PgDn",
        description: "Scroll the log",
    },
    HelpEntry {
        key: "Tab / Up / Down",
        description: "Move between settings fields",
    },
    HelpEntry {
        key: "Ctrl+C",
        description: "Force quit",
    },
];

/// Renders the help overlay.
pub fn render_help(frame: &mut Frame, scroll: u16) {
    let area = centered_rect(70, 80, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Scrollable content
            Constraint::Length(1), // Fixed footer
        ])
        .split(inner);

    let mut lines: Vec<Line<'static>> = Vec::new();

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Color::White);

    let mut add_section = |title: &'static str, entries: &[HelpEntry]| {
        lines.push(Line::from(Span::styled(title, section_style)));
        for entry in entries {
            lines.push(Line::from(vec![
                Span::styled(format!("{:16}", entry.key), key_style),
                Span::styled(entry.description, desc_style),
            ]));
        }
        lines.push(Line::from(""));
    };

    add_section("Commands", COMMANDS);
    add_section("Notation", NOTATION);
    add_section("Keys", KEYS);

    lines.push(Line::from(Span::styled("Chord types", section_style)));
    let names = ChordQuality::ALL
        .iter()
        .map(|q| q.name())
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(Line::from(Span::styled(names, desc_style)));

    let help_text = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(help_text, chunks[0]);

    let footer = Paragraph::new(Line::from(Span::styled(
        "Scroll: Up/Down  |  Close: F1/Esc",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));
    frame.render_widget(footer, chunks[1]);
}
