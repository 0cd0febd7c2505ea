//! Terminal user interface components.
//!
//! This module provides the visual components for the chord player:
//! the transport bar, the console log with its prompt, the settings
//! dialog and the help overlay.

mod console;
mod dialogs;
mod help;
mod transport;

use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

pub use console::{render_log, render_prompt};
pub use dialogs::render_settings_dialog;
pub use help::render_help;
pub use transport::render_transport;

/// Renders the complete UI.
///
/// The layout is divided into:
/// - Top: Transport bar with playback state and current settings
/// - Center: Log of played chords and messages
/// - Bottom: Prompt and input line
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Transport
            Constraint::Min(5),    // Log
            Constraint::Length(4), // Prompt
        ])
        .split(frame.area());

    render_transport(frame, chunks[0], app);
    render_log(frame, chunks[1], app);
    render_prompt(frame, chunks[2], app);

    // Overlays last so they draw on top
    render_settings_dialog(frame, app);
    if app.show_help {
        render_help(frame, app.help_scroll);
    }
}

/// Helper function to center a rectangle within another rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{Playback, Synthesizer};
    use crate::notation::IntroCycle;
    use crate::session::Session;
    use crate::settings::PlaybackSettings;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app() -> App {
        let session = Session::new(
            PlaybackSettings::default(),
            IntroCycle::with_start(0),
            Synthesizer::default(),
        );
        App::new(session, Playback::offline())
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let rect = centered_rect(50, 50, area);
        assert_eq!(rect.width, 50);
        assert_eq!(rect.height, 25);
        assert_eq!(rect.x, 25);
    }

    #[test]
    fn test_render_main_screen() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Welcome to chordline!"));
        assert!(text.contains("What note(s) or chord(s) would you like to play?"));
        assert!(text.contains("min7no5add2"));
    }

    #[test]
    fn test_render_shows_notes_of_playing_chord() {
        let mut app = app();
        app.queue_line("C maj");
        app.step(); // begin line
        app.step(); // render
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("[>] C maj"));
        assert!(text.contains("C4 E4 G4"));
    }

    #[test]
    fn test_render_settings_dialog() {
        let mut app = app();
        app.open_settings();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Settings"));
        assert!(text.contains("Hit enter to leave a setting unchanged"));
    }

    #[test]
    fn test_render_help_overlay() {
        let mut app = app();
        app.show_help = true;
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Commands"));
        assert!(text.contains("play cat"));
    }
}
