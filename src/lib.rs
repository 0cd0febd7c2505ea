//! chordline - A terminal chord player.
//!
//! This library provides the core functionality for the chord player:
//! the notation parser, the sine synthesizer, session state and the
//! terminal interface.

pub mod app;
pub mod audio;
pub mod notation;
pub mod session;
pub mod settings;
pub mod ui;

// Re-export commonly used types
pub use app::{App, InputMode, LogLine};
pub use audio::{AudioEngine, PcmBuffer, Playback, Synthesizer, Timing};
pub use notation::{parse_chord_expression, parse_line, Chord, ChordQuality, ParseError, PitchSet};
pub use session::Session;
pub use settings::{PlaybackSettings, SettingsError, SettingsUpdate};
