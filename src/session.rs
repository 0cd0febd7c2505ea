//! Session state shared by every render.
//!
//! A session owns the playback settings, the intro cycle's modulation and
//! the bar counter, and renders pitch sets with the current timing.

use crate::audio::{PcmBuffer, Synthesizer, Timing};
use crate::notation::{IntroChord, IntroCycle, PitchSet};
use crate::settings::{PlaybackSettings, SettingsUpdate};

/// Mutable state for one run of the app.
#[derive(Debug, Clone)]
pub struct Session {
    settings: PlaybackSettings,
    intro: IntroCycle,
    synth: Synthesizer,
    /// Chords rendered since the current line began.
    bar: u32,
}

impl Session {
    /// Creates a session with the given settings, intro state and synthesizer.
    pub fn new(settings: PlaybackSettings, intro: IntroCycle, synth: Synthesizer) -> Self {
        Self {
            settings,
            intro,
            synth,
            bar: 0,
        }
    }

    pub fn settings(&self) -> &PlaybackSettings {
        &self.settings
    }

    /// Applies a settings update; blank fields were already dropped by the update.
    pub fn update_settings(&mut self, update: &SettingsUpdate) {
        self.settings.apply(update);
        tracing::info!(
            duration = self.settings.chord_duration,
            arpeggio = self.settings.arpeggio_delay,
            intro = %self.settings.intro_quality,
            "settings updated"
        );
    }

    /// Timing derived from the current settings.
    pub fn timing(&self) -> Timing {
        self.settings.timing()
    }

    /// Renders a pitch set with the current timing.
    pub fn render(&self, pitches: &PitchSet) -> PcmBuffer {
        let buffer = self.synth.render(pitches, self.timing());
        tracing::debug!(
            pitches = ?pitches.pitches(),
            samples = buffer.len(),
            "rendered chord"
        );
        buffer
    }

    /// Resets the bar counter for a new input line.
    pub fn begin_line(&mut self) {
        self.bar = 0;
    }

    /// Counts one more rendered chord and returns its bar number.
    pub fn next_bar(&mut self) -> u32 {
        self.bar += 1;
        self.bar
    }

    /// The last bar number handed out on this line.
    pub fn bar(&self) -> u32 {
        self.bar
    }

    /// Steps the intro cycle using the configured intro quality.
    pub fn next_intro(&mut self) -> IntroChord {
        self.intro.next_chord(self.settings.intro_quality)
    }
}
