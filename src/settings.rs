//! Playback settings and the settings-update contract.
//!
//! Updates come from three free-text answers. A blank answer leaves its
//! setting untouched; any answer that does not parse rejects the whole
//! update so settings are never half-applied.

use crate::audio::Timing;
use crate::notation::ChordQuality;
use thiserror::Error;

/// Default chord length in seconds (sixteen arpeggio steps).
pub const DEFAULT_CHORD_DURATION: f64 = 0.22 * 16.0;

/// Longest chord a settings answer may ask for, in seconds.
pub const MAX_CHORD_DURATION: f64 = 60.0;

/// Default gap between note onsets in seconds.
pub const DEFAULT_ARPEGGIO_DELAY: f64 = 0.22;

/// Default quality for the intro cycle.
pub const DEFAULT_INTRO_QUALITY: ChordQuality = ChordQuality::Minor7No5Add2;

/// Settings read by every render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSettings {
    /// Length of each chord in seconds.
    pub chord_duration: f64,
    /// Gap between successive note onsets in seconds (0 for none).
    pub arpeggio_delay: f64,
    /// Quality played by the intro cycle.
    pub intro_quality: ChordQuality,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            chord_duration: DEFAULT_CHORD_DURATION,
            arpeggio_delay: DEFAULT_ARPEGGIO_DELAY,
            intro_quality: DEFAULT_INTRO_QUALITY,
        }
    }
}

impl PlaybackSettings {
    /// Timing for the synthesizer.
    pub fn timing(&self) -> Timing {
        Timing {
            duration_secs: self.chord_duration,
            arpeggio_delay_secs: self.arpeggio_delay,
        }
    }

    /// Applies an update. Fields left as `None` keep their current value.
    pub fn apply(&mut self, update: &SettingsUpdate) {
        if let Some(duration) = update.chord_duration {
            self.chord_duration = duration;
        }
        if let Some(delay) = update.arpeggio_delay {
            self.arpeggio_delay = delay;
        }
        if let Some(quality) = update.intro_quality {
            self.intro_quality = quality;
        }
    }
}

/// Errors from a settings update.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("chord duration must be a positive number of seconds up to 60, got '{0}'")]
    InvalidDuration(String),

    #[error("arpeggio duration must be zero or a positive number of seconds, got '{0}'")]
    InvalidDelay(String),

    #[error("unknown intro chord '{0}'")]
    UnknownIntroQuality(String),
}

/// A validated, possibly partial, change to [`PlaybackSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SettingsUpdate {
    pub chord_duration: Option<f64>,
    pub arpeggio_delay: Option<f64>,
    pub intro_quality: Option<ChordQuality>,
}

/// Returns `None` for whitespace-only input.
fn non_blank(field: &str) -> Option<&str> {
    let field = field.trim();
    (!field.is_empty()).then_some(field)
}

impl SettingsUpdate {
    /// Builds an update from raw prompt answers.
    ///
    /// Blank answers become `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chordline::settings::{PlaybackSettings, SettingsUpdate};
    ///
    /// let mut settings = PlaybackSettings::default();
    /// let update = SettingsUpdate::from_fields("2", "", "").unwrap();
    /// settings.apply(&update);
    /// assert_eq!(settings.chord_duration, 2.0);
    /// assert_eq!(settings.arpeggio_delay, 0.22);
    /// ```
    pub fn from_fields(
        chord_duration: &str,
        arpeggio_delay: &str,
        intro_quality: &str,
    ) -> Result<Self, SettingsError> {
        let chord_duration = non_blank(chord_duration)
            .map(|text| match text.parse::<f64>() {
                Ok(secs) if secs > 0.0 && secs <= MAX_CHORD_DURATION => Ok(secs),
                _ => Err(SettingsError::InvalidDuration(text.to_string())),
            })
            .transpose()?;

        let arpeggio_delay = non_blank(arpeggio_delay)
            .map(|text| match text.parse::<f64>() {
                Ok(secs) if secs.is_finite() && secs >= 0.0 => Ok(secs),
                _ => Err(SettingsError::InvalidDelay(text.to_string())),
            })
            .transpose()?;

        let intro_quality = non_blank(intro_quality)
            .map(|text| {
                text.parse::<ChordQuality>()
                    .map_err(|_| SettingsError::UnknownIntroQuality(text.to_string()))
            })
            .transpose()?;

        Ok(Self {
            chord_duration,
            arpeggio_delay,
            intro_quality,
        })
    }

    /// True when the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.chord_duration.is_none() && self.arpeggio_delay.is_none() && self.intro_quality.is_none()
    }
}
