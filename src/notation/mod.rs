//! Chord notation: the note/quality lexicon, the line parser and the intro cycle.
//!
//! A line such as `"C maj, D min7.A5"` resolves into one [`Chord`] per
//! comma-separated group. Each chord carries a [`PitchSet`] of integer
//! pitches (60 = middle C) ready for the synthesizer.

mod intro;
mod note;
mod parser;
mod quality;

pub use intro::{advance, IntroChord, IntroCycle};
pub use note::{Accidental, NoteLetter, NoteSpec, Octave, DEFAULT_OCTAVE};
pub use parser::{
    catalogue, parse_chord_expression, parse_line, parse_progression, parse_sub_chord, Chord,
};
pub use quality::ChordQuality;

use thiserror::Error;

/// Integer semitone index. 60 = middle C (C4), 69 = A4.
pub type Pitch = i32;

/// Pitch of middle C.
pub const MIDDLE_C: Pitch = 60;

/// Pitch of the A above middle C (440 Hz).
pub const CONCERT_A: Pitch = 69;

/// Message shown whenever a chord expression cannot be resolved.
pub const CHORD_UNAVAILABLE: &str = "Chord unavailable. Try again.";

/// Display names for the twelve pitch classes, starting at C.
pub const PITCH_CLASS_NAMES: [&str; 12] = [
    "C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
];

/// Returns the pitch-class name of a pitch, ignoring its octave.
pub fn pitch_class_name(pitch: Pitch) -> &'static str {
    PITCH_CLASS_NAMES[pitch.rem_euclid(12) as usize]
}

/// Converts a pitch to a name with octave.
///
/// # Examples
///
/// ```
/// use chordline::notation::pitch_to_name;
///
/// assert_eq!(pitch_to_name(60), "C4");
/// assert_eq!(pitch_to_name(70), "Bb4");
/// ```
pub fn pitch_to_name(pitch: Pitch) -> String {
    let octave = pitch.div_euclid(12) - 1;
    format!("{}{}", pitch_class_name(pitch), octave)
}

/// Errors produced while resolving chord notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The note spec does not start with a letter A-G.
    #[error("unknown note '{0}'")]
    UnknownNote(String),

    /// The text after the note letter is not an accidental and/or octave digit 0-8.
    #[error("malformed note '{0}'")]
    MalformedNote(String),

    /// The quality spec is not in the chord table.
    #[error("unknown chord type '{0}'")]
    UnknownQuality(String),

    /// A sub-chord token was empty.
    #[error("missing note")]
    MissingNote,

    /// A sub-chord token had more than a note and a quality.
    #[error("unexpected '{0}' after chord type")]
    UnexpectedField(String),
}

/// An ordered, non-empty set of pitches sounded as one event.
///
/// Order is arrival order: it decides arpeggio onsets, not pitch height.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PitchSet {
    pitches: Vec<Pitch>,
}

impl PitchSet {
    /// Creates a pitch set, or `None` if `pitches` is empty.
    pub fn new(pitches: Vec<Pitch>) -> Option<Self> {
        if pitches.is_empty() {
            None
        } else {
            Some(Self { pitches })
        }
    }

    /// Voices a chord shape on a root.
    ///
    /// `offsets` comes from the static chord tables and is never empty.
    pub(crate) fn from_offsets(root: Pitch, offsets: &[Pitch]) -> Self {
        debug_assert!(!offsets.is_empty());
        Self {
            pitches: offsets.iter().map(|offset| root + offset).collect(),
        }
    }

    /// Returns the pitches in arrival order.
    pub fn pitches(&self) -> &[Pitch] {
        &self.pitches
    }

    /// Number of pitches in the set.
    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    /// Always false: a resolved pitch set has at least one pitch.
    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    /// The first pitch to sound.
    pub fn first(&self) -> Pitch {
        self.pitches[0]
    }

    /// Appends another set, keeping arrival order.
    pub fn append(&mut self, mut other: PitchSet) {
        self.pitches.append(&mut other.pitches);
    }

    /// Returns the pitches sorted low to high, for comparing pitch content.
    pub fn sorted(&self) -> Vec<Pitch> {
        let mut sorted = self.pitches.clone();
        sorted.sort_unstable();
        sorted
    }

    /// Human-readable note names, e.g. `C4 E4 G4`.
    pub fn describe(&self) -> String {
        self.pitches
            .iter()
            .map(|&p| pitch_to_name(p))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_to_name() {
        assert_eq!(pitch_to_name(60), "C4");
        assert_eq!(pitch_to_name(69), "A4");
        assert_eq!(pitch_to_name(61), "C#4");
        assert_eq!(pitch_to_name(12), "C0");
        assert_eq!(pitch_to_name(11), "B-1");
        assert_eq!(pitch_to_name(108), "C8");
    }

    #[test]
    fn test_pitch_class_name_wraps_negative() {
        assert_eq!(pitch_class_name(-1), "B");
        assert_eq!(pitch_class_name(-12), "C");
        assert_eq!(pitch_class_name(54), "F#");
    }

    #[test]
    fn test_pitch_set_rejects_empty() {
        assert!(PitchSet::new(vec![]).is_none());
        let set = PitchSet::new(vec![64, 60]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
        assert_eq!(set.first(), 64);
        assert_eq!(set.sorted(), vec![60, 64]);
    }

    #[test]
    fn test_pitch_set_append_keeps_order() {
        let mut set = PitchSet::from_offsets(60, &[0, 4, 7]);
        set.append(PitchSet::from_offsets(55, &[0]));
        assert_eq!(set.pitches(), &[60, 64, 67, 55]);
        assert_eq!(set.describe(), "C4 E4 G4 G3");
    }

    #[test]
    fn test_errors_display_reason() {
        assert_eq!(
            ParseError::UnknownQuality("xyz".to_string()).to_string(),
            "unknown chord type 'xyz'"
        );
        assert_eq!(ParseError::MissingNote.to_string(), "missing note");
    }
}
