//! Note specs: letter, accidental and octave.
//!
//! Format: `<letter>[#|b][0-8]`, e.g. `C`, `f#`, `Bb3`, `E5`.
//! The letter is case-insensitive. A lone `b` is the note B; a `b` after a
//! letter is a flat.

use super::{ParseError, Pitch};
use std::fmt;
use std::str::FromStr;

/// Octave used when a note spec has no digit.
pub const DEFAULT_OCTAVE: u8 = 4;

/// The seven natural note letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteLetter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl NoteLetter {
    /// All letters, A to G.
    pub const ALL: [NoteLetter; 7] = [
        NoteLetter::A,
        NoteLetter::B,
        NoteLetter::C,
        NoteLetter::D,
        NoteLetter::E,
        NoteLetter::F,
        NoteLetter::G,
    ];

    /// Parses a letter, ignoring case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(NoteLetter::A),
            'B' => Some(NoteLetter::B),
            'C' => Some(NoteLetter::C),
            'D' => Some(NoteLetter::D),
            'E' => Some(NoteLetter::E),
            'F' => Some(NoteLetter::F),
            'G' => Some(NoteLetter::G),
            _ => None,
        }
    }

    /// Pitch of this letter in octave 4 (C4 = 60).
    pub fn root_pitch(self) -> Pitch {
        match self {
            NoteLetter::C => 60,
            NoteLetter::D => 62,
            NoteLetter::E => 64,
            NoteLetter::F => 65,
            NoteLetter::G => 67,
            NoteLetter::A => 69,
            NoteLetter::B => 71,
        }
    }
}

impl fmt::Display for NoteLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Sharp, flat, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    /// Semitone adjustment applied to the letter's pitch.
    pub fn semitones(self) -> Pitch {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }
}

/// An octave digit in 0..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Octave(u8);

impl Octave {
    /// Creates an octave, or `None` outside 0..=8.
    pub fn new(number: u8) -> Option<Self> {
        (number <= 8).then_some(Self(number))
    }

    /// Semitone offset relative to octave 4 (-48 for octave 0, +48 for octave 8).
    pub fn offset(self) -> Pitch {
        (self.0 as Pitch - DEFAULT_OCTAVE as Pitch) * 12
    }
}

impl Default for Octave {
    fn default() -> Self {
        Self(DEFAULT_OCTAVE)
    }
}

/// A parsed note spec such as `Db5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteSpec {
    pub letter: NoteLetter,
    pub accidental: Accidental,
    /// `None` when no digit was written (octave 4).
    pub octave: Option<Octave>,
}

impl NoteSpec {
    /// Resolves the spec to an absolute pitch.
    ///
    /// # Examples
    ///
    /// ```
    /// use chordline::notation::NoteSpec;
    ///
    /// let note: NoteSpec = "Db".parse().unwrap();
    /// assert_eq!(note.pitch(), 61);
    /// ```
    pub fn pitch(&self) -> Pitch {
        let octave = self.octave.unwrap_or_default();
        self.letter.root_pitch() + self.accidental.semitones() + octave.offset()
    }
}

impl FromStr for NoteSpec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let first = chars.next().ok_or(ParseError::MissingNote)?;
        let letter =
            NoteLetter::from_char(first).ok_or_else(|| ParseError::UnknownNote(s.to_string()))?;

        let rest = chars.as_str();
        let (accidental, rest) = match rest.as_bytes().first() {
            Some(b'#') => (Accidental::Sharp, &rest[1..]),
            Some(b'b') => (Accidental::Flat, &rest[1..]),
            _ => (Accidental::Natural, rest),
        };

        let octave = if rest.is_empty() {
            None
        } else {
            let mut digits = rest.chars();
            match (digits.next(), digits.next()) {
                (Some(c), None) => Some(
                    c.to_digit(10)
                        .and_then(|d| Octave::new(d as u8))
                        .ok_or_else(|| ParseError::MalformedNote(s.to_string()))?,
                ),
                _ => return Err(ParseError::MalformedNote(s.to_string())),
            }
        };

        Ok(NoteSpec {
            letter,
            accidental,
            octave,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitch(s: &str) -> Pitch {
        s.parse::<NoteSpec>().unwrap().pitch()
    }

    #[test]
    fn test_letters_in_octave_four() {
        assert_eq!(pitch("C"), 60);
        assert_eq!(pitch("D"), 62);
        assert_eq!(pitch("E"), 64);
        assert_eq!(pitch("F"), 65);
        assert_eq!(pitch("G"), 67);
        assert_eq!(pitch("A"), 69);
        assert_eq!(pitch("B"), 71);
    }

    #[test]
    fn test_letter_and_digit_for_every_octave() {
        for letter in NoteLetter::ALL {
            for digit in 0..=8u8 {
                let spec = format!("{}{}", letter, digit);
                let expected = letter.root_pitch() + (digit as Pitch - 4) * 12;
                assert_eq!(pitch(&spec), expected, "{}", spec);
            }
        }
    }

    #[test]
    fn test_case_insensitive_letters() {
        assert_eq!(pitch("c"), 60);
        assert_eq!(pitch("g5"), 79);
    }

    #[test]
    fn test_accidentals() {
        assert_eq!(pitch("Db"), 61);
        assert_eq!(pitch("C#"), 61);
        assert_eq!(pitch("Bb"), 70);
        assert_eq!(pitch("bb"), 70);
        assert_eq!(pitch("Cb"), 59);
        assert_eq!(pitch("C#5"), 73);
        assert_eq!(pitch("Eb3"), 51);
    }

    #[test]
    fn test_lone_b_is_the_letter() {
        assert_eq!(pitch("b"), 71);
        assert_eq!(pitch("B"), 71);
        assert_eq!(pitch("b2"), 47);
    }

    #[test]
    fn test_unknown_letter() {
        assert_eq!(
            "Z".parse::<NoteSpec>(),
            Err(ParseError::UnknownNote("Z".to_string()))
        );
        assert!(matches!(
            "H#".parse::<NoteSpec>(),
            Err(ParseError::UnknownNote(_))
        ));
    }

    #[test]
    fn test_malformed_notes() {
        for spec in ["C9", "Cx", "C#44", "C4#", "Cbb", "C-1"] {
            assert_eq!(
                spec.parse::<NoteSpec>(),
                Err(ParseError::MalformedNote(spec.to_string())),
                "{}",
                spec
            );
        }
    }

    #[test]
    fn test_empty_spec() {
        assert_eq!("".parse::<NoteSpec>(), Err(ParseError::MissingNote));
    }

    #[test]
    fn test_octave_bounds() {
        assert!(Octave::new(8).is_some());
        assert!(Octave::new(9).is_none());
        assert_eq!(Octave::new(0).unwrap().offset(), -48);
        assert_eq!(Octave::default().offset(), 0);
    }
}
