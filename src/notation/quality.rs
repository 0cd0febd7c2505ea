//! The chord quality table.

use super::{ParseError, Pitch};
use std::fmt;
use std::str::FromStr;

/// A named chord shape, voiced as semitone offsets from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    // Triads and other shapes within an augmented fifth
    Major,
    Minor,
    Fifth,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    MajorFlat5,
    Flat2,
    Sus24,

    // Sevenths and extensions
    Major7,
    Dominant7,
    Minor7,
    Minor7Flat5,
    Major7Flat5,
    MinorMajor7,
    Major9,
    Minor9,
    Diminished7,
    Dominant7Flat9,
    Major7No5Add2,
    Minor7No5Add2,
    MinorMajor7No5Add2,
    Dominant7No5Add2,
    Dominant9,
    Major6,
    Minor6,
    Major11,
}

impl ChordQuality {
    /// Every quality, in catalogue order.
    pub const ALL: [ChordQuality; 28] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Fifth,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::Sus2,
        ChordQuality::Sus4,
        ChordQuality::MajorFlat5,
        ChordQuality::Flat2,
        ChordQuality::Sus24,
        ChordQuality::Major7,
        ChordQuality::Dominant7,
        ChordQuality::Minor7,
        ChordQuality::Minor7Flat5,
        ChordQuality::Major7Flat5,
        ChordQuality::MinorMajor7,
        ChordQuality::Major9,
        ChordQuality::Minor9,
        ChordQuality::Diminished7,
        ChordQuality::Dominant7Flat9,
        ChordQuality::Major7No5Add2,
        ChordQuality::Minor7No5Add2,
        ChordQuality::MinorMajor7No5Add2,
        ChordQuality::Dominant7No5Add2,
        ChordQuality::Dominant9,
        ChordQuality::Major6,
        ChordQuality::Minor6,
        ChordQuality::Major11,
    ];

    /// The name typed after the note, e.g. `min7`.
    pub fn name(self) -> &'static str {
        match self {
            ChordQuality::Major => "maj",
            ChordQuality::Minor => "min",
            ChordQuality::Fifth => "fifth",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::MajorFlat5 => "majb5",
            ChordQuality::Flat2 => "b2",
            ChordQuality::Sus24 => "sus24",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Minor7 => "min7",
            ChordQuality::Minor7Flat5 => "min7b5",
            ChordQuality::Major7Flat5 => "maj7b5",
            ChordQuality::MinorMajor7 => "minmaj",
            ChordQuality::Major9 => "maj9",
            ChordQuality::Minor9 => "min9",
            ChordQuality::Diminished7 => "dim7",
            ChordQuality::Dominant7Flat9 => "7b9",
            ChordQuality::Major7No5Add2 => "maj7no5add2",
            ChordQuality::Minor7No5Add2 => "min7no5add2",
            ChordQuality::MinorMajor7No5Add2 => "minmajno5add2",
            ChordQuality::Dominant7No5Add2 => "7no5add2",
            ChordQuality::Dominant9 => "9",
            ChordQuality::Major6 => "6",
            ChordQuality::Minor6 => "min6",
            ChordQuality::Major11 => "maj11",
        }
    }

    /// Semitone offsets from the root, ascending and starting at 0.
    pub fn intervals(self) -> &'static [Pitch] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Fifth => &[0, 7],
            ChordQuality::Diminished => &[0, 3, 6],
            ChordQuality::Augmented => &[0, 4, 8],
            ChordQuality::Sus2 => &[0, 2, 7],
            ChordQuality::Sus4 => &[0, 5, 7],
            ChordQuality::MajorFlat5 => &[0, 4, 6],
            ChordQuality::Flat2 => &[0, 1, 7],
            ChordQuality::Sus24 => &[0, 2, 5, 7],
            ChordQuality::Major7 => &[0, 4, 7, 11],
            ChordQuality::Dominant7 => &[0, 4, 7, 10],
            ChordQuality::Minor7 => &[0, 3, 7, 10],
            ChordQuality::Minor7Flat5 => &[0, 3, 6, 10],
            ChordQuality::Major7Flat5 => &[0, 4, 6, 11],
            ChordQuality::MinorMajor7 => &[0, 3, 7, 11],
            ChordQuality::Major9 => &[0, 4, 7, 11, 14],
            ChordQuality::Minor9 => &[0, 3, 7, 10, 14],
            ChordQuality::Diminished7 => &[0, 3, 6, 9],
            ChordQuality::Dominant7Flat9 => &[0, 4, 7, 10, 13],
            ChordQuality::Major7No5Add2 => &[0, 2, 4, 11],
            ChordQuality::Minor7No5Add2 => &[0, 2, 3, 10],
            ChordQuality::MinorMajor7No5Add2 => &[0, 2, 3, 11],
            ChordQuality::Dominant7No5Add2 => &[0, 2, 4, 10],
            ChordQuality::Dominant9 => &[0, 4, 7, 10, 14],
            ChordQuality::Major6 => &[0, 4, 7, 9],
            ChordQuality::Minor6 => &[0, 3, 7, 9],
            ChordQuality::Major11 => &[0, 4, 7, 11, 14, 18],
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChordQuality {
    type Err = ParseError;

    /// Looks a quality up by name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ChordQuality::ALL
            .into_iter()
            .find(|quality| quality.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownQuality(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_order() {
        let names: Vec<&str> = ChordQuality::ALL.iter().map(|q| q.name()).collect();
        assert_eq!(names.len(), 28);
        assert_eq!(&names[..5], &["maj", "min", "fifth", "dim", "aug"]);
        assert_eq!(names[10], "maj7");
        assert_eq!(names[11], "7");
        assert_eq!(names[27], "maj11");
    }

    #[test]
    fn test_names_are_unique() {
        for (i, a) in ChordQuality::ALL.iter().enumerate() {
            for b in &ChordQuality::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[test]
    fn test_intervals_start_at_root_and_ascend() {
        for quality in ChordQuality::ALL {
            let intervals = quality.intervals();
            assert_eq!(intervals[0], 0, "{}", quality);
            assert!(
                intervals.windows(2).all(|w| w[0] < w[1]),
                "{} not ascending",
                quality
            );
        }
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!("maj".parse(), Ok(ChordQuality::Major));
        assert_eq!("MIN7".parse(), Ok(ChordQuality::Minor7));
        assert_eq!("Min7B5".parse(), Ok(ChordQuality::Minor7Flat5));
        assert_eq!("7".parse(), Ok(ChordQuality::Dominant7));
        assert_eq!(" sus4 ".parse(), Ok(ChordQuality::Sus4));
    }

    #[test]
    fn test_unknown_quality() {
        assert_eq!(
            "xyz".parse::<ChordQuality>(),
            Err(ParseError::UnknownQuality("xyz".to_string()))
        );
        assert!("major".parse::<ChordQuality>().is_err());
    }

    #[test]
    fn test_display_round_trips_name() {
        for quality in ChordQuality::ALL {
            assert_eq!(quality.to_string().parse(), Ok(quality));
        }
    }
}
