//! The intro cycle: one chord quality walked around the circle of fourths.

use super::{pitch_class_name, ChordQuality, Pitch, PitchSet, MIDDLE_C};
use rand::Rng;

/// Lowest root the intro can land on (F#3); roots span one octave above it.
const INTRO_BASE: Pitch = MIDDLE_C - 6;

/// Semitones the root moves down on each step (a fifth down = a fourth up).
const STEP_DOWN: i32 = 7;

/// Offset added to the random start before the first step.
const START_OFFSET: i32 = 5;

/// Advances the modulation one step and voices `quality` on the new root.
///
/// Pure: the caller owns the modulation state. The returned modulation is
/// always in 0..12, whatever the input.
pub fn advance(modulation: i32, quality: ChordQuality) -> (i32, PitchSet) {
    let next = (modulation - STEP_DOWN).rem_euclid(12);
    let chord = PitchSet::from_offsets(INTRO_BASE + next, quality.intervals());
    (next, chord)
}

/// One chord produced by the intro cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntroChord {
    pub quality: ChordQuality,
    pub pitches: PitchSet,
}

impl IntroChord {
    /// Display name such as `Eb min7no5add2`.
    pub fn name(&self) -> String {
        format!("{} {}", pitch_class_name(self.pitches.first()), self.quality)
    }
}

/// Modulation state for the intro, kept for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntroCycle {
    modulation: i32,
}

impl IntroCycle {
    /// Starts the cycle at a random root.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self::with_start(rng.gen_range(0..12))
    }

    /// Starts the cycle from a fixed modulation in 0..12.
    pub fn with_start(start: i32) -> Self {
        Self {
            modulation: start.rem_euclid(12) + START_OFFSET,
        }
    }

    /// Current modulation state.
    pub fn modulation(&self) -> i32 {
        self.modulation
    }

    /// Steps the cycle and returns the next intro chord.
    pub fn next_chord(&mut self, quality: ChordQuality) -> IntroChord {
        let (modulation, pitches) = advance(self.modulation, quality);
        self.modulation = modulation;
        IntroChord { quality, pitches }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_first_roots_follow_fourths() {
        let mut cycle = IntroCycle::with_start(0);
        let roots: Vec<&str> = (0..3)
            .map(|_| pitch_class_name(cycle.next_chord(ChordQuality::Major).pitches.first()))
            .collect();
        assert_eq!(roots, vec!["E", "A", "D"]);
    }

    #[test]
    fn test_voicing_uses_configured_quality() {
        let mut cycle = IntroCycle::with_start(0);
        let chord = cycle.next_chord(ChordQuality::Minor7No5Add2);
        assert_eq!(chord.pitches.pitches(), &[64, 66, 67, 74]);
        assert_eq!(chord.name(), "E min7no5add2");
    }

    #[test]
    fn test_twelve_steps_cover_every_root() {
        let mut cycle = IntroCycle::with_start(7);
        let first = cycle.next_chord(ChordQuality::Fifth);
        let mut classes = HashSet::new();
        classes.insert(first.pitches.first().rem_euclid(12));
        for _ in 0..11 {
            let chord = cycle.next_chord(ChordQuality::Fifth);
            classes.insert(chord.pitches.first().rem_euclid(12));
        }
        assert_eq!(classes.len(), 12);

        let thirteenth = cycle.next_chord(ChordQuality::Fifth);
        assert_eq!(thirteenth, first);
    }

    #[test]
    fn test_roots_stay_within_one_octave() {
        for start in 0..12 {
            let mut cycle = IntroCycle::with_start(start);
            for _ in 0..24 {
                let root = cycle.next_chord(ChordQuality::Major).pitches.first();
                assert!((INTRO_BASE..INTRO_BASE + 12).contains(&root));
                assert!((0..12).contains(&cycle.modulation()));
            }
        }
    }

    #[test]
    fn test_advance_is_pure() {
        let (a, chord_a) = advance(3, ChordQuality::Minor);
        let (b, chord_b) = advance(3, ChordQuality::Minor);
        assert_eq!(a, 8);
        assert_eq!(a, b);
        assert_eq!(chord_a, chord_b);
        assert_eq!(chord_a.pitches(), &[62, 65, 69]);
    }

    #[test]
    fn test_advance_wraps_any_modulation() {
        assert_eq!(advance(30, ChordQuality::Major).0, 11);
        assert_eq!(advance(-20, ChordQuality::Major).0, 9);
        for modulation in -40..40 {
            let (next, chord) = advance(modulation, ChordQuality::Major);
            assert!((0..12).contains(&next), "{} -> {}", modulation, next);
            assert!((INTRO_BASE..INTRO_BASE + 12).contains(&chord.first()));
        }
    }

    #[test]
    fn test_seeded_start_is_reproducible() {
        let a = IntroCycle::new(&mut StdRng::seed_from_u64(42));
        let b = IntroCycle::new(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert!((START_OFFSET..START_OFFSET + 12).contains(&a.modulation()));
    }
}
