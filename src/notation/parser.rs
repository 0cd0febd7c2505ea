//! Parser for chord lines.
//!
//! Format:
//! `<expr>, <expr>, ...` where each expression is played as one event.
//!
//! Expressions:
//! - Sub-chords joined by periods sound together: `C maj.G5`
//! - A sub-chord is a note spec and an optional chord type: `Db min7`, `E`
//!
//! Examples:
//! - `D maj` plays a D major chord
//! - `C maj, C min` plays the first chord, then the second
//! - `C.E.G` plays three notes together

use super::{ChordQuality, NoteSpec, ParseError, PitchSet};

/// A resolved chord expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    /// The expression as typed, trimmed.
    pub text: String,
    /// Pitches in arrival order.
    pub pitches: PitchSet,
}

/// Offsets for a bare note written without a chord type.
const SINGLE_NOTE: &[i32] = &[0];

/// Parses one sub-chord token: `<note> [<quality>]`.
pub fn parse_sub_chord(token: &str) -> Result<PitchSet, ParseError> {
    let mut fields = token.split_whitespace();
    let note: NoteSpec = fields.next().ok_or(ParseError::MissingNote)?.parse()?;

    let offsets = match fields.next() {
        Some(quality) => quality.parse::<ChordQuality>()?.intervals(),
        None => SINGLE_NOTE,
    };

    if let Some(extra) = fields.next() {
        return Err(ParseError::UnexpectedField(extra.to_string()));
    }

    Ok(PitchSet::from_offsets(note.pitch(), offsets))
}

/// Parses a period-joined chord expression into one combined pitch set.
///
/// The first failing sub-chord aborts the whole expression.
pub fn parse_chord_expression(expression: &str) -> Result<PitchSet, ParseError> {
    let mut tokens = expression.split('.');
    let first = parse_sub_chord(tokens.next().unwrap_or_default())?;

    tokens.try_fold(first, |mut combined, token| {
        combined.append(parse_sub_chord(token)?);
        Ok(combined)
    })
}

/// Parses a full line, one `(group text, outcome)` pair per comma-separated group.
///
/// Groups are resolved independently: a bad group does not affect its
/// neighbours. Blank groups (from stray commas) are skipped. The text is the
/// group as typed, trimmed.
pub fn parse_line(line: &str) -> Vec<(String, Result<PitchSet, ParseError>)> {
    line.split(',')
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(|group| (group.to_string(), parse_chord_expression(group)))
        .collect()
}

/// Parses a full line, failing on the first bad group.
pub fn parse_progression(line: &str) -> Result<Vec<Chord>, ParseError> {
    parse_line(line)
        .into_iter()
        .map(|(text, outcome)| outcome.map(|pitches| Chord { text, pitches }))
        .collect()
}

/// Voices every chord quality, in catalogue order, on one root note.
pub fn catalogue(root: &str) -> Result<Vec<Chord>, ParseError> {
    let root = root.trim();
    let note: NoteSpec = root.parse()?;

    Ok(ChordQuality::ALL
        .into_iter()
        .map(|quality| Chord {
            text: format!("{} {}", root, quality),
            pitches: PitchSet::from_offsets(note.pitch(), quality.intervals()),
        })
        .collect())
}
