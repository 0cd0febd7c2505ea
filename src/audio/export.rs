//! WAV export of rendered chords.

use crate::audio::synth::PcmBuffer;
use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;

/// Writes a buffer as a mono 16-bit PCM WAV file, replacing any existing file.
///
/// # Errors
///
/// Returns error if the file cannot be created or written.
pub fn write_wav<P: AsRef<Path>>(path: P, buffer: &PcmBuffer) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path.as_ref(), spec).with_context(|| {
        format!(
            "Failed to create output WAV file: {}",
            path.as_ref().display()
        )
    })?;

    for &sample in buffer.samples() {
        writer.write_sample(sample)?;
    }

    writer.finalize().context("Failed to finalize WAV file")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::synth::{Synthesizer, Timing, SAMPLE_RATE};
    use crate::notation::parse_chord_expression;

    #[test]
    fn test_write_wav_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("silence.wav");
        write_wav(&path, &PcmBuffer::new(vec![0; 100], SAMPLE_RATE)).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, SAMPLE_RATE);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, SampleFormat::Int);
        assert_eq!(reader.len(), 100);
    }

    #[test]
    fn test_write_wav_rendered_chord() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chord.wav");
        let chord = parse_chord_expression("C maj").unwrap();
        let buffer = Synthesizer::default().render(
            &chord,
            Timing {
                duration_secs: 0.05,
                arpeggio_delay_secs: 0.01,
            },
        );
        write_wav(&path, &buffer).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, buffer.samples());
    }

    #[test]
    fn test_write_wav_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.wav");
        let err = write_wav(&path, &PcmBuffer::new(vec![0; 10], SAMPLE_RATE)).unwrap_err();
        assert!(err.to_string().contains("Failed to create output WAV file"));
    }
}
