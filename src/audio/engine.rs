//! Audio engine for blocking chord playback.
//!
//! Rendered buffers are handed to rodio one at a time; each call blocks
//! until the chord has finished sounding so chords never overlap.

use crate::audio::export::write_wav;
use crate::audio::synth::PcmBuffer;
use anyhow::{Context, Result};
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};
use std::path::{Path, PathBuf};
use std::thread;

/// Owns the default audio output device.
pub struct AudioEngine {
    /// Audio output stream (must be kept alive).
    _stream: OutputStream,
    /// Audio output handle for playback.
    stream_handle: OutputStreamHandle,
}

impl AudioEngine {
    /// Opens the default output device.
    ///
    /// # Errors
    ///
    /// Returns error if no output device can be opened.
    pub fn new() -> Result<Self> {
        let (stream, stream_handle) =
            OutputStream::try_default().context("Failed to open audio output")?;
        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays a mono buffer and blocks until it has finished.
    pub fn play_blocking(&self, buffer: &PcmBuffer) -> Result<()> {
        let sink = Sink::try_new(&self.stream_handle).context("Failed to create audio sink")?;
        sink.append(SamplesBuffer::new(
            1,
            buffer.sample_rate(),
            buffer.samples().to_vec(),
        ));
        sink.sleep_until_end();
        sink.stop();
        Ok(())
    }
}

/// How rendered chords are made audible.
enum Output {
    /// Play through the audio device.
    Device(AudioEngine),
    /// No device; wait out each chord's duration so pacing is unchanged.
    Muted,
    /// No device and no waiting.
    Offline,
}

/// Sends rendered chords to their destination, one at a time.
///
/// `play` takes `&mut self`, so a single `Playback` can never have two
/// chords in flight.
pub struct Playback {
    output: Output,
    wav_path: Option<PathBuf>,
}

impl Playback {
    /// Plays through the given audio engine.
    pub fn device(engine: AudioEngine) -> Self {
        Self {
            output: Output::Device(engine),
            wav_path: None,
        }
    }

    /// Plays nothing but still blocks for each chord's duration.
    pub fn muted() -> Self {
        Self {
            output: Output::Muted,
            wav_path: None,
        }
    }

    /// Plays nothing and returns immediately.
    pub fn offline() -> Self {
        Self {
            output: Output::Offline,
            wav_path: None,
        }
    }

    /// Also writes each chord to a WAV file at `path`, replacing the previous one.
    pub fn with_wav(mut self, path: impl Into<PathBuf>) -> Self {
        self.wav_path = Some(path.into());
        self
    }

    /// Whether chords are played through a device.
    pub fn is_audible(&self) -> bool {
        matches!(self.output, Output::Device(_))
    }

    /// The WAV artifact path, if one is configured.
    pub fn wav_path(&self) -> Option<&Path> {
        self.wav_path.as_deref()
    }

    /// Outputs one chord, blocking until it has finished (except offline).
    pub fn play(&mut self, buffer: &PcmBuffer) -> Result<()> {
        if let Some(path) = &self.wav_path {
            write_wav(path, buffer)?;
        }

        match &self.output {
            Output::Device(engine) => engine.play_blocking(buffer),
            Output::Muted => {
                thread::sleep(buffer.duration());
                Ok(())
            }
            Output::Offline => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::synth::SAMPLE_RATE;

    #[test]
    fn test_offline_playback_writes_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wave.wav");
        let mut playback = Playback::offline().with_wav(&path);
        assert!(!playback.is_audible());
        assert_eq!(playback.wav_path(), Some(path.as_path()));

        playback
            .play(&PcmBuffer::new(vec![1, 2, 3], SAMPLE_RATE))
            .unwrap();
        playback
            .play(&PcmBuffer::new(vec![4, 5], SAMPLE_RATE))
            .unwrap();

        // Each chord replaces the previous artifact
        let mut reader = hound::WavReader::open(&path).unwrap();
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![4, 5]);
    }

    #[test]
    fn test_muted_playback_waits_for_duration() {
        let mut playback = Playback::muted();
        let buffer = PcmBuffer::new(vec![0; 441], SAMPLE_RATE); // 10 ms
        let start = std::time::Instant::now();
        playback.play(&buffer).unwrap();
        assert!(start.elapsed() >= std::time::Duration::from_millis(10));
    }

    #[test]
    #[ignore] // Requires an audio output device
    fn test_device_playback() {
        let engine = AudioEngine::new().unwrap();
        let mut playback = Playback::device(engine);
        let buffer = PcmBuffer::new(vec![0; 4410], SAMPLE_RATE);
        playback.play(&buffer).unwrap();
    }
}
