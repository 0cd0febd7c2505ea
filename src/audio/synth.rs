//! Additive sine synthesis.
//!
//! Each pitch in a [`PitchSet`] becomes one full-length sine partial. Later
//! pitches start one arpeggio delay after the previous one. Partials are
//! averaged, scaled by the output gain and quantized to 16-bit PCM.

use crate::notation::{Pitch, PitchSet, CONCERT_A};
use rayon::prelude::*;
use std::f64::consts::TAU;
use std::time::Duration;

/// Sample rate for synthesis and playback (44.1 kHz standard).
pub const SAMPLE_RATE: u32 = 44100;

/// Output gain applied before quantization.
pub const DEFAULT_VOLUME: f64 = 0.3;

/// Frequency of A4 in Hz.
const CONCERT_A_HZ: f64 = 440.0;

/// Equal-tempered frequency of a pitch (A4 = 440 Hz).
pub fn frequency(pitch: Pitch) -> f64 {
    CONCERT_A_HZ * 2f64.powf((pitch - CONCERT_A) as f64 / 12.0)
}

/// Converts seconds to a whole number of samples.
fn seconds_to_samples(seconds: f64) -> usize {
    (seconds * SAMPLE_RATE as f64).round().max(0.0) as usize
}

/// How long a chord lasts and how far apart its notes start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// Total length of the rendered chord in seconds.
    pub duration_secs: f64,
    /// Gap between successive note onsets in seconds (0 = all together).
    pub arpeggio_delay_secs: f64,
}

impl Timing {
    /// Number of samples in the rendered buffer.
    pub fn total_samples(&self) -> usize {
        seconds_to_samples(self.duration_secs)
    }

    /// Number of samples between successive onsets.
    pub fn delay_samples(&self) -> usize {
        seconds_to_samples(self.arpeggio_delay_secs)
    }
}

/// A rendered mono 16-bit PCM chord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl PcmBuffer {
    /// Wraps raw samples at the given rate.
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playing time of the buffer.
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }
}

/// One sine partial, silent before `onset`.
fn partial(freq_hz: f64, onset: usize, len: usize) -> Vec<f64> {
    let phase_per_sample = TAU * freq_hz / SAMPLE_RATE as f64;
    (0..len)
        .map(|n| {
            if n < onset {
                0.0
            } else {
                (phase_per_sample * n as f64).sin()
            }
        })
        .collect()
}

/// Mixes the partials of a pitch set before gain and quantization.
///
/// The result is the sample-wise mean of the partials, so it stays within
/// [-1, 1] regardless of how many pitches the set holds. Partials are
/// generated in parallel and summed in arrival order, which keeps the output
/// identical from run to run.
pub fn mix(pitches: &PitchSet, timing: Timing) -> Vec<f64> {
    let len = timing.total_samples();
    let delay = timing.delay_samples();

    let partials: Vec<Vec<f64>> = pitches
        .pitches()
        .par_iter()
        .enumerate()
        .map(|(i, &pitch)| partial(frequency(pitch), i.saturating_mul(delay), len))
        .collect();

    let mut mixed = vec![0.0; len];
    for part in &partials {
        for (out, sample) in mixed.iter_mut().zip(part) {
            *out += sample;
        }
    }

    let count = pitches.len() as f64;
    for out in &mut mixed {
        *out /= count;
    }
    mixed
}

/// Scales a mixed sample by `volume` and converts it to 16-bit PCM.
///
/// Truncates toward zero; values beyond full scale saturate.
pub fn quantize(sample: f64, volume: f64) -> i16 {
    (sample * volume * i16::MAX as f64) as i16
}

/// Renders pitch sets into PCM buffers at a fixed output gain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Synthesizer {
    volume: f64,
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

impl Synthesizer {
    /// Creates a synthesizer with the given output gain (clamped to 0..=1).
    pub fn new(volume: f64) -> Self {
        Self {
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Renders a pitch set to a buffer of `timing.total_samples()` samples.
    pub fn render(&self, pitches: &PitchSet, timing: Timing) -> PcmBuffer {
        let samples = mix(pitches, timing)
            .into_iter()
            .map(|sample| quantize(sample, self.volume))
            .collect();
        PcmBuffer::new(samples, SAMPLE_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(pitches: &[Pitch]) -> PitchSet {
        PitchSet::new(pitches.to_vec()).unwrap()
    }

    fn timing(duration_secs: f64, arpeggio_delay_secs: f64) -> Timing {
        Timing {
            duration_secs,
            arpeggio_delay_secs,
        }
    }

    #[test]
    fn test_frequency() {
        assert!((frequency(69) - 440.0).abs() < 1e-9);
        assert!((frequency(57) - 220.0).abs() < 1e-9);
        assert!((frequency(81) - 880.0).abs() < 1e-9);
        assert!((frequency(60) - 261.625_565).abs() < 1e-5);
    }

    #[test]
    fn test_buffer_length_rounds_duration() {
        let synth = Synthesizer::default();
        assert_eq!(synth.render(&set(&[60]), timing(0.5, 0.0)).len(), 22050);
        // 0.00001 s = 0.441 samples, rounds to 0
        assert_eq!(synth.render(&set(&[60]), timing(0.00001, 0.0)).len(), 0);
        // 0.1 s = 4410 samples
        let buffer = synth.render(&set(&[60, 64]), timing(0.1, 0.02));
        assert_eq!(buffer.len(), 4410);
        assert_eq!(buffer.sample_rate(), SAMPLE_RATE);
        assert_eq!(buffer.duration(), Duration::from_millis(100));
    }

    #[test]
    fn test_render_is_deterministic() {
        let synth = Synthesizer::default();
        let chord = set(&[60, 64, 67, 71, 74]);
        let a = synth.render(&chord, timing(0.2, 0.03));
        let b = synth.render(&chord, timing(0.2, 0.03));
        assert_eq!(a, b);
    }

    #[test]
    fn test_mean_mix_stays_in_unit_range() {
        for n in 1..=8 {
            let pitches: Vec<Pitch> = (0..n).map(|i| 48 + i * 5).collect();
            let mixed = mix(&set(&pitches), timing(0.05, 0.0));
            let peak = mixed.iter().fold(0.0f64, |acc, s| acc.max(s.abs()));
            assert!(peak <= 1.0, "peak {} for {} notes", peak, n);
        }
    }

    #[test]
    fn test_arpeggio_delays_later_onsets() {
        // 441 samples = 10 ms
        let t = timing(0.05, 0.01);
        let mixed = mix(&set(&[69, 69]), t);
        let solo = partial(frequency(69), 0, t.total_samples());

        for n in 0..441 {
            assert!((mixed[n] - solo[n] / 2.0).abs() < 1e-12, "sample {}", n);
        }
        for n in 441..mixed.len() {
            assert!((mixed[n] - solo[n]).abs() < 1e-12, "sample {}", n);
        }
    }

    #[test]
    fn test_zero_delay_starts_together() {
        let t = timing(0.01, 0.0);
        let together = mix(&set(&[60, 67]), t);
        let a = partial(frequency(60), 0, t.total_samples());
        let b = partial(frequency(67), 0, t.total_samples());
        for n in 0..together.len() {
            assert!((together[n] - (a[n] + b[n]) / 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_onset_past_end_is_silent() {
        let mixed = mix(&set(&[60, 72]), timing(0.01, 1.0));
        let solo = partial(frequency(60), 0, mixed.len());
        for n in 0..mixed.len() {
            assert!((mixed[n] - solo[n] / 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_quantize() {
        assert_eq!(quantize(1.0, 1.0), i16::MAX);
        assert_eq!(quantize(-1.0, 1.0), -i16::MAX);
        assert_eq!(quantize(0.0, 0.3), 0);
        assert_eq!(quantize(1.0, 0.3), 9830);
        assert_eq!(quantize(-1.0, 0.3), -9830);
        assert_eq!(quantize(4.0, 1.0), i16::MAX);
    }

    #[test]
    fn test_rendered_peak_respects_volume() {
        let synth = Synthesizer::default();
        let buffer = synth.render(&set(&[60, 64, 67]), timing(0.1, 0.0));
        let limit = (DEFAULT_VOLUME * i16::MAX as f64) as i16;
        assert!(buffer.samples().iter().all(|s| s.abs() <= limit));
        assert!(buffer.samples().iter().any(|&s| s != 0));
    }

    #[test]
    fn test_volume_is_clamped() {
        assert_eq!(Synthesizer::new(2.0).volume(), 1.0);
        assert_eq!(Synthesizer::new(-1.0).volume(), 0.0);
    }
}
