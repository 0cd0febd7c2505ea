//! Audio synthesis and playback.
//!
//! This module turns pitch sets into sound. It provides:
//! - Additive sine synthesis into 16-bit PCM buffers
//! - Blocking playback via rodio, one chord at a time
//! - WAV export of the most recent chord

pub mod engine;
pub mod export;
pub mod synth;

pub use engine::{AudioEngine, Playback};
pub use export::write_wav;
pub use synth::{PcmBuffer, Synthesizer, Timing, DEFAULT_VOLUME, SAMPLE_RATE};
