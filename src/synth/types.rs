use crate::audio::{AudioError, SAMPLE_RATE};
use crate::pitch::PitchError;

/// Parameters shared by every buffer of a chord
#[derive(Debug, Clone, PartialEq)]
pub struct SynthSettings {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Length of each rendered buffer in seconds
    pub duration: f64,
    /// Number of harmonics added above each fundamental
    pub n_overtones: usize,
}

impl Default for SynthSettings {
    fn default() -> Self {
        SynthSettings {
            sample_rate: SAMPLE_RATE,
            duration: 1.0,
            n_overtones: 10,
        }
    }
}

/// Errors that can occur during synthesis
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// Frequency that is not positive, not finite, or above Nyquist
    #[error("Invalid frequency: {0} Hz")]
    InvalidFrequency(f64),

    /// Duration that does not yield at least one sample
    #[error("Invalid duration: {0} s")]
    InvalidDuration(f64),

    #[error("Invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),

    /// Buffers of different lengths passed to the mixer
    #[error("Buffer length mismatch: expected {expected} samples, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Nothing to mix")]
    EmptyMix,

    #[error(transparent)]
    Pitch(#[from] PitchError),

    #[error(transparent)]
    Audio(#[from] AudioError),
}
