/// Additive synthesis of overtone stacks and chords.
///
/// This module provides functionality to:
/// - Render one fundamental plus its harmonics into a fixed-length buffer
/// - Mix equal-length buffers into a chord
/// - Write chords to WAV files
mod buffer;
mod chord;
mod mixer;
mod types;

pub use buffer::{freq_buffer, harmonic_amplitude, MAX_DURATION};
pub use chord::{Chord, Tone};
pub use mixer::combine_buffers;
pub use types::{SynthError, SynthSettings};
