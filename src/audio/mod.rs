/// Audio processing module for reading, writing, and analyzing WAV files.
///
/// This module provides functionality to:
/// - Read WAV files and load them as mono at the analysis sample rate
/// - Write synthesized buffers as 16-bit WAV files
/// - Compute per-frame spectral centroid and inharmonicity
mod analysis;
mod types;
mod wav;

pub use analysis::{
    frames, hann_window, harmonic_peaks, inharmonicity, spectral_centroid, spectral_peaks,
    FrameFeatures, Peak, SpectrumAnalyzer,
};
pub use types::{AnalysisConfig, AudioError, WavData, SAMPLE_RATE};
pub use wav::{load_mono, read_wav_file, write_wav_file};
