/// Sample rate used for both synthesis and analysis (Hz)
pub const SAMPLE_RATE: u32 = 44100;

/// Represents the data from a WAV file after reading
#[derive(Debug, Clone)]
pub struct WavData {
    /// Interleaved samples normalized to [-1, 1] range
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of audio channels
    pub channels: u16,
}

impl WavData {
    /// Number of sample frames (samples per channel)
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    /// Duration of the audio in seconds
    pub fn duration(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f32 / self.sample_rate as f32
    }
}

/// Configuration for frame-wise spectral analysis
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Sample rate the audio is analyzed at (Hz)
    pub sample_rate: u32,
    /// Number of samples per frame
    pub frame_size: usize,
    /// Distance between the starts of consecutive frames
    pub hop_size: usize,
    /// Frequency range mapped onto the spectrum for the centroid (Hz)
    pub centroid_range: f32,
    /// Upper bound for spectral peak detection (Hz)
    pub max_peak_frequency: f32,
    /// Maximum number of spectral peaks kept per frame
    pub max_peaks: usize,
    /// Number of harmonics matched against the fundamental
    pub max_harmonics: usize,
    /// Allowed deviation of a peak from a harmonic, as a fraction of the pitch
    pub harmonic_tolerance: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            sample_rate: SAMPLE_RATE,
            frame_size: 1024,
            hop_size: 512,
            centroid_range: SAMPLE_RATE as f32 / 2.0,
            max_peak_frequency: 5000.0,
            max_peaks: 100,
            max_harmonics: 20,
            harmonic_tolerance: 0.2,
        }
    }
}

impl AnalysisConfig {
    /// Lowest frequency considered a spectral peak: one bin width
    pub fn min_peak_frequency(&self) -> f32 {
        self.sample_rate as f32 / self.frame_size as f32
    }

    /// Validates the configuration
    ///
    /// # Returns
    /// * `Ok(())` if the configuration is valid
    /// * `Err(AudioError)` if the configuration is invalid
    pub fn validate(&self) -> Result<(), AudioError> {
        if self.sample_rate == 0 {
            return Err(AudioError::InvalidParams(
                "Sample rate must be positive".to_string(),
            ));
        }
        if self.frame_size < 4 || self.frame_size % 2 != 0 {
            return Err(AudioError::InvalidParams(format!(
                "Frame size must be an even number of at least 4 samples, got {}",
                self.frame_size
            )));
        }
        if self.hop_size == 0 {
            return Err(AudioError::InvalidParams(
                "Hop size must be positive".to_string(),
            ));
        }
        if self.harmonic_tolerance <= 0.0 || self.harmonic_tolerance > 0.5 {
            return Err(AudioError::InvalidParams(format!(
                "Harmonic tolerance must be in (0, 0.5], got {}",
                self.harmonic_tolerance
            )));
        }
        Ok(())
    }
}

/// Errors that can occur during audio processing
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// IO errors when reading/writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors during WAV file parsing
    #[error("WAV parsing error: {0}")]
    WavParse(String),

    /// Errors while encoding a WAV file
    #[error("WAV writing error: {0}")]
    WavWrite(String),

    /// Invalid parameter values
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}
