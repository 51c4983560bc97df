use super::types::{AnalysisConfig, AudioError};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

/// A spectral peak: interpolated frequency (Hz) and magnitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub frequency: f32,
    pub magnitude: f32,
}

/// Features computed from a single analysis frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameFeatures {
    /// Spectral centroid in Hz
    pub centroid: f32,
    /// Inharmonicity coefficient in [0, 0.5]
    pub inharmonicity: f32,
}

/// Slices a signal into overlapping frames.
///
/// The first frame is centered on sample 0 and every frame is
/// `frame_size` long; positions outside the signal are zero padded.
/// Frames are produced while the frame start still lies inside the
/// signal, so an empty signal yields no frames.
///
/// # Arguments
/// * `signal` - Mono samples
/// * `frame_size` - Samples per frame
/// * `hop_size` - Distance between the starts of consecutive frames
pub fn frames(
    signal: &[f32],
    frame_size: usize,
    hop_size: usize,
) -> impl Iterator<Item = Vec<f32>> + '_ {
    let hop = hop_size.max(1) as isize;
    let first = -((frame_size / 2) as isize);
    let len = signal.len() as isize;

    (0..)
        .map(move |i| first + i * hop)
        .take_while(move |&start| len > 0 && start < len)
        .map(move |start| {
            (0..frame_size as isize)
                .map(|j| {
                    let idx = start + j;
                    if idx >= 0 && idx < len {
                        signal[idx as usize]
                    } else {
                        0.0
                    }
                })
                .collect()
        })
}

/// Builds a Hann window normalized so that its coefficients sum to 2.
///
/// The window function is: w(n) = 0.5 * (1 - cos(2π*n/(N-1)))
///
/// The normalization keeps the magnitude of a full-scale sinusoid close
/// to 1 regardless of the frame size.
pub fn hann_window(size: usize) -> Vec<f32> {
    if size < 2 {
        return vec![1.0; size];
    }

    let window: Vec<f32> = (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / (size - 1) as f32).cos()))
        .collect();
    let sum: f32 = window.iter().sum();

    window.into_iter().map(|w| w * 2.0 / sum).collect()
}

/// Computes the spectral centroid of a magnitude spectrum.
///
/// Bins are mapped linearly onto `[0, range]`, so with `range` set to the
/// Nyquist frequency the result is in Hz. A silent spectrum has a
/// centroid of 0.
pub fn spectral_centroid(spectrum: &[f32], range: f32) -> f32 {
    if spectrum.len() < 2 {
        return 0.0;
    }

    let (weighted, total) = spectrum
        .iter()
        .enumerate()
        .fold((0.0f64, 0.0f64), |(weighted, total), (i, &m)| {
            (weighted + i as f64 * m as f64, total + m as f64)
        });

    if total <= 0.0 {
        return 0.0;
    }

    (weighted / total * range as f64 / (spectrum.len() - 1) as f64) as f32
}

/// Detects peaks in a magnitude spectrum.
///
/// For each local maximum:
/// 1. Uses quadratic interpolation for a precise position and magnitude
/// 2. Converts the position to Hz
/// 3. Keeps it if it lies within the configured frequency range
///
/// At most `max_peaks` of the loudest peaks are kept, ordered by frequency.
///
/// # Arguments
/// * `spectrum` - Magnitude spectrum with `frame_size/2 + 1` bins
/// * `config` - Analysis configuration
pub fn spectral_peaks(spectrum: &[f32], config: &AnalysisConfig) -> Vec<Peak> {
    if spectrum.len() < 3 {
        return Vec::new();
    }

    let bin_hz = config.sample_rate as f32 / 2.0 / (spectrum.len() - 1) as f32;
    let min_freq = config.min_peak_frequency();
    let mut peaks = Vec::new();

    for bin in 1..spectrum.len() - 1 {
        let alpha = spectrum[bin - 1];
        let beta = spectrum[bin];
        let gamma = spectrum[bin + 1];

        if beta <= 0.0 || beta <= alpha || beta < gamma {
            continue;
        }

        let denom = alpha - 2.0 * beta + gamma;
        let p = if denom != 0.0 {
            0.5 * (alpha - gamma) / denom
        } else {
            0.0
        };

        let frequency = (bin as f32 + p) * bin_hz;
        if frequency < min_freq || frequency > config.max_peak_frequency {
            continue;
        }

        peaks.push(Peak {
            frequency,
            magnitude: beta - 0.25 * (alpha - gamma) * p,
        });
    }

    // Loudest first, then back into frequency order
    peaks.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
    peaks.truncate(config.max_peaks);
    peaks.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));

    peaks
}

/// Matches spectral peaks against the harmonics of a known pitch.
///
/// A peak belongs to harmonic `k` when its frequency ratio to the pitch is
/// within `harmonic_tolerance` of `k`. When several peaks match the same
/// harmonic, the closest one wins. Harmonics without a matching peak are
/// reported at their ideal frequency with zero magnitude, so the result
/// always has `max_harmonics` entries and starts with the fundamental.
///
/// # Errors
/// * If the pitch is not a positive, finite frequency
pub fn harmonic_peaks(
    peaks: &[Peak],
    pitch: f32,
    config: &AnalysisConfig,
) -> Result<Vec<Peak>, AudioError> {
    if !pitch.is_finite() || pitch <= 0.0 {
        return Err(AudioError::InvalidParams(format!(
            "Pitch must be a positive frequency, got {}",
            pitch
        )));
    }

    let mut harmonics: Vec<Peak> = (1..=config.max_harmonics)
        .map(|k| Peak {
            frequency: pitch * k as f32,
            magnitude: 0.0,
        })
        .collect();
    let mut best_deviation = vec![f32::INFINITY; config.max_harmonics];

    for peak in peaks {
        let ratio = peak.frequency / pitch;
        let k = ratio.round();
        let deviation = (ratio - k).abs();

        if k < 1.0 || k as usize > config.max_harmonics {
            continue;
        }
        if deviation > config.harmonic_tolerance {
            continue;
        }

        let idx = k as usize - 1;
        if deviation < best_deviation[idx] {
            best_deviation[idx] = deviation;
            harmonics[idx] = *peak;
        }
    }

    Ok(harmonics)
}

/// Computes the inharmonicity of a set of harmonic peaks.
///
/// The first peak is taken as the fundamental `f0`. Each partial's
/// deviation from the nearest integer multiple of `f0` is weighted by its
/// energy:
///
/// `Σ |f_i - round(f_i/f0)·f0| · m_i² / (f0 · Σ m_i²)`
///
/// Perfectly harmonic partials give 0. Returns 0 when there is no
/// fundamental or no energy.
pub fn inharmonicity(harmonics: &[Peak]) -> f32 {
    let f0 = match harmonics.first() {
        Some(p) if p.frequency > 0.0 => p.frequency,
        _ => return 0.0,
    };

    let mut num = 0.0f64;
    let mut den = 0.0f64;
    for peak in harmonics {
        let energy = (peak.magnitude as f64).powi(2);
        let ideal = (peak.frequency / f0).round() as f64 * f0 as f64;
        num += (peak.frequency as f64 - ideal).abs() * energy;
        den += energy;
    }

    if den <= 0.0 {
        return 0.0;
    }

    (num / (den * f0 as f64)) as f32
}

/// Windowed magnitude spectrum analysis for fixed-size frames.
///
/// The FFT plan and window are built once and reused for every frame.
pub struct SpectrumAnalyzer {
    config: AnalysisConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
}

impl SpectrumAnalyzer {
    /// Creates an analyzer for frames of `config.frame_size` samples.
    ///
    /// # Errors
    /// * If the configuration is invalid
    pub fn new(config: AnalysisConfig) -> Result<Self, AudioError> {
        config.validate()?;

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(config.frame_size);
        let window = hann_window(config.frame_size);
        let buffer = vec![Complex::new(0.0, 0.0); config.frame_size];

        Ok(SpectrumAnalyzer {
            config,
            fft,
            window,
            buffer,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Computes the magnitude spectrum of one frame.
    ///
    /// # Returns
    /// * `Result<Vec<f32>, AudioError>` - `frame_size/2 + 1` magnitudes
    ///
    /// # Errors
    /// * If the frame length differs from the configured frame size
    pub fn spectrum(&mut self, frame: &[f32]) -> Result<Vec<f32>, AudioError> {
        if frame.len() != self.config.frame_size {
            return Err(AudioError::InvalidParams(format!(
                "Expected a frame of {} samples, got {}",
                self.config.frame_size,
                frame.len()
            )));
        }

        for ((slot, &x), &w) in self.buffer.iter_mut().zip(frame).zip(&self.window) {
            *slot = Complex::new(x * w, 0.0);
        }

        self.fft.process(&mut self.buffer);

        Ok(self.buffer[..self.config.frame_size / 2 + 1]
            .iter()
            .map(|c| c.norm())
            .collect())
    }

    /// Computes centroid and inharmonicity of one frame for a known pitch.
    pub fn analyze_frame(
        &mut self,
        frame: &[f32],
        pitch: f32,
    ) -> Result<FrameFeatures, AudioError> {
        let spectrum = self.spectrum(frame)?;
        let centroid = spectral_centroid(&spectrum, self.config.centroid_range);

        let peaks = spectral_peaks(&spectrum, &self.config);
        let harmonics = harmonic_peaks(&peaks, pitch, &self.config)?;

        Ok(FrameFeatures {
            centroid,
            inharmonicity: inharmonicity(&harmonics),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, len: usize, sample_rate: u32) -> Vec<f32> {
        (0..len)
            .map(|t| (2.0 * PI * freq * t as f32 / sample_rate as f32).sin())
            .collect()
    }

    #[test]
    fn frames_are_centered_on_first_sample() {
        let signal: Vec<f32> = (1..=2048).map(|i| i as f32).collect();
        let all: Vec<Vec<f32>> = frames(&signal, 1024, 512).collect();

        assert_eq!(all.len(), 5);
        assert!(all.iter().all(|f| f.len() == 1024));
        // First half of the first frame is padding
        assert_eq!(all[0][511], 0.0);
        assert_eq!(all[0][512], 1.0);
        // Last frame runs past the end of the signal
        assert_eq!(all[4][511], 2048.0);
        assert_eq!(all[4][512], 0.0);
    }

    #[test]
    fn frames_of_empty_signal() {
        assert_eq!(frames(&[], 1024, 512).count(), 0);
        assert_eq!(frames(&[0.5], 1024, 512).count(), 1);
    }

    #[test]
    fn hann_window_sums_to_two() {
        let window = hann_window(1024);
        let sum: f32 = window.iter().sum();
        assert!((sum - 2.0).abs() < 1e-4);
        assert!(window[0].abs() < 1e-9);
    }

    #[test]
    fn centroid_of_single_bin() {
        let mut spectrum = vec![0.0; 513];
        spectrum[256] = 1.0;
        assert!((spectral_centroid(&spectrum, 22050.0) - 11025.0).abs() < 1e-2);
    }

    #[test]
    fn centroid_of_silence_is_zero() {
        assert_eq!(spectral_centroid(&vec![0.0; 513], 22050.0), 0.0);
    }

    #[test]
    fn sine_produces_single_peak() {
        let config = AnalysisConfig::default();
        let freq = 40.0 * config.sample_rate as f32 / config.frame_size as f32;
        let mut analyzer = SpectrumAnalyzer::new(config.clone()).unwrap();

        let spectrum = analyzer.spectrum(&sine(freq, 1024, config.sample_rate)).unwrap();
        assert_eq!(spectrum.len(), 513);

        let peaks = spectral_peaks(&spectrum, &config);
        let loudest = peaks
            .iter()
            .max_by(|a, b| a.magnitude.total_cmp(&b.magnitude))
            .unwrap();
        assert!((loudest.frequency - freq).abs() < 5.0);
        assert!((loudest.magnitude - 1.0).abs() < 0.1);
    }

    #[test]
    fn peaks_are_ordered_by_frequency() {
        let config = AnalysisConfig::default();
        let mut spectrum = vec![0.0; 513];
        spectrum[50] = 0.2;
        spectrum[20] = 1.0;
        spectrum[80] = 0.5;

        let peaks = spectral_peaks(&spectrum, &config);
        assert_eq!(peaks.len(), 3);
        assert!(peaks.windows(2).all(|w| w[0].frequency < w[1].frequency));
    }

    #[test]
    fn peaks_outside_range_are_dropped() {
        let config = AnalysisConfig::default();
        let mut spectrum = vec![0.0; 513];
        // Bin 200 is ~8.6 kHz, above the 5 kHz limit
        spectrum[200] = 1.0;
        spectrum[30] = 1.0;

        let peaks = spectral_peaks(&spectrum, &config);
        assert_eq!(peaks.len(), 1);
        assert!((peaks[0].frequency - 30.0 * 22050.0 / 512.0).abs() < 1e-2);
    }

    #[test]
    fn missing_harmonics_have_zero_magnitude() {
        let config = AnalysisConfig::default();
        let peaks = vec![
            Peak { frequency: 441.0, magnitude: 1.0 },
            Peak { frequency: 1318.0, magnitude: 0.5 },
        ];

        let harmonics = harmonic_peaks(&peaks, 440.0, &config).unwrap();
        assert_eq!(harmonics.len(), 20);
        assert_eq!(harmonics[0].frequency, 441.0);
        assert_eq!(harmonics[1], Peak { frequency: 880.0, magnitude: 0.0 });
        assert_eq!(harmonics[2].frequency, 1318.0);
    }

    #[test]
    fn closest_peak_wins_harmonic() {
        let config = AnalysisConfig::default();
        let peaks = vec![
            Peak { frequency: 860.0, magnitude: 1.0 },
            Peak { frequency: 884.0, magnitude: 0.3 },
        ];

        let harmonics = harmonic_peaks(&peaks, 440.0, &config).unwrap();
        assert_eq!(harmonics[1].frequency, 884.0);
    }

    #[test]
    fn harmonic_peaks_reject_invalid_pitch() {
        let config = AnalysisConfig::default();
        assert!(harmonic_peaks(&[], 0.0, &config).is_err());
        assert!(harmonic_peaks(&[], -440.0, &config).is_err());
    }

    #[test]
    fn exact_harmonics_are_not_inharmonic() {
        let harmonics: Vec<Peak> = (1..=5)
            .map(|k| Peak {
                frequency: 220.0 * k as f32,
                magnitude: 1.0 / k as f32,
            })
            .collect();
        assert!(inharmonicity(&harmonics).abs() < 1e-6);
    }

    #[test]
    fn stretched_partials_are_inharmonic() {
        let harmonics = vec![
            Peak { frequency: 100.0, magnitude: 1.0 },
            Peak { frequency: 210.0, magnitude: 1.0 },
        ];
        // |210 - 200| * 1 / (100 * 2)
        assert!((inharmonicity(&harmonics) - 0.05).abs() < 1e-6);
    }

    #[test]
    fn inharmonicity_of_silence_is_zero() {
        let harmonics = vec![Peak { frequency: 100.0, magnitude: 0.0 }];
        assert_eq!(inharmonicity(&harmonics), 0.0);
        assert_eq!(inharmonicity(&[]), 0.0);
    }

    #[test]
    fn spectrum_rejects_wrong_frame_size() {
        let mut analyzer = SpectrumAnalyzer::new(AnalysisConfig::default()).unwrap();
        assert!(analyzer.spectrum(&[0.0; 512]).is_err());
    }
}
