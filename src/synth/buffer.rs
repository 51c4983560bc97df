use super::types::SynthError;
use crate::pitch::Hz;
use std::f64::consts::PI;

/// Longest buffer accepted, in seconds
pub const MAX_DURATION: f64 = 3600.0;

/// Relative amplitude of harmonic `k` (1 is the fundamental).
///
/// Amplitudes fall off as `1/k`, the spectrum of a sawtooth.
pub fn harmonic_amplitude(k: usize) -> f64 {
    1.0 / k as f64
}

/// Renders a fundamental and its overtones into a sample buffer.
///
/// Sample `t` is the sum over harmonics `k = 1..=n_overtones + 1` of
/// `sin(2π·k·f·t / sample_rate) / k`. Harmonics at or above the Nyquist
/// frequency are left out. The result is scaled so that its peak
/// amplitude is exactly 1.
///
/// # Arguments
/// * `frequency` - Fundamental frequency in Hz
/// * `duration` - Length in seconds
/// * `n_overtones` - Number of harmonics above the fundamental
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
/// * `Result<Vec<f32>, SynthError>` - `round(duration * sample_rate)` samples
///
/// # Errors
/// * If the frequency is not positive or not below Nyquist
/// * If the duration is not positive, too short for a single sample, or
///   longer than `MAX_DURATION`
pub fn freq_buffer(
    frequency: Hz,
    duration: f64,
    n_overtones: usize,
    sample_rate: u32,
) -> Result<Vec<f32>, SynthError> {
    if sample_rate == 0 {
        return Err(SynthError::InvalidSampleRate(sample_rate));
    }
    let sr = sample_rate as f64;

    if !frequency.is_finite() || frequency <= 0.0 || frequency >= sr / 2.0 {
        return Err(SynthError::InvalidFrequency(frequency));
    }
    if !duration.is_finite() || duration <= 0.0 || duration > MAX_DURATION {
        return Err(SynthError::InvalidDuration(duration));
    }

    let len = (duration * sr).round() as usize;
    if len == 0 {
        return Err(SynthError::InvalidDuration(duration));
    }

    let harmonics: Vec<(f64, f64)> = (1..=n_overtones.saturating_add(1))
        .map(|k| (2.0 * PI * k as f64 * frequency / sr, harmonic_amplitude(k)))
        .take_while(|&(omega, _)| omega < PI)
        .collect();

    let mut buffer: Vec<f64> = (0..len)
        .map(|t| {
            harmonics
                .iter()
                .map(|&(omega, amp)| amp * (omega * t as f64).sin())
                .sum()
        })
        .collect();

    let peak = buffer.iter().fold(0.0f64, |m, s| m.max(s.abs()));
    if peak > 0.0 {
        buffer.iter_mut().for_each(|s| *s /= peak);
    }

    Ok(buffer.into_iter().map(|s| s as f32).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SAMPLE_RATE;

    #[test]
    fn length_matches_duration() {
        for (duration, expected) in [(1.0, 44100), (0.5, 22050), (0.25, 11025)] {
            let buffer = freq_buffer(440.0, duration, 10, SAMPLE_RATE).unwrap();
            assert_eq!(buffer.len(), expected);
        }
        assert_eq!(freq_buffer(100.0, 2.0, 3, 8000).unwrap().len(), 16000);
    }

    #[test]
    fn peak_is_normalized() {
        let buffer = freq_buffer(440.0, 1.0, 10, SAMPLE_RATE).unwrap();
        let peak = buffer.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!((peak - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_overtones_is_a_sine() {
        let buffer = freq_buffer(1000.0, 0.01, 0, 8000).unwrap();
        // A quarter period of 1 kHz at 8 kHz is two samples
        assert!(buffer[0].abs() < 1e-6);
        assert!((buffer[2] - 1.0).abs() < 1e-6);
        assert!(buffer[4].abs() < 1e-6);
    }

    #[test]
    fn starts_at_zero() {
        let buffer = freq_buffer(440.0, 0.1, 10, SAMPLE_RATE).unwrap();
        assert_eq!(buffer[0], 0.0);
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert!(matches!(
            freq_buffer(0.0, 1.0, 10, SAMPLE_RATE),
            Err(SynthError::InvalidFrequency(_))
        ));
        assert!(matches!(
            freq_buffer(-440.0, 1.0, 10, SAMPLE_RATE),
            Err(SynthError::InvalidFrequency(_))
        ));
        assert!(matches!(
            freq_buffer(30000.0, 1.0, 10, SAMPLE_RATE),
            Err(SynthError::InvalidFrequency(_))
        ));
        assert!(matches!(
            freq_buffer(440.0, 0.0, 10, SAMPLE_RATE),
            Err(SynthError::InvalidDuration(_))
        ));
        assert!(matches!(
            freq_buffer(440.0, -1.0, 10, SAMPLE_RATE),
            Err(SynthError::InvalidDuration(_))
        ));
        assert!(matches!(
            freq_buffer(440.0, 1e-9, 10, SAMPLE_RATE),
            Err(SynthError::InvalidDuration(_))
        ));
        assert!(matches!(
            freq_buffer(440.0, 1e12, 10, SAMPLE_RATE),
            Err(SynthError::InvalidDuration(_))
        ));
        assert!(matches!(
            freq_buffer(440.0, MAX_DURATION + 1.0, 0, SAMPLE_RATE),
            Err(SynthError::InvalidDuration(_))
        ));
        assert!(matches!(
            freq_buffer(440.0, 1.0, 10, 0),
            Err(SynthError::InvalidSampleRate(0))
        ));
    }

    #[test]
    fn harmonics_above_nyquist_are_dropped() {
        // Only the fundamental fits below 4 kHz
        let with = freq_buffer(3000.0, 0.01, 5, 8000).unwrap();
        let without = freq_buffer(3000.0, 0.01, 0, 8000).unwrap();
        for (a, b) in with.iter().zip(&without) {
            assert!((a - b).abs() < 1e-6);
        }
    }
}
