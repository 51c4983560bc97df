use super::types::{AudioError, WavData};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// Reads and parses a WAV file, converting samples to normalized f32 values.
///
/// This function supports the following WAV formats:
/// - 32-bit float
/// - 16-bit integer
/// - 24-bit integer
/// - 32-bit integer
///
/// All integer formats are normalized to the [-1, 1] range.
///
/// # Arguments
/// * `path` - Path to the WAV file to read
///
/// # Returns
/// * `Result<WavData, AudioError>` - Parsed WAV data or an error
///
/// # Errors
/// * If the file cannot be read
/// * If the WAV format is unsupported
/// * If there's an error during sample conversion
pub fn read_wav_file(path: &Path) -> Result<WavData, AudioError> {
    let reader = WavReader::open(path).map_err(|e| AudioError::WavParse(e.to_string()))?;
    let spec = reader.spec();

    // Convert samples to f32, regardless of input format
    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .into_samples::<f32>()
            .map(|s| s.map_err(|e| AudioError::WavParse(e.to_string())))
            .collect::<Result<Vec<f32>, AudioError>>()?,
        (SampleFormat::Int, 16) => reader
            .into_samples::<i16>()
            .map(|s| s.map_err(|e| AudioError::WavParse(e.to_string())))
            .map(|s| Ok(s? as f32 / 32768.0))
            .collect::<Result<Vec<f32>, AudioError>>()?,
        (SampleFormat::Int, 24) => reader
            .into_samples::<i32>()
            .map(|s| s.map_err(|e| AudioError::WavParse(e.to_string())))
            .map(|s| Ok(s? as f32 / 8388608.0))
            .collect::<Result<Vec<f32>, AudioError>>()?,
        (SampleFormat::Int, 32) => reader
            .into_samples::<i32>()
            .map(|s| s.map_err(|e| AudioError::WavParse(e.to_string())))
            .map(|s| Ok(s? as f32 / 2147483648.0))
            .collect::<Result<Vec<f32>, AudioError>>()?,
        _ => {
            return Err(AudioError::WavParse(format!(
                "Unsupported WAV format: {:?} {}-bit",
                spec.sample_format, spec.bits_per_sample
            )))
        }
    };

    Ok(WavData {
        samples,
        sample_rate: spec.sample_rate,
        channels: spec.channels,
    })
}

/// Loads a WAV file as a mono signal at the requested sample rate.
///
/// Multi-channel audio is averaged into one channel. Audio recorded at a
/// different rate is resampled with linear interpolation.
///
/// # Arguments
/// * `path` - Path to the WAV file to read
/// * `sample_rate` - Sample rate of the returned signal (Hz)
///
/// # Returns
/// * `Result<Vec<f32>, AudioError>` - Mono samples at `sample_rate`
pub fn load_mono(path: &Path, sample_rate: u32) -> Result<Vec<f32>, AudioError> {
    if sample_rate == 0 {
        return Err(AudioError::InvalidParams(
            "Sample rate must be positive".to_string(),
        ));
    }

    let wav_data = read_wav_file(path)?;
    if wav_data.channels == 0 || wav_data.sample_rate == 0 {
        return Err(AudioError::WavParse(format!(
            "Invalid WAV header in {}",
            path.display()
        )));
    }

    let mono = downmix(&wav_data);
    if wav_data.sample_rate == sample_rate {
        Ok(mono)
    } else {
        Ok(resample_linear(&mono, wav_data.sample_rate, sample_rate))
    }
}

/// Writes a mono buffer as a 16-bit PCM WAV file.
///
/// Samples outside [-1, 1] are clipped.
///
/// # Arguments
/// * `path` - Destination file
/// * `samples` - Mono samples in [-1, 1]
/// * `sample_rate` - Sample rate in Hz
pub fn write_wav_file(path: &Path, samples: &[f32], sample_rate: u32) -> Result<(), AudioError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer =
        WavWriter::create(path, spec).map_err(|e| AudioError::WavWrite(e.to_string()))?;
    for &s in samples {
        let v = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(v)
            .map_err(|e| AudioError::WavWrite(e.to_string()))?;
    }
    writer
        .finalize()
        .map_err(|e| AudioError::WavWrite(e.to_string()))?;

    Ok(())
}

/// Averages interleaved channels into a single channel.
fn downmix(wav_data: &WavData) -> Vec<f32> {
    let channels = wav_data.channels as usize;
    if channels == 1 {
        return wav_data.samples.clone();
    }

    wav_data
        .samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if samples.is_empty() {
        return Vec::new();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let out_len = (samples.len() as f64 / ratio).round() as usize;
    let last = samples.len() - 1;

    (0..out_len)
        .map(|i| {
            let pos = i as f64 * ratio;
            let idx = (pos.floor() as usize).min(last);
            let next = (idx + 1).min(last);
            let frac = (pos - idx as f64) as f32;
            samples[idx] + (samples[next] - samples[idx]) * frac
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_averages_channels() {
        let wav = WavData {
            samples: vec![1.0, 0.0, 0.5, 0.5, -1.0, 1.0],
            sample_rate: 8000,
            channels: 2,
        };
        assert_eq!(downmix(&wav), vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn resample_halves_length() {
        let input: Vec<f32> = (0..100).map(|i| i as f32).collect();
        let out = resample_linear(&input, 88200, 44100);
        assert_eq!(out.len(), 50);
        assert!((out[10] - 20.0).abs() < 1e-6);
    }

    #[test]
    fn resample_interpolates_between_samples() {
        let out = resample_linear(&[0.0, 1.0], 1, 2);
        assert_eq!(out.len(), 4);
        assert!((out[1] - 0.5).abs() < 1e-6);
        assert!((out[3] - 1.0).abs() < 1e-6);
    }
}
