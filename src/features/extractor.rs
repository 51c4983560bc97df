use super::types::{FeatureError, FeatureRow};
use crate::audio::{frames, load_mono, AnalysisConfig, SpectrumAnalyzer};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Builds the sound id of a file from its parent directory and stem.
///
/// `audio/Sounds-v0/440Hz/sample.wav` becomes `440hz-sample`. Spaces are
/// removed and the result is lowercased.
///
/// # Errors
/// * If the path has no file stem
pub fn sound_id_from_path(path: &Path) -> Result<String, FeatureError> {
    let stem = path
        .file_stem()
        .ok_or_else(|| FeatureError::InvalidPath(path.display().to_string()))?
        .to_string_lossy();

    let id = match path
        .parent()
        .and_then(Path::file_name)
        .map(|p| p.to_string_lossy())
    {
        Some(parent) => format!("{}-{}", parent, stem),
        None => stem.into_owned(),
    };

    Ok(id.replace(' ', "").to_lowercase())
}

/// Parses the fundamental encoded as the integer prefix before `hz`.
///
/// # Errors
/// * If the prefix is missing, not an integer, or zero
pub fn pitch_from_sound_id(sound_id: &str) -> Result<u32, FeatureError> {
    let invalid = || FeatureError::InvalidFundamental(sound_id.to_string());

    let (prefix, _) = sound_id.split_once("hz").ok_or_else(invalid)?;
    match prefix.parse::<u32>() {
        Ok(pitch) if pitch > 0 => Ok(pitch),
        _ => Err(invalid()),
    }
}

/// Computes the mean centroid and inharmonicity of one file.
///
/// The audio is loaded as mono at the analyzer's sample rate, cut into
/// overlapping frames, and every frame is analyzed against `pitch`.
///
/// # Errors
/// * If the file cannot be read
/// * If the file contains no samples
pub fn extract_file_features(
    path: &Path,
    sound_id: &str,
    pitch: f32,
    analyzer: &mut SpectrumAnalyzer,
) -> Result<FeatureRow, FeatureError> {
    let config = analyzer.config().clone();
    let signal = load_mono(path, config.sample_rate)?;

    let mut centroid_sum = 0.0f64;
    let mut inharmonicity_sum = 0.0f64;
    let mut count = 0usize;

    for frame in frames(&signal, config.frame_size, config.hop_size) {
        let features = analyzer.analyze_frame(&frame, pitch)?;
        centroid_sum += features.centroid as f64;
        inharmonicity_sum += features.inharmonicity as f64;
        count += 1;
    }

    if count == 0 {
        return Err(FeatureError::EmptyAudio(path.display().to_string()));
    }
    debug!("{}: {} frames", sound_id, count);

    Ok(FeatureRow {
        sound_id: sound_id.to_string(),
        spectral_centroid: (centroid_sum / count as f64) as f32,
        inharmonicity: (inharmonicity_sum / count as f64) as f32,
    })
}

/// Extracts one feature row per `<root>/*/*.wav` file.
///
/// Files are visited in path order. The first failure aborts the batch.
///
/// # Arguments
/// * `root` - Directory holding one subdirectory per fundamental
/// * `config` - Analysis configuration
///
/// # Returns
/// * `Result<Vec<FeatureRow>, FeatureError>` - Rows in visiting order
pub fn extract_directory(
    root: &Path,
    config: &AnalysisConfig,
) -> Result<Vec<FeatureRow>, FeatureError> {
    let mut analyzer = SpectrumAnalyzer::new(config.clone())?;
    let mut rows = Vec::new();

    for path in find_wav_files(root)? {
        let sound_id = sound_id_from_path(&path)?;
        info!("{}", sound_id);

        let pitch = pitch_from_sound_id(&sound_id)?;
        rows.push(extract_file_features(
            &path,
            &sound_id,
            pitch as f32,
            &mut analyzer,
        )?);
    }

    Ok(rows)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// WAV files exactly one directory below `root`, sorted by path.
///
/// Hidden directories and files (names starting with `.`) are skipped.
fn find_wav_files(root: &Path) -> Result<Vec<PathBuf>, FeatureError> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
    {
        let entry = entry?;
        let is_wav = entry.path().extension().is_some_and(|ext| ext == "wav");
        if entry.file_type().is_file() && is_wav {
            paths.push(entry.into_path());
        }
    }

    Ok(paths)
}
