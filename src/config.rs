use crate::audio::{AnalysisConfig, SAMPLE_RATE};
use crate::synth::SynthSettings;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Configuration for both subcommands
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub common: CommonConfig,
    pub analysis: AnalysisSettings,
    pub synth: SynthConfig,
}

/// Common configuration settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CommonConfig {
    /// Sample rate for synthesis and analysis (Hz)
    pub sample_rate: u32,
}

/// Feature extraction settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Directory holding one subdirectory of WAV files per fundamental
    pub sounds_dir: String,
    /// Destination of the feature table
    pub output_csv: String,
    pub frame_size: usize,
    pub hop_size: usize,
}

/// Chord synthesis settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SynthConfig {
    /// Root of the `12tet` and `just` output directories
    pub audio_dir: String,
    /// Harmonics added above each fundamental
    pub n_overtones: usize,
    /// Length of each chord in seconds
    pub duration: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            common: CommonConfig::default(),
            analysis: AnalysisSettings::default(),
            synth: SynthConfig::default(),
        }
    }
}

impl Default for CommonConfig {
    fn default() -> Self {
        CommonConfig {
            sample_rate: SAMPLE_RATE,
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            sounds_dir: "audio/Sounds-v0".to_string(),
            output_csv: "analysis.csv".to_string(),
            frame_size: 1024,
            hop_size: 512,
        }
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        SynthConfig {
            audio_dir: "audio".to_string(),
            n_overtones: 10,
            duration: 1.0,
        }
    }
}

impl Config {
    /// Analysis parameters derived from this configuration
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            sample_rate: self.common.sample_rate,
            frame_size: self.analysis.frame_size,
            hop_size: self.analysis.hop_size,
            centroid_range: self.common.sample_rate as f32 / 2.0,
            ..AnalysisConfig::default()
        }
    }

    pub fn synth_settings(&self) -> SynthSettings {
        SynthSettings {
            sample_rate: self.common.sample_rate,
            duration: self.synth.duration,
            n_overtones: self.synth.n_overtones,
        }
    }

    /// Directory for 12-tone equal temperament chords
    pub fn twelve_tet_dir(&self) -> PathBuf {
        Path::new(&self.synth.audio_dir).join("12tet")
    }

    /// Directory for Pythagorean just intonation chords
    pub fn just_dir(&self) -> PathBuf {
        Path::new(&self.synth.audio_dir).join("just")
    }

    /// Directory for chords given on the command line
    pub fn custom_dir(&self) -> PathBuf {
        Path::new(&self.synth.audio_dir).join("custom")
    }
}

/// Load configuration from a TOML file such as `config.toml`
pub fn load_config_from(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    match File::open(path) {
        Ok(mut file) => {
            let mut contents = String::new();
            file.read_to_string(&mut contents)?;
            Ok(toml::from_str(&contents)?)
        }
        Err(_) => {
            // If file doesn't exist, return default config
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_constants() {
        let config = Config::default();
        let analysis = config.analysis_config();
        assert_eq!(analysis.sample_rate, 44100);
        assert_eq!(analysis.frame_size, 1024);
        assert_eq!(analysis.hop_size, 512);
        assert_eq!(analysis.centroid_range, 22050.0);

        let synth = config.synth_settings();
        assert_eq!(synth.n_overtones, 10);
        assert_eq!(synth.duration, 1.0);
        assert_eq!(config.twelve_tet_dir(), Path::new("audio").join("12tet"));
        assert_eq!(config.just_dir(), Path::new("audio").join("just"));
        assert_eq!(config.custom_dir(), Path::new("audio").join("custom"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [synth]
            n_overtones = 4

            [analysis]
            output_csv = "out/features.csv"
            "#,
        )
        .unwrap();

        assert_eq!(config.synth.n_overtones, 4);
        assert_eq!(config.synth.audio_dir, "audio");
        assert_eq!(config.analysis.output_csv, "out/features.csv");
        assert_eq!(config.analysis.frame_size, 1024);
        assert_eq!(config.common.sample_rate, 44100);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = load_config_from(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
