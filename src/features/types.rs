use crate::audio::AudioError;

/// Aggregated features of one sound file
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    /// `<parent dir>-<file stem>`, lowercased, without spaces
    pub sound_id: String,
    /// Mean spectral centroid across frames (Hz)
    pub spectral_centroid: f32,
    /// Mean inharmonicity across frames
    pub inharmonicity: f32,
}

/// Errors that can occur while extracting features
#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    /// IO errors when reading/writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors while walking the input directory
    #[error("Directory error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Sound ids must start with an integer fundamental followed by `hz`
    #[error("Cannot parse fundamental frequency from '{0}'")]
    InvalidFundamental(String),

    /// Paths without a usable file name
    #[error("Invalid sound path: {0}")]
    InvalidPath(String),

    /// Audio files without any samples
    #[error("No audio frames in {0}")]
    EmptyAudio(String),

    #[error(transparent)]
    Audio(#[from] AudioError),
}
