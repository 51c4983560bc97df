/// Batch extraction of spectral features from a directory of tone samples.
///
/// Each WAV file yields one row holding its mean spectral centroid and mean
/// inharmonicity. The fundamental used for inharmonicity comes from the
/// file's parent directory name, e.g. `440Hz/sample.wav`.
mod extractor;
mod table;
mod types;

pub use extractor::{
    extract_directory, extract_file_features, pitch_from_sound_id, sound_id_from_path,
};
pub use table::{write_csv, write_csv_to, CSV_HEADER};
pub use types::{FeatureError, FeatureRow};
