use super::buffer::freq_buffer;
use super::mixer::combine_buffers;
use super::types::{SynthError, SynthSettings};
use crate::audio::write_wav_file;
use crate::pitch::{format_hz, Hz, Note};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// One chord member: a named note or a raw frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tone {
    Note(Note),
    Frequency(Hz),
}

impl Tone {
    pub fn frequency(&self) -> Hz {
        match self {
            Tone::Note(note) => note.frequency(),
            Tone::Frequency(f) => *f,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tone::Note(note) => write!(f, "{}", note),
            Tone::Frequency(hz) => write!(f, "{}", format_hz(*hz)),
        }
    }
}

impl FromStr for Tone {
    type Err = SynthError;

    /// Parses a note name (`C#5`) or a frequency in Hz (`556.875`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Note>() {
            Ok(note) => Ok(Tone::Note(note)),
            Err(err) => s
                .trim()
                .parse::<Hz>()
                .map(Tone::Frequency)
                .map_err(|_| SynthError::Pitch(err)),
        }
    }
}

/// An ordered set of tones sounded together
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    tones: Vec<Tone>,
}

impl Chord {
    /// # Errors
    /// * If `tones` is empty
    pub fn new(tones: Vec<Tone>) -> Result<Self, SynthError> {
        if tones.is_empty() {
            return Err(SynthError::EmptyMix);
        }
        Ok(Chord { tones })
    }

    /// Builds a chord from note names such as `["A4", "C#5", "E5"]`.
    pub fn from_notes<S: AsRef<str>>(names: &[S]) -> Result<Self, SynthError> {
        let tones = names
            .iter()
            .map(|n| Ok(Tone::Note(n.as_ref().parse::<Note>()?)))
            .collect::<Result<Vec<Tone>, SynthError>>()?;
        Chord::new(tones)
    }

    pub fn from_frequencies(frequencies: &[Hz]) -> Result<Self, SynthError> {
        Chord::new(frequencies.iter().map(|&f| Tone::Frequency(f)).collect())
    }

    pub fn frequencies(&self) -> Vec<Hz> {
        self.tones.iter().map(Tone::frequency).collect()
    }

    /// Tones joined by `-`, e.g. `A4-C#5-E5` or `440.0-660.0`
    pub fn label(&self) -> String {
        self.tones
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<String>>()
            .join("-")
    }

    /// File name for this chord, e.g. `A4-C#5-E5_10.wav`
    pub fn file_name(&self, n_overtones: usize) -> String {
        format!("{}_{}.wav", self.label(), n_overtones)
    }

    /// Renders every tone as an overtone stack and mixes them.
    pub fn render(&self, settings: &SynthSettings) -> Result<Vec<f32>, SynthError> {
        let buffers = self
            .frequencies()
            .into_iter()
            .map(|f| {
                freq_buffer(
                    f,
                    settings.duration,
                    settings.n_overtones,
                    settings.sample_rate,
                )
            })
            .collect::<Result<Vec<Vec<f32>>, SynthError>>()?;

        combine_buffers(&buffers)
    }

    /// Renders the chord and writes it to `path` as a WAV file.
    pub fn to_audio(&self, path: &Path, settings: &SynthSettings) -> Result<(), SynthError> {
        let audio = self.render(settings)?;
        write_wav_file(path, &audio, settings.sample_rate)?;
        info!("Audio saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_from_note_names() {
        let chord = Chord::from_notes(&["A4", "C#5", "E5"]).unwrap();
        assert_eq!(chord.label(), "A4-C#5-E5");
        assert_eq!(chord.file_name(10), "A4-C#5-E5_10.wav");
    }

    #[test]
    fn labels_from_frequencies() {
        let chord = Chord::from_frequencies(&[440.0, 556.875, 660.0]).unwrap();
        assert_eq!(chord.file_name(10), "440.0-556.875-660.0_10.wav");
    }

    #[test]
    fn tones_parse_names_and_numbers() {
        assert_eq!(
            "A4".parse::<Tone>().unwrap(),
            Tone::Note(Note::from_midi(69))
        );
        assert_eq!("556.875".parse::<Tone>().unwrap(), Tone::Frequency(556.875));
        assert!("not a tone".parse::<Tone>().is_err());
    }

    #[test]
    fn empty_chord_is_rejected() {
        assert!(Chord::from_frequencies(&[]).is_err());
        assert!(Chord::from_notes(&["Q9"]).is_err());
    }

    #[test]
    fn render_has_one_buffer_length() {
        let settings = SynthSettings {
            duration: 0.5,
            ..SynthSettings::default()
        };
        let chord = Chord::from_notes(&["A4", "C#5", "E5"]).unwrap();
        let audio = chord.render(&settings).unwrap();
        assert_eq!(audio.len(), 22050);
        assert!(audio.iter().all(|s| s.abs() <= 1.0));
    }

    #[test]
    fn render_rejects_invalid_frequency() {
        let chord = Chord::from_frequencies(&[440.0, -1.0]).unwrap();
        assert!(matches!(
            chord.render(&SynthSettings::default()),
            Err(SynthError::InvalidFrequency(_))
        ));
    }
}
