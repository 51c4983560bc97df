use std::fmt;
use std::str::FromStr;

pub type Hz = f64;
pub type MidiNote = i32;

/// Pitch class names in chromatic order, using sharps
pub(crate) const PITCH_CLASSES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Errors that can occur while resolving pitches
#[derive(Debug, thiserror::Error)]
pub enum PitchError {
    /// A note name that could not be parsed
    #[error("Invalid note name: {0}")]
    InvalidNote(String),

    /// An interval missing from the ratio table
    #[error("Unknown interval: {0}")]
    UnknownInterval(String),

    /// A note range whose end lies below its start
    #[error("Invalid note range: {0} to {1}")]
    InvalidRange(String, String),
}

/// A symbolic pitch such as `A4` or `C#5`.
///
/// Octaves follow scientific pitch notation, so `C4` is middle C and
/// `C-1` is MIDI note 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Note {
    midi: MidiNote,
}

impl Note {
    pub fn from_midi(midi: MidiNote) -> Self {
        Note { midi }
    }

    pub fn midi(&self) -> MidiNote {
        self.midi
    }

    /// Pitch class index, 0 for C through 11 for B
    pub fn pitch_class(&self) -> usize {
        self.midi.rem_euclid(12) as usize
    }

    pub fn octave(&self) -> i32 {
        self.midi.div_euclid(12) - 1
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", PITCH_CLASSES[self.pitch_class()], self.octave())
    }
}

impl FromStr for Note {
    type Err = PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PitchError::InvalidNote(s.to_string());
        let mut chars = s.trim().chars();

        let base = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => 0,
            Some('D') => 2,
            Some('E') => 4,
            Some('F') => 5,
            Some('G') => 7,
            Some('A') => 9,
            Some('B') => 11,
            _ => return Err(invalid()),
        };

        let rest = chars.as_str();
        let (accidental, octave) = if let Some(o) = rest.strip_prefix('#') {
            (1, o)
        } else if let Some(o) = rest.strip_prefix('b') {
            (-1, o)
        } else {
            (0, rest)
        };

        let octave: i32 = octave.parse().map_err(|_| invalid())?;
        if !(-1..=9).contains(&octave) {
            return Err(invalid());
        }

        let midi = (octave + 1) * 12 + base + accidental;
        if !(0..=127).contains(&midi) {
            return Err(invalid());
        }

        Ok(Note::from_midi(midi))
    }
}
