use super::types::{Hz, MidiNote, Note, PitchError};

/// Reference pitch of the equal-temperament table
pub const A4: Hz = 440.0;

const A4_MIDI: MidiNote = 69;

impl Note {
    /// Equal-temperament frequency relative to A4 = 440 Hz
    pub fn frequency(&self) -> Hz {
        let offset = self.midi() - A4_MIDI;
        if offset == 0 {
            return A4;
        }
        A4 * 2f64.powf(offset as f64 / 12.0)
    }
}

/// Resolves a note name such as `C#5` to its 12-TET frequency.
pub fn freq_from_note(name: &str) -> Result<Hz, PitchError> {
    Ok(name.parse::<Note>()?.frequency())
}

/// Every chromatic note from `from` up to, but not including, `until`.
pub fn note_range(from: &str, until: &str) -> Result<Vec<Note>, PitchError> {
    let start: Note = from.parse()?;
    let end: Note = until.parse()?;
    if end < start {
        return Err(PitchError::InvalidRange(from.to_string(), until.to_string()));
    }

    Ok((start.midi()..end.midi()).map(Note::from_midi).collect())
}

/// The fundamental followed by its first `n_overtones` harmonics.
pub fn harmonic_overtones(fundamental: Hz, n_overtones: usize) -> Vec<Hz> {
    (1..=n_overtones + 1)
        .map(|k| fundamental * k as f64)
        .collect()
}
