use super::just::pythagorean_frequencies;
use super::notes::{harmonic_overtones, note_range};
use super::types::{Hz, PitchError};

/// Formats a frequency for file names and tables.
///
/// Whole numbers keep one decimal (`440.0`); anything else uses the
/// shortest representation that reads back exactly (`556.875`).
pub fn format_hz(frequency: Hz) -> String {
    if frequency.fract() == 0.0 && frequency.abs() < 1e15 {
        format!("{:.1}", frequency)
    } else {
        format!("{}", frequency)
    }
}

fn round_cents(frequency: Hz) -> Hz {
    (frequency * 100.0).round() / 100.0
}

/// One table row: the label, then the fundamental and its overtones
/// rounded to two decimals, all tab-separated.
pub fn overtone_row(label: &str, fundamental: Hz, n_overtones: usize) -> String {
    let freqs = harmonic_overtones(fundamental, n_overtones)
        .into_iter()
        .map(|f| format_hz(round_cents(f)))
        .collect::<Vec<String>>()
        .join("\t");
    format!("{}\t{}", label, freqs)
}

/// First note of the printed 12-TET table
pub const TABLE_FIRST_NOTE: &str = "A4";

/// End of the printed 12-TET table; this note itself is not printed
pub const TABLE_END_NOTE: &str = "G#5";

/// Overtone rows for every equal-tempered note from `from` up to `until`.
pub fn equal_temperament_table(
    from: &str,
    until: &str,
    n_overtones: usize,
) -> Result<Vec<String>, PitchError> {
    Ok(note_range(from, until)?
        .into_iter()
        .map(|note| overtone_row(&note.to_string(), note.frequency(), n_overtones))
        .collect())
}

/// Overtone rows for the 13 Pythagorean intervals above `base_frequency`.
pub fn just_intonation_table(base_frequency: Hz, n_overtones: usize) -> Vec<String> {
    pythagorean_frequencies(base_frequency)
        .into_iter()
        .map(|(interval, f)| overtone_row(interval, f, n_overtones))
        .collect()
}
