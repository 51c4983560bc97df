//! Frequency tables for 12-tone equal temperament and Pythagorean tuning.
mod just;
mod notes;
mod table;
mod types;

pub use just::{interval_ratio, pythagorean_frequencies, Interval, JUST_INTERVAL_RATIOS};
pub use notes::{freq_from_note, harmonic_overtones, note_range, A4};
pub use table::{
    equal_temperament_table, format_hz, just_intonation_table, overtone_row, TABLE_END_NOTE,
    TABLE_FIRST_NOTE,
};
pub use types::{Hz, Note, PitchError};
