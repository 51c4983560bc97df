use super::types::{Hz, PitchError};

/// A named interval with an exact frequency ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub name: &'static str,
    pub numerator: u32,
    pub denominator: u32,
}

impl Interval {
    const fn new(name: &'static str, numerator: u32, denominator: u32) -> Self {
        Interval {
            name,
            numerator,
            denominator,
        }
    }

    pub fn ratio(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

/// Pythagorean interval ratios from unison to major seventh.
///
/// Every ratio is a product of powers of 2 and 3.
/// See https://en.wikipedia.org/wiki/Pythagorean_tuning
pub const JUST_INTERVAL_RATIOS: [Interval; 13] = [
    Interval::new("unison", 1, 1),
    Interval::new("minor second", 256, 243),
    Interval::new("major second", 9, 8),
    Interval::new("minor third", 32, 27),
    Interval::new("major third", 81, 64),
    Interval::new("perfect fourth", 4, 3),
    Interval::new("diminished fifth", 1024, 729),
    Interval::new("augmented fourth", 729, 512),
    Interval::new("perfect fifth", 3, 2),
    Interval::new("minor sixth", 128, 81),
    Interval::new("major sixth", 27, 16),
    Interval::new("minor seventh", 16, 9),
    Interval::new("major seventh", 243, 128),
];

/// Looks up the ratio of a named interval.
pub fn interval_ratio(name: &str) -> Result<f64, PitchError> {
    JUST_INTERVAL_RATIOS
        .iter()
        .find(|i| i.name.eq_ignore_ascii_case(name.trim()))
        .map(Interval::ratio)
        .ok_or_else(|| PitchError::UnknownInterval(name.to_string()))
}

/// The 13 Pythagorean frequencies above `base_frequency`, in table order.
pub fn pythagorean_frequencies(base_frequency: Hz) -> Vec<(&'static str, Hz)> {
    JUST_INTERVAL_RATIOS
        .iter()
        .map(|i| (i.name, base_frequency * i.ratio()))
        .collect()
}
