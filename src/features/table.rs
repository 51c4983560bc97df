use super::types::{FeatureError, FeatureRow};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const CSV_HEADER: &str = "sound_id,spectral_centroid,inharmonicity";

/// Writes feature rows as CSV, header first, one line per row.
pub fn write_csv_to<W: Write>(writer: &mut W, rows: &[FeatureRow]) -> Result<(), FeatureError> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for row in rows {
        writeln!(
            writer,
            "{},{},{}",
            escape_field(&row.sound_id),
            format_value(row.spectral_centroid),
            format_value(row.inharmonicity)
        )?;
    }
    Ok(())
}

/// Writes feature rows to a CSV file, replacing any existing file.
pub fn write_csv(path: &Path, rows: &[FeatureRow]) -> Result<(), FeatureError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_csv_to(&mut writer, rows)?;
    writer.flush()?;
    Ok(())
}

/// Whole numbers keep one decimal (`0.0`), others use the shortest exact form.
fn format_value(value: f32) -> String {
    if value.fract() == 0.0 && value.abs() < 1e7 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
