//! CSV export of borehole records.

use boresite_core::Borehole;
use std::io::Write;

const HEADER: [&str; 8] = [
    "code",
    "name",
    "latitude",
    "longitude",
    "ground_level",
    "total_depth",
    "status",
    "notes",
];

/// Writes one header row plus one row per borehole, in the given order.
///
/// `None` values become empty cells.
pub fn write_boreholes_csv<W: Write>(boreholes: &[Borehole], writer: W) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;
    for borehole in boreholes {
        csv_writer.write_record([
            borehole.code.clone(),
            borehole.name.clone().unwrap_or_default(),
            borehole.latitude.to_string(),
            borehole.longitude.to_string(),
            optional_number(borehole.ground_level),
            optional_number(borehole.total_depth),
            borehole.status.as_str().to_string(),
            borehole.notes.clone(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn optional_number(value: Option<f64>) -> String {
    value.map(|number| number.to_string()).unwrap_or_default()
}
