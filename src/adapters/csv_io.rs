use crate::domain::model::Tank;
use crate::utils::error::Result;
use serde::Deserialize;
use std::path::Path;

/// Lenient row shape for import; missing columns fall back to defaults so
/// hand-edited spreadsheets load cleanly. Invariants are still enforced
/// when the rows reach the store.
#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    #[serde(default)]
    blend: Option<String>,
    #[serde(default)]
    is_empty: Option<String>,
    #[serde(default)]
    current_volume: Option<f64>,
    #[serde(default)]
    capacity: Option<f64>,
}

impl From<CsvRow> for Tank {
    fn from(row: CsvRow) -> Self {
        let current_volume = row.current_volume.unwrap_or(0.0);
        let is_empty = row
            .is_empty
            .map(|flag| flag.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(current_volume <= 0.0);
        Tank {
            name: row.name,
            blend: row.blend.filter(|b| !b.trim().is_empty()),
            is_empty,
            current_volume,
            capacity: row.capacity.unwrap_or(0.0),
        }
    }
}

/// Renders the inventory as a CSV document with the columns
/// `name,blend,is_empty,current_volume,capacity`.
pub fn export_csv(tanks: &[Tank]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for tank in tanks {
        writer.serialize(tank)?;
    }
    let bytes = writer.into_inner().map_err(std::io::Error::other)?;
    Ok(String::from_utf8(bytes).map_err(std::io::Error::other)?)
}

/// Parses a CSV document into tank records. Rows are not validated here;
/// the store rejects malformed records on upsert.
pub fn import_csv(data: &str) -> Result<Vec<Tank>> {
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    let mut tanks = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        tanks.push(row?.into());
    }
    Ok(tanks)
}

pub fn import_path(path: &Path) -> Result<Vec<Tank>> {
    import_csv(&std::fs::read_to_string(path)?)
}
