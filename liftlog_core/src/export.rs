//! CSV export of workout history.

use crate::{LogEntry, Result};
use std::path::Path;

/// Column names, written even when there are no rows
const HEADER: [&str; 9] = [
    "id",
    "created_at",
    "category",
    "exercise",
    "sets",
    "reps",
    "weight",
    "volume",
    "notes",
];

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    created_at: String,
    category: String,
    exercise: &'a str,
    sets: u32,
    reps: u32,
    weight: f64,
    volume: f64,
    notes: &'a str,
}

impl<'a> From<&'a LogEntry> for CsvRow<'a> {
    fn from(entry: &'a LogEntry) -> Self {
        CsvRow {
            id: entry.id.as_deref().unwrap_or(""),
            created_at: entry.created_at.to_rfc3339(),
            category: entry.category.to_string(),
            exercise: &entry.exercise,
            sets: entry.sets,
            reps: entry.reps,
            weight: entry.weight,
            volume: entry.volume(),
            notes: &entry.notes,
        }
    }
}

/// Write entries to `path` as CSV with a header row, replacing the file
///
/// Returns the number of rows written. The file is synced before returning.
pub fn export_csv(entries: &[LogEntry], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer.write_record(HEADER)?;

    for entry in entries {
        writer.serialize(CsvRow::from(entry))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Exported {} workouts to {:?}", entries.len(), path);
    Ok(entries.len())
}
