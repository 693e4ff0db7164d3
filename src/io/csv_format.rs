//! CSV output of simulation histories
//!
//! This module writes the stocks, flows and metrics histories as CSV tables,
//! one row per step, one column per record key.
//!
//! All writers take a `dyn Write` so they can be tested against in-memory
//! buffers.

use crate::core::{History, Record};
use crate::types::SimulationError;
use indexmap::IndexSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// File names written by [`write_results`], in order
pub const OUTPUT_FILES: [&str; 3] = ["stocks.csv", "flows.csv", "metrics.csv"];

/// Union of record keys in first-seen order
fn columns(records: &[Record]) -> IndexSet<&str> {
    records
        .iter()
        .flat_map(|record| record.keys().map(String::as_str))
        .collect()
}

/// Write records as a CSV table
///
/// The header is the union of all record keys in first-seen order. A record
/// missing a column gets an empty cell. No rows are written for an empty
/// slice, and no header either.
///
/// # Errors
///
/// Returns `Csv` or `Io` errors from the underlying writer.
pub fn write_history_csv(
    records: &[Record],
    output: &mut dyn Write,
) -> Result<(), SimulationError> {
    let columns = columns(records);
    if columns.is_empty() {
        return Ok(());
    }

    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(columns.iter())?;

    for record in records {
        writer.write_record(columns.iter().map(|column| {
            record
                .get(*column)
                .map(|value| value.to_string())
                .unwrap_or_default()
        }))?;
    }

    writer.flush()?;
    Ok(())
}

/// Write `stocks.csv`, `flows.csv` and `metrics.csv` into `dir`
///
/// The directory is created if it does not exist; existing files are
/// overwritten.
pub fn write_results(dir: &Path, history: &History) -> Result<(), SimulationError> {
    fs::create_dir_all(dir)?;

    let tables = [&history.stocks, &history.flows, &history.metrics];
    for (name, records) in OUTPUT_FILES.iter().zip(tables) {
        let path = dir.join(name);
        let mut file = BufWriter::new(File::create(&path)?);
        write_history_csv(records, &mut file)?;
        file.flush()?;
        tracing::debug!(path = %path.display(), rows = records.len(), "wrote csv");
    }
    Ok(())
}
