//! CSV record sink
//!
//! Records are appended to a single CSV file. The header row is written only
//! when the destination is fresh (missing or empty), so repeated runs against
//! the same path accumulate into one continuously growing table.

use crate::output::{ProductRecord, RecordSink, COLUMNS};
use crate::Result;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Appends product records to a CSV file
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the destination has no content yet
    fn is_fresh(&self) -> Result<bool> {
        match std::fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len() == 0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(e.into()),
        }
    }
}

impl RecordSink for CsvSink {
    fn append(&mut self, records: &[ProductRecord]) -> Result<()> {
        // Nothing to write: leave the destination untouched
        if records.is_empty() {
            return Ok(());
        }

        let write_header = self.is_fresh()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header {
            writer.write_record(COLUMNS)?;
        }

        for record in records {
            writer.write_record(record.values())?;
        }

        writer.flush()?;

        tracing::debug!(
            "Appended {} records to {}",
            records.len(),
            self.path.display()
        );

        Ok(())
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}
