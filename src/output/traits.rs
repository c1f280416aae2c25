//! Record sink trait and the in-memory sink

use crate::output::ProductRecord;
use crate::Result;

/// Destination for extracted product records
///
/// The walker hands each leaf's records to the sink as soon as they are
/// extracted, so a run interrupted halfway keeps everything scraped so far.
pub trait RecordSink {
    /// Appends a batch of records
    ///
    /// # Arguments
    ///
    /// * `records` - Records from one leaf listing, in page order
    fn append(&mut self, records: &[ProductRecord]) -> Result<()>;

    /// Human-readable name of where records go, for the completion message
    fn destination(&self) -> String;
}

/// Sink that keeps every record in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<ProductRecord>,
    batches: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    /// Number of non-empty batches appended
    pub fn batches(&self) -> usize {
        self.batches
    }
}

impl RecordSink for MemorySink {
    fn append(&mut self, records: &[ProductRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        self.records.extend_from_slice(records);
        self.batches += 1;
        Ok(())
    }

    fn destination(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::CategoryPath;

    #[test]
    fn test_memory_sink_collects_batches() {
        let mut sink = MemorySink::new();
        let path = CategoryPath::root("Bagno");
        let batch = vec![
            ProductRecord::new(&path, "https://a/1"),
            ProductRecord::new(&path, "https://a/1"),
        ];

        sink.append(&batch).unwrap();
        sink.append(&[]).unwrap();
        sink.append(&batch[..1]).unwrap();

        assert_eq!(sink.records().len(), 3);
        assert_eq!(sink.batches(), 2);
        assert_eq!(sink.destination(), "memory");
    }
}
