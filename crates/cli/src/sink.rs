//! NDJSON staging sink.
//!
//! The host-side collaborator that receives normalised record batches. One
//! JSON object per line, written through a buffered file handle. The sink
//! trait is infallible by contract, so write failures are latched and
//! surfaced once the run has finished.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use connector::{NormalizedRecord, RecordSink};

/// Writes each normalised record as one NDJSON line.
pub struct NdjsonSink {
    writer: BufWriter<File>,
    records: usize,
    failure: Option<anyhow::Error>,
}

impl NdjsonSink {
    /// Creates (or truncates) the staging file at `path`.
    pub fn create(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create staging file {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
            records: 0,
            failure: None,
        })
    }

    /// Flushes the staging file and reports the number of records written,
    /// or the first write failure encountered during the run.
    pub fn finish(mut self) -> anyhow::Result<usize> {
        if let Some(failure) = self.failure {
            return Err(failure);
        }
        self.writer
            .flush()
            .context("failed to flush staging file")?;
        Ok(self.records)
    }
}

impl RecordSink for NdjsonSink {
    fn push_records(&mut self, batch: Vec<NormalizedRecord>) {
        if self.failure.is_some() {
            return;
        }
        debug!(size = batch.len(), "staging record batch");
        for record in &batch {
            let result = serde_json::to_writer(&mut self.writer, record)
                .map_err(anyhow::Error::from)
                .and_then(|()| self.writer.write_all(b"\n").map_err(anyhow::Error::from));
            match result {
                Ok(()) => self.records += 1,
                Err(err) => {
                    self.failure = Some(err.context("failed to write staging record"));
                    return;
                }
            }
        }
    }
}
