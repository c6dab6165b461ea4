//! Append-only writer for feature record streams.

use std::io::Write;

use super::{Observation, RecordError, RecordSchema};

/// Writes feature records to a byte stream, one line per observation.
///
/// Records are appended in the order they are handed in; the writer
/// performs no buffering of its own, deduplication, or reordering.
pub struct RecordWriter<W: Write> {
    inner: W,
    schema: RecordSchema,
    records_written: u64,
}

impl<W: Write> RecordWriter<W> {
    /// Creates a writer emitting the given schema.
    pub fn new(inner: W, schema: RecordSchema) -> Self {
        Self {
            inner,
            schema,
            records_written: 0,
        }
    }

    /// Appends a single observation as one record line.
    pub fn write(&mut self, obs: &Observation) -> Result<(), RecordError> {
        writeln!(self.inner, "{}", self.schema.format(obs))?;
        self.records_written += 1;
        Ok(())
    }

    /// Appends a batch of observations in order.
    pub fn write_all(&mut self, observations: &[Observation]) -> Result<(), RecordError> {
        for obs in observations {
            self.write(obs)?;
        }
        Ok(())
    }

    /// Flushes the underlying stream.
    pub fn flush(&mut self) -> Result<(), RecordError> {
        self.inner.flush()?;
        Ok(())
    }

    /// Returns the number of records written so far.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Consumes the writer, returning the underlying stream.
    pub fn into_inner(self) -> W {
        self.inner
    }
}
