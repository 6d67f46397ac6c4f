use std::{collections::HashMap, io::Write};

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::TaskRecord;

/// Destination for task records.
///
/// Writing a record for an id that was already recorded replaces it.
pub trait OutcomeSink {
    /// Stores `record`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be stored.
    fn record(&mut self, record: &TaskRecord) -> Result<(), SinkError>;
}

/// Errors that can occur when storing a record.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write record")]
    Io(#[from] std::io::Error),

    #[error("failed to encode record")]
    Encode(#[from] serde_json::Error),

    #[error("record channel is closed")]
    Closed,
}

/// Keeps the latest record per task id in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: HashMap<i64, TaskRecord>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the latest record for `id`.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&TaskRecord> {
        self.records.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl OutcomeSink for MemorySink {
    fn record(&mut self, record: &TaskRecord) -> Result<(), SinkError> {
        self.records.insert(record.id, record.clone());
        Ok(())
    }
}

/// Appends records as newline-delimited JSON.
///
/// Replacement is left to the reader: the last line for an id wins.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutcomeSink for JsonLinesSink<W> {
    fn record(&mut self, record: &TaskRecord) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Forwards records to a channel, for workers on other threads.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<TaskRecord>,
}

impl ChannelSink {
    #[must_use]
    pub fn new(tx: UnboundedSender<TaskRecord>) -> Self {
        Self { tx }
    }
}

impl OutcomeSink for ChannelSink {
    fn record(&mut self, record: &TaskRecord) -> Result<(), SinkError> {
        self.tx.send(record.clone()).map_err(|_| SinkError::Closed)
    }
}
