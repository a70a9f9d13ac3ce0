// src/output/emitter.rs

use tracing::debug;

use crate::errors::{PathwatchError, Result};
use crate::output::sink::OutputSink;
use crate::types::WatchOptions;
use crate::watch::matcher::Change;

const DELETE_PREFIX: &[u8] = b"- ";

/// What happened to one matched change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    Written,
    /// Pipe mode found unread output; the caller drops the rest of the batch.
    Backlogged(usize),
}

/// Formats matched changes as `[- ]path<delim>` records.
#[derive(Debug)]
pub struct Emitter<O: OutputSink> {
    sink: O,
    delimiter: u8,
    pipe_mode: bool,
    record: Vec<u8>,
}

impl<O: OutputSink> Emitter<O> {
    pub fn new(sink: O, options: &WatchOptions) -> Self {
        Self {
            sink,
            delimiter: options.delimiter.byte(),
            pipe_mode: options.pipe_mode,
            record: Vec::new(),
        }
    }

    pub fn sink(&self) -> &O {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut O {
        &mut self.sink
    }

    /// Write one record and flush it.
    ///
    /// In pipe mode the backlog check happens immediately before the write.
    /// The two are not atomic: the reader can fall behind in between.
    pub fn emit(&mut self, change: &Change) -> Result<Emit> {
        if self.pipe_mode {
            match self.sink.pending_bytes() {
                Ok(0) => {}
                Ok(n) => return Ok(Emit::Backlogged(n)),
                Err(err) => debug!(error = %err, "unable to read output backlog"),
            }
        }

        self.record.clear();
        if change.is_delete {
            self.record.extend_from_slice(DELETE_PREFIX);
        }
        self.record.extend_from_slice(change.path.as_bytes());
        self.record.push(self.delimiter);

        self.sink
            .write_all(&self.record)
            .and_then(|()| self.sink.flush())
            .map_err(PathwatchError::Output)?;

        Ok(Emit::Written)
    }
}
